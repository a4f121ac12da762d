//! HTTP middleware

pub mod auth;

pub use auth::{
    admin_middleware, auth_middleware, guest_middleware, optional_auth_middleware, CurrentUser,
};
