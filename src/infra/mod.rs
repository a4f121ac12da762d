//! Infrastructure layer
//!
//! Database access, repositories, transactional unit of work and file
//! storage.

pub mod db;
pub mod repositories;
pub mod unit_of_work;
pub mod uploads;

pub use db::Database;
pub use unit_of_work::{
    Persistence, TransactionContext, TxPasswordResetRepository, UnitOfWork,
};
pub use uploads::ProfileImageStore;
