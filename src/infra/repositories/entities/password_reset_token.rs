//! `password_reset_tokens` table entity.
//!
//! Keyed by email: forgot-password replaces any existing row for the
//! email inside a transaction, so at most one live token exists per
//! address. There is no expiry column; a token stays valid until a
//! newer request supersedes it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "password_reset_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub token: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
