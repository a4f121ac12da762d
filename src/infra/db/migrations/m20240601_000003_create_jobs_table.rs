//! Migration: Create the jobs table.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_users_table::Users;
use super::m20240601_000002_create_taxonomy_tables::{Categories, JobTypes};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Jobs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Jobs::Title).string().not_null())
                    .col(ColumnDef::new(Jobs::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Jobs::JobTypeId).big_integer().not_null())
                    .col(ColumnDef::new(Jobs::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Jobs::Vacancy).integer().not_null())
                    .col(ColumnDef::new(Jobs::Salary).string().null())
                    .col(ColumnDef::new(Jobs::Location).string().not_null())
                    .col(ColumnDef::new(Jobs::Description).text().not_null())
                    .col(ColumnDef::new(Jobs::Benefits).text().null())
                    .col(ColumnDef::new(Jobs::Responsibility).text().null())
                    .col(ColumnDef::new(Jobs::Qualifications).text().null())
                    .col(ColumnDef::new(Jobs::Keywords).string().null())
                    .col(ColumnDef::new(Jobs::Experience).string().null())
                    .col(ColumnDef::new(Jobs::CompanyName).string().not_null())
                    .col(ColumnDef::new(Jobs::CompanyLocation).string().null())
                    .col(ColumnDef::new(Jobs::CompanyWebsite).string().null())
                    .col(
                        ColumnDef::new(Jobs::Status)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Jobs::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Jobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Jobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_user_id")
                            .from(Jobs::Table, Jobs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_category_id")
                            .from(Jobs::Table, Jobs::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_job_type_id")
                            .from(Jobs::Table, Jobs::JobTypeId)
                            .to(JobTypes::Table, JobTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Search hits status + created_at on every request
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_status_created_at")
                    .table(Jobs::Table)
                    .col(Jobs::Status)
                    .col(Jobs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_user_id")
                    .table(Jobs::Table)
                    .col(Jobs::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Jobs {
    Table,
    Id,
    Title,
    CategoryId,
    JobTypeId,
    UserId,
    Vacancy,
    Salary,
    Location,
    Description,
    Benefits,
    Responsibility,
    Qualifications,
    Keywords,
    Experience,
    CompanyName,
    CompanyLocation,
    CompanyWebsite,
    Status,
    IsFeatured,
    CreatedAt,
    UpdatedAt,
}
