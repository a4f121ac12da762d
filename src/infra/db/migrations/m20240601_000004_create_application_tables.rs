//! Migration: Create the job_applications and saved_jobs tables.
//!
//! Neither table carries a (job_id, user_id) uniqueness constraint:
//! repeat applies and repeat saves create repeat rows.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_users_table::Users;
use super::m20240601_000003_create_jobs_table::Jobs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobApplications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::JobId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::EmployerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::AppliedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_applications_job_id")
                            .from(JobApplications::Table, JobApplications::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_applications_user_id")
                            .from(JobApplications::Table, JobApplications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_applications_employer_id")
                            .from(JobApplications::Table, JobApplications::EmployerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SavedJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedJobs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedJobs::JobId).big_integer().not_null())
                    .col(ColumnDef::new(SavedJobs::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(SavedJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SavedJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_jobs_job_id")
                            .from(SavedJobs::Table, SavedJobs::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_jobs_user_id")
                            .from(SavedJobs::Table, SavedJobs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedJobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JobApplications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum JobApplications {
    Table,
    Id,
    JobId,
    UserId,
    EmployerId,
    AppliedDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SavedJobs {
    Table,
    Id,
    JobId,
    UserId,
    CreatedAt,
    UpdatedAt,
}
