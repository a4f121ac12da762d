//! `job_applications` table entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "job_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub job_id: i64,
    /// Applicant
    pub user_id: i64,
    /// Job owner captured at apply time
    pub employer_id: i64,
    pub applied_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Applicant,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::EmployerId",
        to = "super::user::Column::Id"
    )]
    Employer,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

// Default user relation resolves to the applicant; the employer side
// is joined explicitly where needed.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::JobApplication {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            job_id: model.job_id,
            user_id: model.user_id,
            employer_id: model.employer_id,
            applied_date: model.applied_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
