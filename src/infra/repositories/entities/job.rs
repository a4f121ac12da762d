//! `jobs` table entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub category_id: i64,
    pub job_type_id: i64,
    pub user_id: i64,
    pub vacancy: i32,
    pub salary: Option<String>,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub benefits: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub responsibility: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub qualifications: Option<String>,
    pub keywords: Option<String>,
    pub experience: Option<String>,
    pub company_name: String,
    pub company_location: Option<String>,
    pub company_website: Option<String>,
    /// 1 = active (publicly visible), 0 = blocked
    pub status: i16,
    pub is_featured: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::job_type::Entity",
        from = "Column::JobTypeId",
        to = "super::job_type::Column::Id"
    )]
    JobType,
    #[sea_orm(has_many = "super::job_application::Entity")]
    Applications,
    #[sea_orm(has_many = "super::saved_job::Entity")]
    SavedJobs,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::job_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobType.def()
    }
}

impl Related<super::job_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::saved_job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedJobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Job {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            category_id: model.category_id,
            job_type_id: model.job_type_id,
            user_id: model.user_id,
            vacancy: model.vacancy,
            salary: model.salary,
            location: model.location,
            description: model.description,
            benefits: model.benefits,
            responsibility: model.responsibility,
            qualifications: model.qualifications,
            keywords: model.keywords,
            experience: model.experience,
            company_name: model.company_name,
            company_location: model.company_location,
            company_website: model.company_website,
            status: crate::domain::JobStatus::from(model.status),
            is_featured: model.is_featured,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
