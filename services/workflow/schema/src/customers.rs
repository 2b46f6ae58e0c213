use sea_orm::entity::prelude::*;

/// Customer progressing through the onboarding workflow.
///
/// `phone` is the canonical digits-only form and the unique join key
/// for inbound-message lookup. `stage` holds the snake_case stage name;
/// it is written only by the workflow use cases and only ever forward.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub phone: String,
    pub full_name: String,
    pub stage: String,
    pub wa_opt_in: bool,
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
    pub health_form_signed: bool,
    pub face_recognition_id: Option<String>,
    pub is_new_client: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::memberships::Entity")]
    Memberships,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::memberships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
