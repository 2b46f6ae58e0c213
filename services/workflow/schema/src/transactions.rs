use sea_orm::entity::prelude::*;

/// Immutable record of one payment event.
///
/// `external_id` is the payment gateway's transaction id; the unique
/// index on it is what makes duplicate webhook delivery a no-op.
/// Rows are write-once — the workflow never updates them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub kind: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    #[sea_orm(unique)]
    pub external_id: String,
    pub metadata: Json,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customer,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
