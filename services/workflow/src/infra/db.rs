use anyhow::Context as _;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel as _, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use solara_domain::package::ServiceKind;
use solara_domain::stage::Stage;
use solara_workflow_schema::{customers, memberships, transactions};

use crate::domain::repository::{CustomerRepository, MembershipRepository, PaymentLedger};
use crate::domain::types::{
    Customer, MEMBERSHIP_EXPIRY_DAYS, Membership, MembershipCredit, PaymentOutcome,
    PaymentTransaction,
};
use crate::error::WorkflowServiceError;

// ── Customer repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCustomerRepository {
    pub db: DatabaseConnection,
}

impl CustomerRepository for DbCustomerRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, WorkflowServiceError> {
        let model = customers::Entity::find()
            .filter(customers::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .context("find customer by phone")?;
        model.map(customer_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, WorkflowServiceError> {
        let model = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find customer by id")?;
        model.map(customer_from_model).transpose()
    }

    async fn create(&self, customer: &Customer) -> Result<(), WorkflowServiceError> {
        customers::ActiveModel {
            id: Set(customer.id),
            phone: Set(customer.phone.clone()),
            full_name: Set(customer.full_name.clone()),
            stage: Set(customer.stage.as_str().to_owned()),
            wa_opt_in: Set(customer.wa_opt_in),
            last_message_at: Set(customer.last_message_at),
            health_form_signed: Set(customer.health_form_signed),
            face_recognition_id: Set(customer.face_recognition_id.clone()),
            is_new_client: Set(customer.is_new_client),
            created_at: Set(customer.created_at),
            updated_at: Set(customer.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create customer")?;
        Ok(())
    }

    async fn touch_last_message(&self, id: Uuid) -> Result<(), WorkflowServiceError> {
        let now = Utc::now();
        customers::ActiveModel {
            id: Set(id),
            last_message_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("touch last message")?;
        Ok(())
    }

    async fn set_stage(&self, id: Uuid, stage: Stage) -> Result<(), WorkflowServiceError> {
        customers::ActiveModel {
            id: Set(id),
            stage: Set(stage.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set customer stage")?;
        Ok(())
    }

    async fn set_health_form_signed(&self, id: Uuid) -> Result<(), WorkflowServiceError> {
        customers::ActiveModel {
            id: Set(id),
            health_form_signed: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set health form signed")?;
        Ok(())
    }

    async fn set_face_recognition(
        &self,
        id: Uuid,
        face_recognition_id: &str,
    ) -> Result<(), WorkflowServiceError> {
        customers::ActiveModel {
            id: Set(id),
            face_recognition_id: Set(Some(face_recognition_id.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set face recognition id")?;
        Ok(())
    }

    async fn set_returning_client(&self, id: Uuid) -> Result<(), WorkflowServiceError> {
        customers::ActiveModel {
            id: Set(id),
            is_new_client: Set(false),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set returning client")?;
        Ok(())
    }
}

fn customer_from_model(model: customers::Model) -> Result<Customer, WorkflowServiceError> {
    let stage = Stage::from_snake_case(&model.stage)
        .ok_or_else(|| anyhow::anyhow!("unknown stage value in database: {}", model.stage))?;
    Ok(Customer {
        id: model.id,
        phone: model.phone,
        full_name: model.full_name,
        stage,
        wa_opt_in: model.wa_opt_in,
        last_message_at: model.last_message_at,
        health_form_signed: model.health_form_signed,
        face_recognition_id: model.face_recognition_id,
        is_new_client: model.is_new_client,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Membership repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

impl MembershipRepository for DbMembershipRepository {
    async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Membership>, WorkflowServiceError> {
        let models = memberships::Entity::find()
            .filter(memberships::Column::CustomerId.eq(customer_id))
            .order_by_asc(memberships::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list memberships by customer")?;
        models.into_iter().map(membership_from_model).collect()
    }
}

fn membership_from_model(model: memberships::Model) -> Result<Membership, WorkflowServiceError> {
    let kind = ServiceKind::from_kebab_case(&model.kind)
        .ok_or_else(|| anyhow::anyhow!("unknown membership kind in database: {}", model.kind))?;
    Ok(Membership {
        id: model.id,
        customer_id: model.customer_id,
        kind,
        balance: model.balance,
        total_purchased: model.total_purchased,
        expiry_date: model.expiry_date,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Payment ledger ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPaymentLedger {
    pub db: DatabaseConnection,
}

impl PaymentLedger for DbPaymentLedger {
    async fn record_payment(
        &self,
        txn: &PaymentTransaction,
        credit: &MembershipCredit,
    ) -> Result<PaymentOutcome, WorkflowServiceError> {
        let outcome = self
            .db
            .transaction::<_, PaymentOutcome, sea_orm::DbErr>(|db_txn| {
                let txn = txn.clone();
                let credit = credit.clone();
                Box::pin(async move {
                    // Idempotency check first, inside the same transaction
                    // as the writes it guards.
                    let existing = transactions::Entity::find()
                        .filter(transactions::Column::ExternalId.eq(txn.external_id.clone()))
                        .one(db_txn)
                        .await?;
                    if existing.is_some() {
                        return Ok(PaymentOutcome::Duplicate);
                    }
                    insert_transaction(db_txn, &txn).await?;
                    credit_membership(db_txn, &credit).await?;
                    Ok(PaymentOutcome::Recorded)
                })
            })
            .await
            .context("record payment")?;
        Ok(outcome)
    }
}

async fn insert_transaction(
    db_txn: &DatabaseTransaction,
    txn: &PaymentTransaction,
) -> Result<(), sea_orm::DbErr> {
    transactions::ActiveModel {
        id: Set(txn.id),
        customer_id: Set(txn.customer_id),
        kind: Set(txn.kind.as_str().to_owned()),
        amount: Set(txn.amount),
        currency: Set(txn.currency.clone()),
        status: Set(txn.status.as_str().to_owned()),
        external_id: Set(txn.external_id.clone()),
        metadata: Set(txn.metadata.clone()),
        created_at: Set(txn.created_at),
    }
    .insert(db_txn)
    .await?;
    Ok(())
}

async fn credit_membership(
    db_txn: &DatabaseTransaction,
    credit: &MembershipCredit,
) -> Result<(), sea_orm::DbErr> {
    let existing = memberships::Entity::find()
        .filter(memberships::Column::CustomerId.eq(credit.customer_id))
        .filter(memberships::Column::Kind.eq(credit.kind.as_str()))
        .filter(memberships::Column::IsActive.eq(true))
        .one(db_txn)
        .await?;

    match existing {
        Some(row) => {
            let balance = row.balance + credit.sessions;
            let total_purchased = row.total_purchased + credit.sessions;
            let mut membership = row.into_active_model();
            membership.balance = Set(balance);
            membership.total_purchased = Set(total_purchased);
            membership.updated_at = Set(Utc::now());
            membership.update(db_txn).await?;
        }
        None => {
            let now = Utc::now();
            memberships::ActiveModel {
                id: Set(Uuid::now_v7()),
                customer_id: Set(credit.customer_id),
                kind: Set(credit.kind.as_str().to_owned()),
                balance: Set(credit.sessions),
                total_purchased: Set(credit.sessions),
                expiry_date: Set(now + Duration::days(MEMBERSHIP_EXPIRY_DAYS)),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(db_txn)
            .await?;
        }
    }
    Ok(())
}
