#![allow(async_fn_in_trait)]

use uuid::Uuid;

use solara_domain::stage::Stage;

use crate::domain::types::{
    Customer, Membership, MembershipCredit, PaymentOutcome, PaymentTransaction, Template,
};
use crate::error::WorkflowServiceError;

/// Repository for customers.
pub trait CustomerRepository: Send + Sync {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, WorkflowServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, WorkflowServiceError>;
    async fn create(&self, customer: &Customer) -> Result<(), WorkflowServiceError>;

    /// Set `last_message_at` to now.
    async fn touch_last_message(&self, id: Uuid) -> Result<(), WorkflowServiceError>;

    /// Persist a stage value. Callers go through the forward-only guard
    /// in the use-case layer; implementations write what they are given.
    async fn set_stage(&self, id: Uuid, stage: Stage) -> Result<(), WorkflowServiceError>;

    async fn set_health_form_signed(&self, id: Uuid) -> Result<(), WorkflowServiceError>;

    async fn set_face_recognition(
        &self,
        id: Uuid,
        face_recognition_id: &str,
    ) -> Result<(), WorkflowServiceError>;

    /// Clear the new-client flag once onboarding completes.
    async fn set_returning_client(&self, id: Uuid) -> Result<(), WorkflowServiceError>;
}

/// Read side for membership balances. Credits go through `PaymentLedger`.
pub trait MembershipRepository: Send + Sync {
    async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Membership>, WorkflowServiceError>;
}

/// Atomic payment recording: transaction insert plus membership credit
/// in one database transaction, keyed on the external transaction id.
pub trait PaymentLedger: Send + Sync {
    /// Returns `Duplicate` without mutating anything when
    /// `txn.external_id` has been seen before.
    async fn record_payment(
        &self,
        txn: &PaymentTransaction,
        credit: &MembershipCredit,
    ) -> Result<PaymentOutcome, WorkflowServiceError>;
}

/// Port for the messaging gateway.
///
/// Delivery failure is reported as `false`, never as an error; the
/// workflow treats notifications as best-effort.
pub trait MessagingPort: Send + Sync {
    /// Send a template message. `params` are rendered positionally in
    /// slice order; the keys exist for logging and readability.
    async fn send_template(
        &self,
        phone: &str,
        template: Template,
        params: &[(&str, &str)],
    ) -> bool;
}
