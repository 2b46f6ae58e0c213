use uuid::Uuid;

use crate::domain::repository::{CustomerRepository, MembershipRepository};
use crate::domain::types::{Customer, Membership};
use crate::error::WorkflowServiceError;

// ── GetCustomerStatus ────────────────────────────────────────────────────────

pub struct CustomerStatus {
    pub customer: Customer,
    pub memberships: Vec<Membership>,
}

/// Read-only view of a customer's onboarding progress and balances,
/// polled by the kiosk to decide which screen to show.
pub struct GetCustomerStatusUseCase<C, B>
where
    C: CustomerRepository,
    B: MembershipRepository,
{
    pub customers: C,
    pub memberships: B,
}

impl<C, B> GetCustomerStatusUseCase<C, B>
where
    C: CustomerRepository,
    B: MembershipRepository,
{
    pub async fn execute(&self, customer_id: Uuid) -> Result<CustomerStatus, WorkflowServiceError> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or(WorkflowServiceError::CustomerNotFound)?;
        let memberships = self.memberships.list_by_customer(customer.id).await?;
        Ok(CustomerStatus {
            customer,
            memberships,
        })
    }
}
