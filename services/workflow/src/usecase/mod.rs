pub mod inbound;
pub mod onboarding;
pub mod payment;
pub mod status;

use tracing::{debug, info};
use uuid::Uuid;

use solara_domain::stage::Stage;

use crate::domain::repository::CustomerRepository;
use crate::error::WorkflowServiceError;

/// Forward-only stage write.
///
/// A requested stage at or behind the current one is skipped, so a
/// replayed event can never regress a customer. Returns the stage the
/// customer is at after the call.
pub(crate) async fn advance_stage<C: CustomerRepository>(
    customers: &C,
    customer_id: Uuid,
    current: Stage,
    next: Stage,
) -> Result<Stage, WorkflowServiceError> {
    if next <= current {
        debug!(
            %customer_id,
            current = current.as_str(),
            requested = next.as_str(),
            "stage write skipped"
        );
        return Ok(current);
    }
    customers.set_stage(customer_id, next).await?;
    info!(
        %customer_id,
        from = current.as_str(),
        to = next.as_str(),
        "stage advanced"
    );
    Ok(next)
}
