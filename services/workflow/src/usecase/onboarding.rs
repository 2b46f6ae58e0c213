use tracing::{error, info, warn};
use uuid::Uuid;

use solara_domain::stage::{Stage, StageAction, transition};

use crate::domain::repository::{CustomerRepository, MessagingPort};
use crate::domain::types::Template;
use crate::error::WorkflowServiceError;
use crate::usecase::advance_stage;

// ── CompleteHealthForm ───────────────────────────────────────────────────────

pub struct CompleteHealthFormUseCase<C>
where
    C: CustomerRepository,
{
    pub customers: C,
}

impl<C> CompleteHealthFormUseCase<C>
where
    C: CustomerRepository,
{
    /// Mark the health form as signed. Deliberately silent: the next
    /// message goes out only at the face-enrollment milestone, so two
    /// closely-spaced onboarding steps don't double-notify.
    pub async fn execute(&self, customer_id: Uuid) -> Result<(), WorkflowServiceError> {
        let Some(customer) = self.customers.find_by_id(customer_id).await? else {
            error!(%customer_id, "health form completion for unknown customer rejected");
            return Err(WorkflowServiceError::CustomerNotFound);
        };
        self.customers.set_health_form_signed(customer.id).await?;
        info!(customer_id = %customer.id, "health form signed");
        advance_stage(
            &self.customers,
            customer.id,
            customer.stage,
            Stage::HealthFormCompleted,
        )
        .await?;
        Ok(())
    }
}

// ── CompleteFaceEnrollment ───────────────────────────────────────────────────

pub struct FaceEnrollmentInput {
    pub customer_id: Uuid,
    /// Opaque identifier assigned by the biometric enrollment service.
    pub face_recognition_id: String,
}

pub struct CompleteFaceEnrollmentUseCase<C, M>
where
    C: CustomerRepository,
    M: MessagingPort,
{
    pub customers: C,
    pub messaging: M,
}

impl<C, M> CompleteFaceEnrollmentUseCase<C, M>
where
    C: CustomerRepository,
    M: MessagingPort,
{
    pub async fn execute(&self, input: FaceEnrollmentInput) -> Result<(), WorkflowServiceError> {
        let Some(customer) = self.customers.find_by_id(input.customer_id).await? else {
            error!(customer_id = %input.customer_id, "face enrollment for unknown customer rejected");
            return Err(WorkflowServiceError::CustomerNotFound);
        };
        self.customers
            .set_face_recognition(customer.id, &input.face_recognition_id)
            .await?;
        info!(customer_id = %customer.id, "face enrolled");

        let stage =
            advance_stage(&self.customers, customer.id, customer.stage, Stage::FaceEnrolled)
                .await?;
        // face_enrolled is never left standing: finish onboarding in the
        // same operation.
        if stage == Stage::FaceEnrolled {
            let entry = transition(stage);
            if entry.action == StageAction::SendOnboardingComplete {
                if !self
                    .messaging
                    .send_template(
                        &customer.phone,
                        Template::OnboardingComplete,
                        &[("name", customer.full_name.as_str())],
                    )
                    .await
                {
                    warn!(customer_id = %customer.id, "onboarding-complete send failed");
                }
                self.customers.set_returning_client(customer.id).await?;
            }
            if let Some(next) = entry.next {
                advance_stage(&self.customers, customer.id, stage, next).await?;
            }
        }
        Ok(())
    }
}
