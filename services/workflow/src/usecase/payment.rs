use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use solara_domain::package::{CURRENCY, package_by_id};
use solara_domain::stage::{Stage, StageAction, transition};

use crate::domain::repository::{CustomerRepository, MessagingPort, PaymentLedger};
use crate::domain::types::{
    MembershipCredit, PaymentOutcome, PaymentTransaction, Template, TransactionKind,
    TransactionStatus,
};
use crate::error::WorkflowServiceError;
use crate::usecase::advance_stage;

// ── HandlePaymentSuccess ─────────────────────────────────────────────────────

pub struct PaymentSuccessInput {
    pub customer_id: Uuid,
    pub package_id: String,
    /// Payment gateway transaction id. Deliveries repeating an id that
    /// was already recorded are acknowledged without any effect.
    pub transaction_id: String,
    pub amount: Decimal,
}

pub struct HandlePaymentSuccessUseCase<C, L, M>
where
    C: CustomerRepository,
    L: PaymentLedger,
    M: MessagingPort,
{
    pub customers: C,
    pub ledger: L,
    pub messaging: M,
    pub health_form_url: String,
    pub face_registration_url: String,
}

impl<C, L, M> HandlePaymentSuccessUseCase<C, L, M>
where
    C: CustomerRepository,
    L: PaymentLedger,
    M: MessagingPort,
{
    pub async fn execute(
        &self,
        input: PaymentSuccessInput,
    ) -> Result<PaymentOutcome, WorkflowServiceError> {
        let Some(customer) = self.customers.find_by_id(input.customer_id).await? else {
            error!(customer_id = %input.customer_id, "payment for unknown customer rejected");
            return Err(WorkflowServiceError::CustomerNotFound);
        };
        let Some(package) = package_by_id(&input.package_id) else {
            error!(package_id = %input.package_id, "payment for unknown package rejected");
            return Err(WorkflowServiceError::PackageNotFound);
        };

        let txn = PaymentTransaction {
            id: Uuid::now_v7(),
            customer_id: customer.id,
            kind: TransactionKind::Membership,
            amount: input.amount,
            currency: CURRENCY.to_owned(),
            status: TransactionStatus::Completed,
            external_id: input.transaction_id,
            metadata: json!({ "package_id": package.id }),
            created_at: Utc::now(),
        };
        let credit = MembershipCredit {
            customer_id: customer.id,
            kind: package.kind,
            sessions: package.sessions as i32,
        };

        if self.ledger.record_payment(&txn, &credit).await? == PaymentOutcome::Duplicate {
            info!(external_id = %txn.external_id, "payment already recorded; skipping");
            return Ok(PaymentOutcome::Duplicate);
        }
        info!(
            customer_id = %customer.id,
            package_id = %package.id,
            sessions = package.sessions,
            "payment recorded"
        );

        // Confirmation is best-effort; the recorded payment does not
        // depend on it.
        if !self
            .messaging
            .send_template(
                &customer.phone,
                Template::PaymentSuccess,
                &[
                    ("name", customer.full_name.as_str()),
                    ("package", package.name_en.as_str()),
                ],
            )
            .await
        {
            warn!(customer_id = %customer.id, "payment confirmation send failed");
        }

        let stage =
            advance_stage(&self.customers, customer.id, customer.stage, Stage::PaymentSuccess)
                .await?;
        // payment_success is never left standing: run its table entry in
        // the same operation. Customers already past it (top-up purchase)
        // skip the onboarding links.
        if stage == Stage::PaymentSuccess {
            let entry = transition(stage);
            if entry.action == StageAction::SendOnboardingLinks {
                let links = [
                    (Template::HealthFormLink, self.health_form_url.as_str()),
                    (
                        Template::FaceRegistrationLink,
                        self.face_registration_url.as_str(),
                    ),
                ];
                for (template, url) in links {
                    if !self
                        .messaging
                        .send_template(
                            &customer.phone,
                            template,
                            &[("name", customer.full_name.as_str()), ("url", url)],
                        )
                        .await
                    {
                        warn!(
                            customer_id = %customer.id,
                            template = template.key(),
                            "onboarding link send failed"
                        );
                    }
                }
            }
            if let Some(next) = entry.next {
                advance_stage(&self.customers, customer.id, stage, next).await?;
            }
        }
        Ok(PaymentOutcome::Recorded)
    }
}
