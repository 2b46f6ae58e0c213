use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use solara_domain::phone::normalize_phone;
use solara_domain::stage::{Stage, StageAction, transition};

use crate::domain::repository::{CustomerRepository, MessagingPort};
use crate::domain::types::{Customer, Template};
use crate::error::WorkflowServiceError;
use crate::usecase::advance_stage;

// ── HandleInboundMessage ─────────────────────────────────────────────────────

pub struct InboundMessageInput {
    pub phone: String,
    pub text: String,
}

pub struct HandleInboundMessageUseCase<C, M>
where
    C: CustomerRepository,
    M: MessagingPort,
{
    pub customers: C,
    pub messaging: M,
    pub checkout_url: String,
}

impl<C, M> HandleInboundMessageUseCase<C, M>
where
    C: CustomerRepository,
    M: MessagingPort,
{
    pub async fn execute(&self, input: InboundMessageInput) -> Result<(), WorkflowServiceError> {
        let phone = normalize_phone(&input.phone);

        let customer = match self.customers.find_by_phone(&phone).await? {
            Some(customer) => {
                self.customers.touch_last_message(customer.id).await?;
                customer
            }
            None => {
                let customer = new_lead(phone);
                self.customers.create(&customer).await?;
                info!(customer_id = %customer.id, "created customer from inbound contact");
                customer
            }
        };
        debug!(
            customer_id = %customer.id,
            stage = customer.stage.as_str(),
            text_len = input.text.len(),
            "inbound message"
        );

        let entry = transition(customer.stage);
        match entry.action {
            StageAction::SendPurchaseOptions => {
                let sent = self
                    .messaging
                    .send_template(
                        &customer.phone,
                        Template::PurchaseOptions,
                        &[
                            ("name", customer.full_name.as_str()),
                            ("checkout_url", self.checkout_url.as_str()),
                        ],
                    )
                    .await;
                if sent {
                    if let Some(next) = entry.next {
                        advance_stage(&self.customers, customer.id, customer.stage, next).await?;
                    }
                } else {
                    // Stage stays put so the next inbound message retries the nudge.
                    warn!(customer_id = %customer.id, "purchase-options send failed");
                }
            }
            _ => {
                debug!(
                    customer_id = %customer.id,
                    stage = customer.stage.as_str(),
                    "no pending action for stage"
                );
            }
        }
        Ok(())
    }
}

/// Customer created from an unsolicited inbound contact: placeholder
/// display name from the last 4 phone digits, opted in to messaging.
fn new_lead(phone: String) -> Customer {
    let now = Utc::now();
    let suffix = &phone[phone.len().saturating_sub(4)..];
    Customer {
        id: Uuid::now_v7(),
        full_name: format!("Guest {suffix}"),
        phone,
        stage: Stage::LeadInbound,
        wa_opt_in: true,
        last_message_at: Some(now),
        health_form_signed: false,
        face_recognition_id: None,
        is_new_client: true,
        created_at: now,
        updated_at: now,
    }
}
