use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use uuid::Uuid;

use solara_domain::package::ServiceKind;
use solara_domain::stage::Stage;

use crate::domain::types::{Customer, Membership};
use crate::error::WorkflowServiceError;
use crate::state::AppState;
use crate::usecase::status::GetCustomerStatusUseCase;

// ── GET /customers/{id} ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MembershipResponse {
    pub kind: ServiceKind,
    pub balance: i32,
    pub total_purchased: i32,
    #[serde(serialize_with = "solara_core::serde::to_rfc3339_ms")]
    pub expiry_date: chrono::DateTime<chrono::Utc>,
    pub is_active: bool,
}

#[derive(Serialize)]
pub struct CustomerStatusResponse {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub stage: Stage,
    pub wa_opt_in: bool,
    pub health_form_signed: bool,
    /// Whether a biometric template is on file; the external id itself
    /// is never exposed.
    pub face_enrolled: bool,
    pub is_new_client: bool,
    #[serde(serialize_with = "solara_core::serde::to_rfc3339_ms_opt")]
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "solara_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub memberships: Vec<MembershipResponse>,
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerStatusResponse>, WorkflowServiceError> {
    let usecase = GetCustomerStatusUseCase {
        customers: state.customer_repo(),
        memberships: state.membership_repo(),
    };
    let status = usecase.execute(id).await?;
    Ok(Json(status_response(status.customer, status.memberships)))
}

fn status_response(customer: Customer, memberships: Vec<Membership>) -> CustomerStatusResponse {
    CustomerStatusResponse {
        id: customer.id.to_string(),
        full_name: customer.full_name,
        phone: customer.phone,
        stage: customer.stage,
        wa_opt_in: customer.wa_opt_in,
        health_form_signed: customer.health_form_signed,
        face_enrolled: customer.face_recognition_id.is_some(),
        is_new_client: customer.is_new_client,
        last_message_at: customer.last_message_at,
        created_at: customer.created_at,
        memberships: memberships
            .into_iter()
            .map(|m| MembershipResponse {
                kind: m.kind,
                balance: m.balance,
                total_purchased: m.total_purchased,
                expiry_date: m.expiry_date,
                is_active: m.is_active,
            })
            .collect(),
    }
}
