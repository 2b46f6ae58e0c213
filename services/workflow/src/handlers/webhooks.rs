use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::WorkflowServiceError;
use crate::state::AppState;
use crate::usecase::inbound::{HandleInboundMessageUseCase, InboundMessageInput};
use crate::usecase::onboarding::{
    CompleteFaceEnrollmentUseCase, CompleteHealthFormUseCase, FaceEnrollmentInput,
};
use crate::usecase::payment::{HandlePaymentSuccessUseCase, PaymentSuccessInput};

// ── POST /webhooks/messaging ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct InboundMessageRequest {
    pub phone: String,
    pub text: String,
}

pub async fn inbound_message(
    State(state): State<AppState>,
    Json(body): Json<InboundMessageRequest>,
) -> Result<StatusCode, WorkflowServiceError> {
    let usecase = HandleInboundMessageUseCase {
        customers: state.customer_repo(),
        messaging: state.messaging.clone(),
        checkout_url: state.links.checkout_url.clone(),
    };
    usecase
        .execute(InboundMessageInput {
            phone: body.phone,
            text: body.text,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /webhooks/payment ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PaymentWebhookRequest {
    pub customer_id: Uuid,
    pub package_id: String,
    pub transaction_id: String,
    pub amount: Decimal,
}

pub async fn payment_result(
    State(state): State<AppState>,
    Json(body): Json<PaymentWebhookRequest>,
) -> Result<StatusCode, WorkflowServiceError> {
    let usecase = HandlePaymentSuccessUseCase {
        customers: state.customer_repo(),
        ledger: state.payment_ledger(),
        messaging: state.messaging.clone(),
        health_form_url: state.links.health_form_url.clone(),
        face_registration_url: state.links.face_registration_url.clone(),
    };
    // Duplicate deliveries are acknowledged like first deliveries so the
    // gateway stops retrying.
    usecase
        .execute(PaymentSuccessInput {
            customer_id: body.customer_id,
            package_id: body.package_id,
            transaction_id: body.transaction_id,
            amount: body.amount,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /webhooks/health-form ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct HealthFormWebhookRequest {
    pub customer_id: Uuid,
}

pub async fn health_form_completed(
    State(state): State<AppState>,
    Json(body): Json<HealthFormWebhookRequest>,
) -> Result<StatusCode, WorkflowServiceError> {
    let usecase = CompleteHealthFormUseCase {
        customers: state.customer_repo(),
    };
    usecase.execute(body.customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /webhooks/face-enrollment ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct FaceEnrollmentWebhookRequest {
    pub customer_id: Uuid,
    pub face_id: String,
}

pub async fn face_enrollment_completed(
    State(state): State<AppState>,
    Json(body): Json<FaceEnrollmentWebhookRequest>,
) -> Result<StatusCode, WorkflowServiceError> {
    let usecase = CompleteFaceEnrollmentUseCase {
        customers: state.customer_repo(),
        messaging: state.messaging.clone(),
    };
    usecase
        .execute(FaceEnrollmentInput {
            customer_id: body.customer_id,
            face_recognition_id: body.face_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
