use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use solara_core::health::{healthz, readyz};
use solara_core::middleware::request_id_layer;

use crate::handlers::{
    customers::get_customer,
    packages::{get_custom_tan, get_package, get_packages},
    webhooks::{face_enrollment_completed, health_form_completed, inbound_message, payment_result},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Webhooks (external event adapters)
        .route("/webhooks/messaging", post(inbound_message))
        .route("/webhooks/payment", post(payment_result))
        .route("/webhooks/health-form", post(health_form_completed))
        .route("/webhooks/face-enrollment", post(face_enrollment_completed))
        // Kiosk reads
        .route("/packages", get(get_packages))
        .route("/packages/custom-tan", get(get_custom_tan))
        .route("/packages/{id}", get(get_package))
        .route("/customers/{id}", get(get_customer))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
