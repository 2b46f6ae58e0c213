use sea_orm::Database;
use tracing::info;

use solara_workflow::config::WorkflowConfig;
use solara_workflow::infra::whatsapp::WhatsAppClient;
use solara_workflow::router::build_router;
use solara_workflow::state::{AppState, OnboardingLinks};

#[tokio::main]
async fn main() {
    solara_core::tracing::init_tracing();

    let config = WorkflowConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let messaging = WhatsAppClient::new(&config.wa_api_url, &config.wa_access_token);

    let state = AppState {
        db,
        messaging,
        links: OnboardingLinks {
            checkout_url: config.checkout_url,
            health_form_url: config.health_form_url,
            face_registration_url: config.face_registration_url,
        },
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.workflow_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("workflow service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
