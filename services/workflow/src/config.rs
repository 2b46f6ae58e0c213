/// Workflow service configuration loaded from environment variables.
#[derive(Debug)]
pub struct WorkflowConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3117). Env var: `WORKFLOW_PORT`.
    pub workflow_port: u16,
    /// Messaging gateway endpoint (e.g. "https://graph.facebook.com/v19.0/<phone-id>").
    pub wa_api_url: String,
    /// Messaging gateway bearer token.
    pub wa_access_token: String,
    /// Hosted checkout page sent in purchase-options messages.
    pub checkout_url: String,
    /// Health declaration form sent after payment.
    pub health_form_url: String,
    /// Face enrollment page sent after payment.
    pub face_registration_url: String,
}

impl WorkflowConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            workflow_port: std::env::var("WORKFLOW_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3117),
            wa_api_url: std::env::var("WA_API_URL").expect("WA_API_URL"),
            wa_access_token: std::env::var("WA_ACCESS_TOKEN").expect("WA_ACCESS_TOKEN"),
            checkout_url: std::env::var("CHECKOUT_URL").expect("CHECKOUT_URL"),
            health_form_url: std::env::var("HEALTH_FORM_URL").expect("HEALTH_FORM_URL"),
            face_registration_url: std::env::var("FACE_REGISTRATION_URL")
                .expect("FACE_REGISTRATION_URL"),
        }
    }
}
