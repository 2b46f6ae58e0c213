use serde::Serialize;
use tracing::warn;

use crate::domain::repository::MessagingPort;
use crate::domain::types::Template;

/// HTTP client for the messaging gateway's template-send endpoint
/// (WhatsApp Business Cloud API shape), implementing `MessagingPort`.
///
/// Delivery problems are logged and reported as `false`; callers decide
/// per use case whether a failed send blocks a stage advance.
#[derive(Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    api_url: String,
    access_token: String,
}

impl WhatsAppClient {
    pub fn new(api_url: &str, access_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        }
    }
}

#[derive(Serialize)]
struct TemplateSend<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    template: TemplateBody<'a>,
}

#[derive(Serialize)]
struct TemplateBody<'a> {
    name: &'a str,
    language: Language,
    components: [Component<'a>; 1],
}

#[derive(Serialize)]
struct Language {
    code: &'static str,
}

#[derive(Serialize)]
struct Component<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: Vec<Parameter<'a>>,
}

#[derive(Serialize)]
struct Parameter<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

impl MessagingPort for WhatsAppClient {
    async fn send_template(
        &self,
        phone: &str,
        template: Template,
        params: &[(&str, &str)],
    ) -> bool {
        let body = TemplateSend {
            messaging_product: "whatsapp",
            to: phone,
            kind: "template",
            template: TemplateBody {
                name: template.key(),
                language: Language { code: "he" },
                components: [Component {
                    kind: "body",
                    parameters: params
                        .iter()
                        .map(|&(_, value)| Parameter {
                            kind: "text",
                            text: value,
                        })
                        .collect(),
                }],
            },
        };

        let result = self
            .http
            .post(format!("{}/messages", self.api_url))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(
                    template = template.key(),
                    status = %resp.status(),
                    "template send rejected by gateway"
                );
                false
            }
            Err(e) => {
                warn!(template = template.key(), error = %e, "template send failed");
                false
            }
        }
    }
}
