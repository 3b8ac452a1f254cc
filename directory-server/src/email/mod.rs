//! Email Module
//!
//! Notification delivery through the SendGrid v3 REST API (no SDK
//! dependency). Handlers hand a prebuilt payload to [`Mailer::deliver`],
//! which posts it on a background task; delivery failures are logged and
//! never surfaced to the caller.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::Config;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Contact-form submission addressed to the site operator
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact-form submission addressed to a member's author
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorContactForm {
    #[serde(rename = "authorEmail")]
    pub author_email: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_key: Option<String>,
    email_to: Option<String>,
    email_from: String,
    app_name: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.sendgrid_api_key.clone(),
            email_to: config.email_to.clone(),
            email_from: config.email_from.clone(),
            app_name: config.app_name.clone(),
        }
    }

    fn message_body(&self, form_name: &str, name: &str, email: &str, message: &str) -> (String, String) {
        let text = format!(
            "Email received from {form_name}\nSender name: {name}\nSender email: {email}\nSender message: {message}"
        );
        let html = format!(
            "<h4>Email received from {form_name}:</h4>\
             <p>Sender name: {name}</p>\
             <p>Sender email: {email}</p>\
             <p>Sender message: {message}</p>\
             <hr/>\
             <p>This email may contain sensitive information</p>\
             <p>{}</p>",
            self.app_name
        );
        (text, html)
    }

    fn payload(&self, to: Vec<&str>, from: &str, subject: &str, text: &str, html: &str) -> Value {
        json!({
            "personalizations": [{
                "to": to.iter().map(|addr| json!({"email": addr})).collect::<Vec<_>>(),
            }],
            "from": {"email": from},
            "subject": subject,
            "content": [
                {"type": "text/plain", "value": text},
                {"type": "text/html", "value": html},
            ],
        })
    }

    /// Mail for a site contact submission, addressed to the operator
    /// inbox. `None` when no operator inbox is configured.
    pub fn contact_email(&self, form: &ContactForm) -> Option<Value> {
        let to = self.email_to.as_deref()?;
        let subject = format!("Contact from - {}", self.app_name);
        let (text, html) =
            self.message_body("contact form", &form.name, &form.email, &form.message);
        Some(self.payload(vec![to], &form.email, &subject, &text, &html))
    }

    /// Mail for an author contact submission, addressed to the author and
    /// copied to the operator inbox when one is configured.
    pub fn author_email(&self, form: &AuthorContactForm) -> Value {
        let mut to = vec![form.author_email.as_str()];
        if let Some(operator) = self.email_to.as_deref() {
            to.push(operator);
        }
        let subject = format!("Someone messaged you from {}", self.app_name);
        let (text, html) =
            self.message_body("author contact form", &form.name, &form.email, &form.message);
        self.payload(to, &form.email, &subject, &text, &html)
    }

    /// Post the payload to SendGrid on a background task. The caller has
    /// already responded by the time delivery resolves; failures only
    /// reach the log.
    pub fn deliver(&self, payload: Value) {
        let Some(api_key) = self.api_key.clone() else {
            tracing::warn!("SENDGRID_API_KEY not set, skipping email delivery");
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            let result = client
                .post(SENDGRID_SEND_URL)
                .bearer_auth(api_key)
                .json(&payload)
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!("Notification email accepted by SendGrid");
                }
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    tracing::error!(%status, %body, "SendGrid rejected notification email");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to reach SendGrid");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn mailer(email_to: Option<&str>) -> Mailer {
        let mut config = Config::with_overrides("unused", 0, "test-secret-test-secret-test-secret!");
        config.email_to = email_to.map(String::from);
        config.app_name = "Member Directory".into();
        Mailer::new(&config)
    }

    #[test]
    fn contact_email_targets_operator_inbox() {
        let mailer = mailer(Some("ops@example.com"));
        let form = ContactForm {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            message: "Hello".into(),
        };
        let payload = mailer.contact_email(&form).unwrap();

        assert_eq!(
            payload["personalizations"][0]["to"][0]["email"],
            "ops@example.com"
        );
        assert_eq!(payload["from"]["email"], "jo@example.com");
        assert_eq!(payload["subject"], "Contact from - Member Directory");
        assert_eq!(payload["content"][0]["type"], "text/plain");
        assert!(
            payload["content"][1]["value"]
                .as_str()
                .unwrap()
                .contains("Sender name: Jo")
        );
    }

    #[test]
    fn contact_email_requires_operator_inbox() {
        let mailer = mailer(None);
        let form = ContactForm {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            message: "Hello".into(),
        };
        assert!(mailer.contact_email(&form).is_none());
    }

    #[test]
    fn author_email_copies_operator_inbox() {
        let mailer = mailer(Some("ops@example.com"));
        let form = AuthorContactForm {
            author_email: "author@example.com".into(),
            name: "Jo".into(),
            email: "jo@example.com".into(),
            message: "Hi there".into(),
        };
        let payload = mailer.author_email(&form);

        let to = payload["personalizations"][0]["to"].as_array().unwrap();
        assert_eq!(to.len(), 2);
        assert_eq!(to[0]["email"], "author@example.com");
        assert_eq!(to[1]["email"], "ops@example.com");
        assert_eq!(
            payload["subject"],
            "Someone messaged you from Member Directory"
        );
    }
}
