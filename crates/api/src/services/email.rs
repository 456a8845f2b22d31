//! Email service for delivering QR codes to invitees.
//!
//! Supports multiple email providers:
//! - `console`: Logs emails to console (development)
//! - `smtp`: Sends via SMTP server (lettre)
//! - `resend`: Uses the Resend HTTP API

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::EmailConfig;

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Binary attachment on an outgoing message.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Recipient name (optional)
    pub to_name: Option<String>,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
    /// HTML body (optional)
    pub body_html: Option<String>,
    /// Attachments (QR PNG, ticket PDF)
    pub attachments: Vec<EmailAttachment>,
}

/// Email service for sending transactional mail.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    http: reqwest::Client,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }

    /// Check if email service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "smtp" => self.send_smtp(message).await,
            "resend" => self.send_resend(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Send the QR code to a newly registered guest.
    pub async fn send_guest_code(
        &self,
        to_email: &str,
        first_name: &str,
        verify_url: &str,
        qr_png: Vec<u8>,
    ) -> Result<(), EmailError> {
        let subject = "Your graduation ceremony entry code";

        let body_text = format!(
            r#"Hi {name},

You have been registered as a guest for the graduation ceremony.

Your personal entry QR code is attached. Present it at the entrance;
it is valid for a single scan.

If the image does not load, this link encodes the same code:
{url}

Best regards,
The Graduation Office"#,
            name = first_name,
            url = verify_url
        );

        let body_html = Some(format!(
            r#"<p>Hi {name},</p>
<p>You have been registered as a guest for the graduation ceremony.</p>
<p>Your personal entry QR code is attached. Present it at the entrance;
it is valid for a <strong>single</strong> scan.</p>
<p style="color:#666;font-size:13px">If the image does not load, this link
encodes the same code:<br><a href="{url}">{url}</a></p>
<p>Best regards,<br>The Graduation Office</p>"#,
            name = first_name,
            url = verify_url
        ));

        self.send(EmailMessage {
            to: to_email.to_string(),
            to_name: Some(first_name.to_string()),
            subject: subject.to_string(),
            body_text,
            body_html,
            attachments: vec![EmailAttachment {
                filename: "entry-code.png".to_string(),
                content_type: "image/png".to_string(),
                data: qr_png,
            }],
        })
        .await
    }

    /// Send the entry ticket PDF to a newly registered graduate.
    pub async fn send_graduate_ticket(
        &self,
        to_email: &str,
        name: &str,
        ticket_pdf: Vec<u8>,
    ) -> Result<(), EmailError> {
        let subject = "Your graduation ceremony ticket";

        let body_text = format!(
            r#"Hi {name},

Congratulations! Your graduation registration is confirmed.

Your entry ticket is attached as a PDF. It contains your personal QR
code; present it at the entrance. The code is valid for a single scan.

Best regards,
The Graduation Office"#,
            name = name
        );

        let body_html = Some(format!(
            r#"<p>Hi {name},</p>
<p>Congratulations! Your graduation registration is confirmed.</p>
<p>Your entry ticket is attached as a PDF. It contains your personal QR
code; present it at the entrance. The code is valid for a
<strong>single</strong> scan.</p>
<p>Best regards,<br>The Graduation Office</p>"#,
            name = name
        ));

        self.send(EmailMessage {
            to: to_email.to_string(),
            to_name: Some(name.to_string()),
            subject: subject.to_string(),
            body_text,
            body_html,
            attachments: vec![EmailAttachment {
                filename: "graduation-ticket.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                data: ticket_pdf,
            }],
        })
        .await
    }

    /// Console provider: log the message instead of sending it.
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            attachments = message.attachments.len(),
            "EMAIL (console provider)"
        );
        info!("Body:\n{}", message.body_text);
        Ok(())
    }

    /// SMTP provider via lettre.
    async fn send_smtp(&self, message: EmailMessage) -> Result<(), EmailError> {
        use lettre::message::header::ContentType;
        use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
        use lettre::transport::smtp::authentication::Credentials;
        use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

        let from: Mailbox = format!("{} <{}>", self.config.sender_name, self.config.sender_email)
            .parse()
            .map_err(|_| EmailError::InvalidAddress(self.config.sender_email.clone()))?;
        let to: Mailbox = match &message.to_name {
            Some(name) => format!("{} <{}>", name, message.to),
            None => message.to.clone(),
        }
        .parse()
        .map_err(|_| EmailError::InvalidAddress(message.to.clone()))?;

        let body = match &message.body_html {
            Some(html) => MultiPart::alternative_plain_html(message.body_text.clone(), html.clone()),
            None => MultiPart::mixed().singlepart(SinglePart::plain(message.body_text.clone())),
        };

        let mut multipart = MultiPart::mixed().multipart(body);
        for attachment in &message.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| EmailError::ProviderError(e.to_string()))?;
            multipart = multipart.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.data.clone(), content_type),
            );
        }

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .multipart(multipart)
            .map_err(|e| EmailError::ProviderError(e.to_string()))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
                .map_err(|e| EmailError::ProviderError(e.to_string()))?
                .port(self.config.smtp_port);

        if !self.config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            ));
        }

        let transport = builder.build();
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        info!(to = %message.to, subject = %message.subject, "Email sent via SMTP");
        Ok(())
    }

    /// Resend provider via the HTTP API.
    async fn send_resend(&self, message: EmailMessage) -> Result<(), EmailError> {
        let attachments: Vec<serde_json::Value> = message
            .attachments
            .iter()
            .map(|a| {
                serde_json::json!({
                    "filename": a.filename,
                    "content": BASE64.encode(&a.data),
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "from": format!("{} <{}>", self.config.sender_name, self.config.sender_email),
            "to": [message.to.clone()],
            "subject": message.subject,
            "text": message.body_text,
            "attachments": attachments,
        });
        if let Some(html) = &message.body_html {
            body["html"] = serde_json::Value::String(html.clone());
        }

        let response = self
            .http
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.config.resend_api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(EmailError::SendFailed(format!("{}: {}", status, detail)));
        }

        info!(to = %message.to, subject = %message.subject, "Email sent via Resend");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_message() -> EmailMessage {
        EmailMessage {
            to: "guest@example.edu".to_string(),
            to_name: Some("Jane".to_string()),
            subject: "Test".to_string(),
            body_text: "Hello".to_string(),
            body_html: None,
            attachments: vec![],
        }
    }

    #[tokio::test]
    async fn test_disabled_service_skips_send() {
        let service = EmailService::new(EmailConfig::default());
        assert!(!service.is_enabled());
        assert!(service.send(test_message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_console_provider_succeeds() {
        let config = EmailConfig {
            enabled: true,
            provider: "console".to_string(),
            ..EmailConfig::default()
        };
        let service = EmailService::new(config);
        assert!(service.send(test_message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = EmailConfig {
            enabled: true,
            provider: "pigeon".to_string(),
            ..EmailConfig::default()
        };
        let service = EmailService::new(config);
        assert!(matches!(
            service.send(test_message()).await,
            Err(EmailError::NotConfigured)
        ));
    }

    #[test]
    fn test_attachment_clone() {
        let attachment = EmailAttachment {
            filename: "entry-code.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        assert_eq!(attachment.clone().data, vec![1, 2, 3]);
    }
}
