use crate::config::{EmailConfig, ConfigError};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use std::path::Path;
use tracing::{error, info, instrument, warn};
use validator::ValidateEmail;

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),

    #[error("Attachment error: {0}")]
    AttachmentError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Image embedded in the HTML body and referenced as `cid:<content_id>`
#[derive(Debug, Clone, PartialEq)]
pub struct InlineAttachment {
    pub content_id: String,
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl InlineAttachment {
    /// Read an image from disk; the content type follows the file extension.
    pub fn from_file(path: impl AsRef<Path>, content_id: &str) -> Result<Self, EmailError> {
        let path = path.as_ref();
        let content = std::fs::read(path)
            .map_err(|e| EmailError::AttachmentError(format!("{}: {}", path.display(), e)))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let content_type = match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        };
        Ok(Self {
            content_id: content_id.to_string(),
            filename: format!("{}.{}", content_id, if extension.is_empty() { "bin" } else { &extension }),
            content_type: content_type.to_string(),
            content,
        })
    }
}

/// Email message builder
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub inline_attachments: Vec<InlineAttachment>,
}

impl EmailMessage {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            text_body: None,
            html_body: None,
            inline_attachments: Vec::new(),
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }

    pub fn with_inline_attachment(mut self, attachment: InlineAttachment) -> Self {
        self.inline_attachments.push(attachment);
        self
    }
}

/// Outbound email transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        // Configure TLS settings
        if config.use_tls {
            let tls_parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            if config.use_starttls {
                transport_builder = transport_builder.tls(Tls::Required(tls_parameters));
            } else {
                transport_builder = transport_builder.tls(Tls::Wrapper(tls_parameters));
            }
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );
        transport_builder = transport_builder.credentials(credentials);

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Build a lettre Message from EmailMessage
    pub fn build_message(&self, email_message: EmailMessage) -> Result<Message, EmailError> {
        let from_mailbox: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;

        let to_mailbox: Mailbox = email_message.to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let message_builder = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&email_message.subject);

        let body = match (email_message.text_body, email_message.html_body) {
            (Some(text), Some(html)) => MultiPart::alternative()
                .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(text))
                .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html)),
            (Some(text), None) => {
                // Inline images make no sense without HTML, send plain text as is.
                if !email_message.inline_attachments.is_empty() {
                    warn!("Dropping inline attachments from a text-only message");
                }
                return message_builder
                    .header(ContentType::TEXT_PLAIN)
                    .body(text)
                    .map_err(|e| EmailError::MessageError(format!("Failed to build text message: {}", e)));
            }
            (None, Some(html)) => MultiPart::alternative()
                .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html)),
            (None, None) => {
                return Err(EmailError::MessageError("No message body provided".to_string()));
            }
        };

        if email_message.inline_attachments.is_empty() {
            return message_builder
                .multipart(body)
                .map_err(|e| EmailError::MessageError(format!("Failed to build multipart message: {}", e)));
        }

        // multipart/related keeps cid: references resolvable from the HTML part
        let mut related = MultiPart::related().multipart(body);
        for attachment in email_message.inline_attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| EmailError::AttachmentError(format!("Invalid content type {}: {}", attachment.content_type, e)))?;
            related = related.singlepart(
                Attachment::new_inline(attachment.content_id).body(attachment.content, content_type),
            );
        }

        message_builder
            .multipart(related)
            .map_err(|e| EmailError::MessageError(format!("Failed to build related message: {}", e)))
    }

    /// Validate email address format
    fn validate_email_address(&self, email: &str) -> Result<(), EmailError> {
        if email.is_empty() {
            return Err(EmailError::AddressError("Email address cannot be empty".to_string()));
        }

        if !email.validate_email() {
            return Err(EmailError::AddressError(format!("Invalid email format: {}", email)));
        }

        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpEmailService {
    /// Send an email message
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!("Sending email to: {}", message.to);

        self.validate_email_address(&message.to)?;

        let email_message = self.build_message(message)?;

        self.transport
            .send(email_message)
            .await
            .map_err(|e| {
                error!("Failed to send email: {}", e);
                EmailError::SmtpError(format!("Failed to send email: {}", e))
            })?;

        info!("Email sent successfully");
        Ok(())
    }
}
