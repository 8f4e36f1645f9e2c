use profills_backend::config::EmailConfig;
use profills_backend::util::email::{EmailError, EmailMessage, InlineAttachment, Mailer, SmtpEmailService};

/// Initialize tracing for tests
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();
}

/// Create test email config
fn create_test_config() -> EmailConfig {
    EmailConfig::from_test_env()
}

/// Create test email service
fn create_test_service() -> SmtpEmailService {
    let config = create_test_config();
    SmtpEmailService::new(config).expect("Failed to create test email service")
}

fn logo() -> InlineAttachment {
    InlineAttachment {
        content_id: "logo".to_string(),
        filename: "logo.png".to_string(),
        content_type: "image/png".to_string(),
        content: vec![0x89, b'P', b'N', b'G'],
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_email_service_creation() {
        init_tracing();
        let service = create_test_service();
        assert_eq!(service.config.smtp_host, "localhost");
        assert_eq!(service.config.smtp_port, 1025);
    }

    #[test]
    fn test_email_message_with_bodies() {
        let message = EmailMessage::new(
            "vendas@example.com".to_string(),
            "Nova Cotação: Linha Speed - Maria Oliveira".to_string(),
        )
        .with_text_body("Text body content".to_string())
        .with_html_body("<h1>HTML body content</h1>".to_string())
        .with_inline_attachment(logo());

        assert_eq!(message.text_body.as_deref(), Some("Text body content"));
        assert_eq!(message.html_body.as_deref(), Some("<h1>HTML body content</h1>"));
        assert_eq!(message.inline_attachments.len(), 1);
    }

    #[tokio::test]
    async fn test_build_message_with_inline_logo() {
        let service = create_test_service();
        let message = EmailMessage::new("vendas@example.com".to_string(), "Nova Cotação".to_string())
            .with_text_body("texto".to_string())
            .with_html_body("<img src=\"cid:logo\">".to_string())
            .with_inline_attachment(logo());

        let built = service.build_message(message).expect("message should build");
        let raw = String::from_utf8_lossy(&built.formatted()).to_string();
        assert!(raw.contains("multipart/related"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("Content-ID: <logo>"));
        assert!(raw.contains("<site@example.com>"));
    }

    #[tokio::test]
    async fn test_build_message_without_attachments() {
        let service = create_test_service();
        let message = EmailMessage::new("vendas@example.com".to_string(), "Nova Cotação".to_string())
            .with_text_body("texto".to_string())
            .with_html_body("<p>html</p>".to_string());

        let raw = String::from_utf8_lossy(&service.build_message(message).unwrap().formatted()).to_string();
        assert!(raw.contains("multipart/alternative"));
        assert!(!raw.contains("multipart/related"));
    }

    #[test]
    fn test_inline_attachment_missing_file() {
        let result = InlineAttachment::from_file("does/not/exist.png", "logo");
        assert!(matches!(result, Err(EmailError::AttachmentError(_))));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_email_error_types() {
        let errors = vec![
            EmailError::ConfigError("Config error".to_string()),
            EmailError::SmtpError("SMTP error".to_string()),
            EmailError::MessageError("Message error".to_string()),
            EmailError::AddressError("Address error".to_string()),
            EmailError::AttachmentError("Attachment error".to_string()),
        ];

        for error in errors {
            let display = format!("{}", error);
            let debug = format!("{:?}", error);

            assert!(!display.is_empty());
            assert!(!debug.is_empty());
        }
    }

    #[test]
    fn test_invalid_config_creation() {
        let mut config = create_test_config();
        config.smtp_host = "".to_string();

        let result = SmtpEmailService::new(config);
        assert!(result.is_err());
        if let Err(error) = result {
            assert!(matches!(error, EmailError::ConfigError(_)));
        }
    }

    #[tokio::test]
    async fn test_build_message_without_body() {
        let service = create_test_service();
        let message = EmailMessage::new("vendas@example.com".to_string(), "Vazio".to_string());
        assert!(matches!(service.build_message(message), Err(EmailError::MessageError(_))));
    }

    #[tokio::test]
    async fn test_send_to_invalid_address() {
        let service = create_test_service();
        let message = EmailMessage::new("not-an-address".to_string(), "Nova Cotação".to_string())
            .with_text_body("texto".to_string());
        assert!(matches!(service.send_email(message).await, Err(EmailError::AddressError(_))));
    }

    #[tokio::test]
    async fn test_send_to_malformed_domain() {
        let service = create_test_service();
        for to in ["vendas@exa mple.com", "vendas@@example.com"] {
            let message = EmailMessage::new(to.to_string(), "Nova Cotação".to_string())
                .with_text_body("texto".to_string());
            assert!(matches!(service.send_email(message).await, Err(EmailError::AddressError(_))), "{}", to);
        }
    }
}

/// Needs an SMTP server on localhost:1025, e.g. MailHog.
#[tokio::test]
#[ignore]
async fn test_send_through_local_smtp() {
    init_tracing();
    let service = create_test_service();
    let message = EmailMessage::new("vendas@example.com".to_string(), "Nova Cotação: teste".to_string())
        .with_text_body("texto".to_string())
        .with_html_body("<p>html</p>".to_string());
    service.send_email(message).await.expect("send through local SMTP");
}
