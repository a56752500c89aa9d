use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use thiserror::Error;

// SMTPS; every other port gets plaintext + STARTTLS
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("failed to render message body: {0}")]
    Render(#[from] tera::Error),
}

// Formatted notification, ready for a transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundEmail {
    pub subject: String,
    pub html_body: String,
}

// Outbound channel for lead notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, email: OutboundEmail) -> Result<(), DeliveryError>;
}

// Complete SMTP settings (all required values present)
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub to: String,
    pub from_name: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("to", &self.to)
            .field("from_name", &self.from_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self, DeliveryError> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.user.clone(), settings.password.clone()))
            .timeout(Some(settings.timeout))
            .build();

        let from = Mailbox::new(Some(settings.from_name.clone()), settings.user.parse()?);
        let to: Mailbox = settings.to.parse()?;

        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn deliver(&self, email: OutboundEmail) -> Result<(), DeliveryError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(port: u16) -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".into(),
            port,
            user: "site@example.com".into(),
            password: "app-password".into(),
            to: "office@example.com".into(),
            from_name: "Website lead".into(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn builds_for_both_transport_modes() {
        assert!(SmtpNotifier::new(&settings(465)).is_ok());
        assert!(SmtpNotifier::new(&settings(587)).is_ok());
    }

    #[tokio::test]
    async fn bad_destination_address_is_rejected() {
        let mut s = settings(465);
        s.to = "not an address".into();
        assert!(matches!(SmtpNotifier::new(&s), Err(DeliveryError::Address(_))));
    }

    #[test]
    fn password_is_not_printed() {
        let printed = format!("{:?}", settings(465));
        assert!(!printed.contains("app-password"));
    }
}
