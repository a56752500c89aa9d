mod csv_log;
mod mailer;

pub use csv_log::{CsvLeadLog, StoreError};
pub use mailer::{DeliveryError, IMPLICIT_TLS_PORT, Notifier, OutboundEmail, SmtpNotifier, SmtpSettings};

use std::sync::Arc;
use tera::{Context, Tera};
use thiserror::Error;
use crate::models::{LeadRecord, NormalizedLead};
use crate::templates::LEAD_EMAIL;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("mail notification is enabled but its settings are incomplete")]
    ConfigurationIncomplete,

    #[error("lead notification failed: {0}")]
    DeliveryFailed(#[source] DeliveryError),

    #[error("lead could not be stored: {0}")]
    Persist(#[source] StoreError),
}

// How accepted leads are forwarded
pub enum Notification {
    Disabled,
    // enabled, but host/credentials/destination are missing
    Incomplete,
    Enabled(Arc<dyn Notifier>),
}

// stores every accepted lead, then mails it
pub struct LeadSink {
    log: Arc<CsvLeadLog>,
    notification: Notification,
    subject_template: String,
    templates: Arc<Tera>,
}

impl LeadSink {
    pub fn new(
        log: CsvLeadLog,
        notification: Notification,
        subject_template: impl Into<String>,
        templates: Arc<Tera>,
    ) -> Self {
        Self {
            log: Arc::new(log),
            notification,
            subject_template: subject_template.into(),
            templates,
        }
    }

    pub fn log(&self) -> &CsvLeadLog {
        &self.log
    }

    pub async fn record(&self, lead: &NormalizedLead, client_id: &str) -> Result<(), SinkError> {
        let stored = self.persist(LeadRecord::new(lead, client_id)).await;
        if let Err(e) = &stored {
            tracing::error!(client = %client_id, error = %e, "Failed to append lead to record log");
        }

        match self.notify(lead).await {
            Err(e) => Err(e),
            Ok(true) => Ok(()),
            Ok(false) => stored.map_err(SinkError::Persist),
        }
    }

    async fn persist(&self, record: LeadRecord) -> Result<(), StoreError> {
        let log = Arc::clone(&self.log);
        tokio::task::spawn_blocking(move || log.append(&record)).await?
    }

    // Ok(true) when a message went out, Ok(false) when mail is switched off
    async fn notify(&self, lead: &NormalizedLead) -> Result<bool, SinkError> {
        let notifier = match &self.notification {
            Notification::Disabled => return Ok(false),
            Notification::Incomplete => {
                tracing::warn!("SMTP settings missing (SMTP_USER/SMTP_PASS/TO_EMAIL), lead not emailed");
                return Err(SinkError::ConfigurationIncomplete);
            }
            Notification::Enabled(notifier) => notifier,
        };

        let email = self.format(lead).map_err(SinkError::DeliveryFailed)?;
        match notifier.deliver(email).await {
            Ok(()) => {
                tracing::info!("Lead notification sent");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Lead notification failed");
                Err(SinkError::DeliveryFailed(e))
            }
        }
    }

    pub fn format(&self, lead: &NormalizedLead) -> Result<OutboundEmail, DeliveryError> {
        let mut ctx = Context::new();
        ctx.insert("lead", lead);
        let html_body = self.templates.render(LEAD_EMAIL, &ctx)?;

        Ok(OutboundEmail {
            subject: self.subject_template.replace("{name}", &lead.full_name),
            html_body,
        })
    }
}
