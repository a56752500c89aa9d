use std::sync::Arc;
use tera::Tera;
use crate::catalog::Catalog;
use crate::config::{Args, MailSetup};
use crate::error::StartupError;
use crate::rate_limit::RateLimiter;
use crate::sink::{CsvLeadLog, LeadSink, Notification, SmtpNotifier};
use crate::templates;
// app's shared state

pub struct AppState {
    pub rate_limiter: RateLimiter,
    pub sink: LeadSink,
    pub catalog: Catalog,
    pub templates: Arc<Tera>,
    pub trust_forwarded_for: bool, // take the client id from X-Forwarded-For
    pub contact_phone: String,
}

impl AppState {
    pub fn from_args(args: &Args) -> Result<Arc<Self>, StartupError> {
        let catalog = match &args.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::embedded()?,
        };
        let templates = Arc::new(templates::load()?);

        let notification = match args.mail_setup() {
            MailSetup::Disabled => {
                tracing::info!("Lead emails disabled (SEND_MAIL=false)");
                Notification::Disabled
            }
            MailSetup::Incomplete { missing } => {
                tracing::warn!(missing = ?missing, "SMTP settings missing, leads will only be stored");
                Notification::Incomplete
            }
            MailSetup::Ready(settings) => {
                tracing::info!(
                    host = %settings.host,
                    port = settings.port,
                    to = %settings.to,
                    "Lead emails enabled"
                );
                Notification::Enabled(Arc::new(SmtpNotifier::new(&settings)?))
            }
        };

        let sink = LeadSink::new(
            CsvLeadLog::new(&args.leads_file),
            notification,
            args.subject.clone(),
            Arc::clone(&templates),
        );

        Ok(Arc::new(Self {
            rate_limiter: RateLimiter::new(args.rate_limit_config()),
            sink,
            catalog,
            templates,
            trust_forwarded_for: args.trust_forwarded_for,
            contact_phone: args.contact_phone.clone(),
        }))
    }
}
