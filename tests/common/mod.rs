//! Shared helpers for the site integration tests.

use async_trait::async_trait;
use lead_site::catalog::Catalog;
use lead_site::rate_limit::RateLimiter;
use lead_site::sink::{CsvLeadLog, DeliveryError, LeadSink, Notification, Notifier, OutboundEmail};
use lead_site::{AppState, build_router, templates};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

#[allow(dead_code)]
pub const CONTACT_PHONE: &str = "03-555-0100";
pub const SUBJECT: &str = "{name} — ליד חדש מהטופס באתר";

/// How the spawned site forwards leads.
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Mail {
    Disabled,
    Incomplete,
    Working,
    Failing,
}

/// Notifier that keeps messages in memory instead of sending them.
#[derive(Default)]
pub struct Outbox {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: bool,
}

impl Outbox {
    #[allow(dead_code)]
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for Outbox {
    async fn deliver(&self, email: OutboundEmail) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Render(tera::Error::msg("relay unavailable")));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub struct TestSite {
    pub addr: SocketAddr,
    pub leads: PathBuf,
    pub outbox: Arc<Outbox>,
    _dir: TempDir,
}

/// Start the site on an ephemeral port with its record log in a temp dir.
pub async fn spawn_site(mail: Mail) -> TestSite {
    let dir = tempfile::tempdir().unwrap();
    let leads = dir.path().join("leads.csv");
    let outbox = Arc::new(Outbox {
        fail: matches!(mail, Mail::Failing),
        ..Default::default()
    });

    let notification = match mail {
        Mail::Disabled => Notification::Disabled,
        Mail::Incomplete => Notification::Incomplete,
        Mail::Working | Mail::Failing => Notification::Enabled(outbox.clone()),
    };

    let templates = Arc::new(templates::load().unwrap());
    let state = Arc::new(AppState {
        rate_limiter: RateLimiter::default(),
        sink: LeadSink::new(CsvLeadLog::new(&leads), notification, SUBJECT, templates.clone()),
        catalog: Catalog::embedded().unwrap(),
        templates,
        trust_forwarded_for: true,
        contact_phone: CONTACT_PHONE.to_string(),
    });

    let static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
    let app = build_router(state, &static_dir);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .unwrap();
    });

    TestSite {
        addr,
        leads,
        outbox,
        _dir: dir,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[allow(dead_code)]
impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        client().get(self.url(path)).send().await.expect("site unreachable")
    }

    pub async fn submit(&self, client_ip: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        client()
            .post(self.url("/submit"))
            .header("x-forwarded-for", client_ip)
            .form(fields)
            .send()
            .await
            .expect("site unreachable")
    }

    /// Lines of the record log; empty when nothing was written.
    pub fn rows(&self) -> Vec<String> {
        std::fs::read_to_string(&self.leads)
            .map(|content| content.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}
