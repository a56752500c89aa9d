use lazy_static::lazy_static;
use prometheus::{
    Counter, Gauge, IntCounterVec, register_counter, register_gauge, register_int_counter_vec,
};


lazy_static! {
    pub static ref SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "lead_site_submissions_total",
        "Contact form submissions by outcome",
        &["outcome"]
    )
    .unwrap();
    pub static ref PAGE_VIEWS: IntCounterVec = register_int_counter_vec!(
        "lead_site_page_views_total",
        "Rendered pages by page name",
        &["page"]
    )
    .unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("lead_site_rate_limited_total", "Submissions rejected by the rate limiter").unwrap();
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("lead_site_tracked_clients", "Clients currently held by the rate limiter").unwrap();
}

pub fn record_submission(outcome: &str) {
    SUBMISSIONS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_page_view(page: &str) {
    PAGE_VIEWS.with_label_values(&[page]).inc();
}
