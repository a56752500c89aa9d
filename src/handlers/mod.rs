mod health;
mod metrics;
mod pages;
mod submit;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use pages::{home_handler, not_found_handler, service_handler};
pub use submit::{client_id, submit_handler};
