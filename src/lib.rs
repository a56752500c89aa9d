//! Marketing site for an accounting office: service pages rendered from a
//! static catalog, and a contact form whose leads are rate limited, validated,
//! appended to a CSV file and emailed to the office.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod sink;
pub mod state;
pub mod templates;
pub mod validation;

pub use config::Args;
pub use routes::build_router;
pub use state::AppState;
