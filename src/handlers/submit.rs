use axum::{
    Form,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use crate::error::AppError;
use crate::handlers::pages::render_home;
use crate::messages::{self, Kind, Notice};
use crate::metrics::{RATE_LIMITED, record_submission};
use crate::models::SubmissionForm;
use crate::sink::SinkError;
use crate::state::AppState;
use crate::validation::{Rejection, validate};

const FORWARDED_FOR: &str = "x-forwarded-for";
const UNKNOWN_CLIENT: &str = "0.0.0.0";

// First X-Forwarded-For hop when trusted, else the peer address
pub fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(first) = forwarded {
            return first.to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

// rate limit, validate, then hand the lead to the sink
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    // malformed bodies are rejected here and never count against the limit
    Form(form): Form<SubmissionForm>,
) -> Result<Response, AppError> {
    let client = client_id(&headers, Some(peer), state.trust_forwarded_for);

    if !state.rate_limiter.admit(&client) {
        RATE_LIMITED.inc();
        record_submission("rate_limited");
        tracing::warn!(client = %client, "Submission rate limit exceeded");
        return render_home(
            &state,
            StatusCode::TOO_MANY_REQUESTS,
            Some((Kind::Error, messages::RATE_LIMITED.to_string())),
        );
    }

    let lead = match validate(&form) {
        Ok(lead) => lead,
        Err(Rejection::Bot) => {
            record_submission("bot");
            tracing::info!(client = %client, "Honeypot filled, submission dropped");
            return Ok(see_other(Notice::Thanks));
        }
        Err(rejection) => {
            let (outcome, text) = match rejection {
                Rejection::MissingFields => ("missing_fields", messages::MISSING_FIELDS),
                _ => ("invalid_phone", messages::INVALID_PHONE),
            };
            record_submission(outcome);
            tracing::debug!(client = %client, reason = %rejection, "Submission rejected");
            return render_home(&state, StatusCode::UNPROCESSABLE_ENTITY, Some((Kind::Error, text.to_string())));
        }
    };

    let notice = match state.sink.record(&lead, &client).await {
        Ok(()) => {
            record_submission("accepted");
            tracing::info!(client = %client, "Lead accepted");
            Notice::Thanks
        }
        Err(SinkError::ConfigurationIncomplete) => {
            record_submission("mail_missing");
            Notice::MailMissing
        }
        Err(SinkError::DeliveryFailed(_)) => {
            record_submission("mail_failed");
            Notice::MailFailed
        }
        Err(SinkError::Persist(_)) => {
            record_submission("save_failed");
            Notice::SaveFailed
        }
    };

    Ok(see_other(notice))
}

fn see_other(notice: Notice) -> Response {
    Redirect::to(&notice.redirect_target()).into_response()
}
