use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use crate::error::AppError;
use crate::messages::{Kind, Notice};
use crate::metrics::record_page_view;
use crate::state::AppState;
use crate::templates::{INDEX, NOT_FOUND, SERVICE};

#[derive(Deserialize)]
pub struct HomeQuery {
    notice: Option<String>,
}

// values every page template expects (menu + footer)
fn base_context(state: &AppState) -> Context {
    let mut ctx = Context::new();
    ctx.insert("services", state.catalog.services());
    ctx.insert("contact_phone", &state.contact_phone);
    ctx
}

// Home page with the contact form and an optional message above it
pub fn render_home(
    state: &AppState,
    status: StatusCode,
    message: Option<(Kind, String)>,
) -> Result<Response, AppError> {
    let mut ctx = base_context(state);
    if let Some((kind, text)) = message {
        ctx.insert("message", &text);
        ctx.insert("message_kind", &kind);
    }
    let html = state.templates.render(INDEX, &ctx)?;
    record_page_view("home");
    Ok((status, Html(html)).into_response())
}

pub fn render_not_found(state: &AppState) -> Response {
    match state.templates.render(NOT_FOUND, &base_context(state)) {
        Ok(html) => {
            record_page_view("not_found");
            (StatusCode::NOT_FOUND, Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!(error = ?e, "Failed to render 404 page");
            AppError::NotFound.into_response()
        }
    }
}

pub async fn home_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Result<Response, AppError> {
    // unknown codes are ignored, the page just renders without a message
    let message = query
        .notice
        .as_deref()
        .and_then(Notice::from_code)
        .map(|notice| (notice.kind(), notice.text(&state.contact_phone)));

    render_home(&state, StatusCode::OK, message)
}

pub async fn service_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(page) = state.catalog.get(&slug) else {
        tracing::debug!(slug = %slug, "Unknown service page");
        return Ok(render_not_found(&state));
    };

    let mut ctx = base_context(&state);
    ctx.insert("page", page);
    let html = state.templates.render(SERVICE, &ctx)?;
    record_page_view(&page.slug);
    Ok(Html(html).into_response())
}

pub async fn not_found_handler(State(state): State<Arc<AppState>>) -> Response {
    render_not_found(&state)
}
