use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use crate::catalog::CatalogError;
use crate::sink::DeliveryError;

// plain page for when even the 404 template can't be rendered
const NOT_FOUND_FALLBACK: &str = "<!doctype html><html lang=\"he\" dir=\"rtl\"><meta charset=\"utf-8\"><title>404</title><h1>העמוד לא נמצא</h1></html>";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("page not found")]
    NotFound,

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_FALLBACK)).into_response(),
            AppError::Template(e) => {
                tracing::error!(error = ?e, "Failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

// Anything that stops the server from starting
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("service catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("templates: {0}")]
    Templates(#[from] tera::Error),

    #[error("mail transport: {0}")]
    Mail(#[from] DeliveryError),
}
