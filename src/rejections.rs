use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{html, Markup};

use crate::{names, views};

#[derive(Debug)]
pub enum AppError {
    Input(&'static str),
    NotFound,
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (code, error_page(message)).into_response()
    }
}

pub trait ResultExt<T> {
    /// Log the underlying error and answer with a 500.
    fn reject(self, message: &'static str) -> Result<T, AppError>;
    /// Log the underlying error and answer with a 400.
    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{message}: {e}");
            AppError::Input(message)
        })
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn error_page(message: &str) -> Markup {
    views::page(
        "Error",
        html! {
            h1 { (message) }
        },
        names::DEFAULT_LOCALE,
    )
}
