//! Dashboard errors and their HTML responses.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use gridpanel_state::{ServerId, StateError};
use gridpanel_view::ViewError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("server {0} not found")]
    ServerNotFound(ServerId),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("template error: {0}")]
    Render(#[from] askama::Error),

    #[error("script context error: {0}")]
    Script(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::ServerNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::View(_) => StatusCode::BAD_REQUEST,
            DashboardError::State(_) | DashboardError::Render(_) | DashboardError::Script(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text shown to the operator. Internal failures are not described.
    fn public_message(&self) -> String {
        match self {
            DashboardError::ServerNotFound(_) | DashboardError::View(_) => self.to_string(),
            _ => "An unexpected error was encountered while processing this request.".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    reason: &'static str,
    message: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "dashboard request failed");
        }

        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: self.public_message(),
        };
        let body = page.render().unwrap_or_else(|e| {
            format!("<pre>Template error: {e}</pre>")
        });
        (status, Html(body)).into_response()
    }
}
