use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::state::AppState;
use crate::templates::ERROR_PAGE;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Render(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the user. Server-side details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::NotFound { .. } => self.to_string(),
            Self::Render(_) | Self::Internal(_) => {
                "Something went wrong while handling this request.".to_string()
            }
        }
    }
}

/// Marker left on error responses so [`render_error_page`] can swap the
/// plain-text body for the HTML error page.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::NotFound { entity, id } => {
                tracing::debug!(entity = %entity, id = %id, "Not found");
            }
            Self::Render(_) | Self::Internal(_) => {
                tracing::error!(error = ?self, "Request failed");
            }
        }

        let message = self.public_message();
        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorPage { message });
        response
    }
}

/// Response middleware that renders error responses through the
/// `error` template. Falls back to the plain-text body if that fails.
pub async fn render_error_page(State(state): State<AppState>, response: Response) -> Response {
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let status = response.status();
    let context = json!({
        "reason": status.canonical_reason().unwrap_or("Error"),
        "status": status.as_u16(),
        "message": page.message,
    });

    match state.templates.render(ERROR_PAGE, &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render error page");
            response
        }
    }
}
