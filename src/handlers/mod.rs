use axum::Json;
use axum::extract::{FromRequestParts, Path};
use axum::http::Uri;
use axum::http::request::Parts;
use axum::response::Html;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;

pub mod checklist;
pub mod tasks;

/// Route identifiers. A segment that does not parse is a missing page,
/// not a bad request.
pub struct RouteIds<T>(pub T);

impl<S, T> FromRequestParts<S> for RouteIds<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(ids)) => Ok(Self(ids)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Unparseable route identifier");
                Err(AppError::not_found("Page", parts.uri.path()))
            }
        }
    }
}

pub(crate) fn render<T: Serialize>(
    state: &AppState,
    template: &str,
    context: &T,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render(template, context)?))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found("Page", uri.path())
}
