//! Checklist items, always addressed through their owning task.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::json;

use super::tasks::load_task;
use super::{RouteIds, render};
use crate::error::AppError;
use crate::forms::{ChecklistForm, FieldErrors};
use crate::models::ChecklistItem;
use crate::state::AppState;
use crate::templates::{CHECKLIST_CONFIRM_DELETE, CHECKLIST_CONFIRM_TOGGLE, CHECKLIST_FORM};

fn task_url(task_id: i64) -> String {
    format!("/task/{task_id}/")
}

async fn load_item(
    state: &AppState,
    task_id: i64,
    item_id: i64,
) -> Result<ChecklistItem, AppError> {
    state
        .db
        .get_checklist_item(task_id, item_id)
        .await?
        .ok_or_else(|| AppError::not_found("Checklist item", item_id))
}

pub async fn create_form(
    State(state): State<AppState>,
    RouteIds(task_id): RouteIds<i64>,
) -> Result<Html<String>, AppError> {
    let task = load_task(&state, task_id).await?;
    render(
        &state,
        CHECKLIST_FORM,
        &json!({
            "task": task,
            "form": ChecklistForm::default(),
            "errors": FieldErrors::default(),
        }),
    )
}

/// The owning task comes from the route; any task field in the body is
/// ignored by the form type.
pub async fn create(
    State(state): State<AppState>,
    RouteIds(task_id): RouteIds<i64>,
    Form(form): Form<ChecklistForm>,
) -> Result<Response, AppError> {
    let task = load_task(&state, task_id).await?;

    match form.validate() {
        Ok(content) => {
            let item_id = state.db.create_checklist_item(task.id, &content).await?;
            tracing::info!(task_id = task.id, item_id, "Created checklist item");
            Ok(Redirect::to(&task_url(task.id)).into_response())
        }
        Err(errors) => {
            let html = render(
                &state,
                CHECKLIST_FORM,
                &json!({ "task": task, "form": form, "errors": errors }),
            )?;
            Ok(html.into_response())
        }
    }
}

/// Shows what a toggle would do. Never mutates.
pub async fn confirm_toggle(
    State(state): State<AppState>,
    RouteIds((task_id, item_id)): RouteIds<(i64, i64)>,
) -> Result<Html<String>, AppError> {
    let task = load_task(&state, task_id).await?;
    let item = load_item(&state, task_id, item_id).await?;
    render(
        &state,
        CHECKLIST_CONFIRM_TOGGLE,
        &json!({ "task": task, "item": item }),
    )
}

pub async fn toggle(
    State(state): State<AppState>,
    RouteIds((task_id, item_id)): RouteIds<(i64, i64)>,
) -> Result<Redirect, AppError> {
    if !state.db.toggle_checklist_item(task_id, item_id).await? {
        return Err(AppError::not_found("Checklist item", item_id));
    }
    tracing::info!(task_id, item_id, "Toggled checklist item");
    Ok(Redirect::to(&task_url(task_id)))
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    RouteIds((task_id, item_id)): RouteIds<(i64, i64)>,
) -> Result<Html<String>, AppError> {
    let task = load_task(&state, task_id).await?;
    let item = load_item(&state, task_id, item_id).await?;
    render(
        &state,
        CHECKLIST_CONFIRM_DELETE,
        &json!({ "task": task, "item": item }),
    )
}

pub async fn delete(
    State(state): State<AppState>,
    RouteIds((task_id, item_id)): RouteIds<(i64, i64)>,
) -> Result<Redirect, AppError> {
    if !state.db.delete_checklist_item(task_id, item_id).await? {
        return Err(AppError::not_found("Checklist item", item_id));
    }
    tracing::info!(task_id, item_id, "Deleted checklist item");
    Ok(Redirect::to(&task_url(task_id)))
}
