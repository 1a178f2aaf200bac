use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use serde_json::json;

use super::{RouteIds, render};
use crate::error::AppError;
use crate::forms::{FieldErrors, TaskForm};
use crate::models::Task;
use crate::pagination::{PageQuery, PageWindow};
use crate::state::AppState;
use crate::templates::{
    TASK_CONFIRM_DELETE, TASK_DETAIL, TASK_FORM, TASK_LIST, TASK_PREVIOUS_LIST,
};

pub(crate) async fn load_task(state: &AppState, task_id: i64) -> Result<Task, AppError> {
    state
        .db
        .get_task(task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id))
}

/// Tasks due now or later, soonest first.
pub async fn upcoming(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let now = Utc::now();
    let total = state.db.count_upcoming(now).await?;
    let window = PageWindow::new(query.requested(), total);
    let tasks = state
        .db
        .upcoming_tasks(now, window.limit(), window.offset())
        .await?;

    render(&state, TASK_LIST, &json!({ "page": window.into_page(tasks) }))
}

/// Tasks whose due time has passed, oldest first.
pub async fn previous(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let now = Utc::now();
    let total = state.db.count_previous(now).await?;
    let window = PageWindow::new(query.requested(), total);
    let tasks = state
        .db
        .previous_tasks(now, window.limit(), window.offset())
        .await?;

    render(
        &state,
        TASK_PREVIOUS_LIST,
        &json!({ "page": window.into_page(tasks) }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(
        &state,
        TASK_FORM,
        &json!({ "form": TaskForm::default(), "errors": FieldErrors::default() }),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Response, AppError> {
    match form.validate() {
        Ok(new_task) => {
            let task_id = state.db.create_task(&new_task).await?;
            tracing::info!(task_id, due = %new_task.due, "Created task");
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            tracing::debug!(?errors, "Rejected task form");
            let html = render(&state, TASK_FORM, &json!({ "form": form, "errors": errors }))?;
            Ok(html.into_response())
        }
    }
}

pub async fn detail(
    State(state): State<AppState>,
    RouteIds(task_id): RouteIds<i64>,
) -> Result<Html<String>, AppError> {
    let task = load_task(&state, task_id).await?;
    let checklist = state.db.checklist_for_task(task_id).await?;

    render(
        &state,
        TASK_DETAIL,
        &json!({ "task": task, "checklist": checklist }),
    )
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    RouteIds(task_id): RouteIds<i64>,
) -> Result<Html<String>, AppError> {
    let task = load_task(&state, task_id).await?;
    render(&state, TASK_CONFIRM_DELETE, &json!({ "task": task }))
}

pub async fn delete(
    State(state): State<AppState>,
    RouteIds(task_id): RouteIds<i64>,
) -> Result<Redirect, AppError> {
    if !state.db.delete_task(task_id).await? {
        return Err(AppError::not_found("Task", task_id));
    }
    tracing::info!(task_id, "Deleted task");
    Ok(Redirect::to("/"))
}
