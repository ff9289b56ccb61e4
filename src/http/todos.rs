//! The seven todo endpoints.
//!
//! Each handler validates and coerces its input into a typed command,
//! runs the store operation, and translates any failure into the response
//! envelope. Nothing propagates past a handler.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::http::auth::AuthUser;
use crate::http::response::{ApiError, Success};
use crate::http::AppState;
use crate::pagination::{PageParams, Pagination};
use crate::query::{self, FilterOutcome, ListParams, SortSpec};
use crate::stats::TaskStats;
use crate::task::{parse_task_id, AddNote, CreateTask, Note, Task, TaskChanges, UpdateTask};
use crate::view::TaskView;

/// GET /api/todos
pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Success<Vec<TaskView>>, ApiError> {
    let pages = PageParams::from_raw(params.page.as_deref(), params.limit.as_deref());

    let filter = match query::build_filter(&user.id, &params, &state.store) {
        FilterOutcome::Filter(filter) => filter,
        // Unknown mention username: empty result, store never queried
        FilterOutcome::NoMatch => {
            return Ok(Success::data(Vec::new()).with_pagination(Pagination::empty(pages)));
        }
    };

    let sort = SortSpec::from_params(&params);
    let total = state.store.count_tasks(&filter);
    let tasks = state.store.find_tasks(&filter, &sort, pages);
    let data = tasks
        .iter()
        .map(|task| TaskView::resolve(task, &state.store))
        .collect();

    Ok(Success::data(data).with_pagination(Pagination::new(pages, total)))
}

/// GET /api/todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> Result<Success<TaskView>, ApiError> {
    let id = parse_task_id(&id).map_err(|err| ApiError::read("Error fetching todo", err))?;
    let task = state
        .store
        .find_task(&id)
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;
    Ok(Success::data(TaskView::resolve(&task, &state.store)))
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(command): Json<CreateTask>,
) -> Result<Success<TaskView>, ApiError> {
    command
        .validate()
        .map_err(|err| ApiError::write("Error creating todo", err))?;

    // Unknown mention usernames are silently dropped on create
    let mention_ids = match &command.mentions {
        Some(usernames) if !usernames.is_empty() => state.store.resolve_mentions(usernames).0,
        _ => Vec::new(),
    };

    let task = Task::create(&user.id, &command, mention_ids);
    let task = state
        .store
        .insert_task(task)
        .map_err(|err| ApiError::write("Error creating todo", err))?;

    Ok(Success::data(TaskView::resolve(&task, &state.store))
        .with_status(StatusCode::CREATED)
        .with_message("Todo created successfully"))
}

/// PUT /api/todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(command): Json<UpdateTask>,
) -> Result<Success<TaskView>, ApiError> {
    let id = parse_task_id(&id).map_err(|err| ApiError::write("Error updating todo", err))?;
    command
        .validate()
        .map_err(|err| ApiError::write("Error updating todo", err))?;

    let mut changes = TaskChanges {
        title: command.title.clone(),
        description: command.description.clone(),
        priority: command.priority(),
        tags: command.tags.clone(),
        mentions: None,
        completed: command.completed,
    };

    if let Some(usernames) = &command.mentions {
        if usernames.is_empty() {
            // Present-but-empty clears all mentions
            changes.mentions = Some(Vec::new());
        } else {
            let (resolved, unresolved) = state.store.resolve_mentions(usernames);
            if !unresolved.is_empty() {
                // Tolerated: the update proceeds with the found subset
                tracing::warn!(?unresolved, task_id = %id, "some mentioned users were not found");
            }
            changes.mentions = Some(resolved);
        }
    }

    let task = state
        .store
        .update_task_owned(&id, &user.id, &changes)
        .map_err(|err| ApiError::write("Error updating todo", err))?
        .ok_or_else(|| {
            ApiError::not_found("Todo not found or you do not have permission to update it")
        })?;

    Ok(Success::data(TaskView::resolve(&task, &state.store))
        .with_message("Todo updated successfully"))
}

/// POST /api/todos/{id}/notes
pub async fn add_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(command): Json<AddNote>,
) -> Result<Success<TaskView>, ApiError> {
    let id = parse_task_id(&id).map_err(|err| ApiError::write("Error adding note", err))?;
    command
        .validate()
        .map_err(|err| ApiError::write("Error adding note", err))?;

    let mut task = state
        .store
        .find_task(&id)
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    if state.policy.note_requires_owner && task.user_id != user.id {
        // Same shape as a missing record
        return Err(ApiError::not_found("Todo not found"));
    }

    task.notes.push(Note {
        content: command.content.trim().to_string(),
        created_by: user.id.clone(),
        created_at: Utc::now(),
    });

    let task = state
        .store
        .save_task(task)
        .map_err(|err| ApiError::write("Error adding note", err))?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    Ok(Success::data(TaskView::resolve(&task, &state.store))
        .with_message("Note added successfully"))
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Success<()>, ApiError> {
    let id = parse_task_id(&id).map_err(|err| ApiError::write("Error deleting todo", err))?;

    let required_owner = state.policy.delete_requires_owner.then_some(user.id.as_str());
    state
        .store
        .delete_task(&id, required_owner)
        .map_err(|err| ApiError::write("Error deleting todo", err))?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    Ok(Success::message("Todo deleted successfully"))
}

/// GET /api/todos/stats
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Success<TaskStats>, ApiError> {
    Ok(Success::data(state.store.stats_for(&user.id)))
}
