/// Todo CRUD endpoints
///
/// All endpoints require a bearer access token; the authenticated user is
/// taken from the [`AuthContext`] extractor. Every operation is scoped to
/// the caller, so another user's todos are invisible: update and delete
/// answer 404 whether the item is absent or foreign.
///
/// # Endpoints
///
/// - `POST /api/todos` - Create a todo
/// - `GET /api/todos?filter=` - List todos (optional due-date window)
/// - `PUT /api/todos/:id` - Replace a todo's fields
/// - `DELETE /api/todos/:id` - Delete a todo

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tickbox_shared::{
    auth::middleware::AuthContext,
    filters::DueFilter,
    models::todo::{CreateTodo, Todo, TodoStatus, UpdateTodo},
};
use uuid::Uuid;
use validator::Validate;

/// Todo create/replace payload
///
/// Updates are full replacements, so create and update share this shape.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoPayload {
    /// Short title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Free-text description (defaults to empty)
    #[serde(default)]
    pub description: String,

    /// Completion status (defaults to pending)
    #[serde(default)]
    pub status: TodoStatus,

    /// Calendar date the item is due
    pub due_date: NaiveDate,
}

/// Todo as returned to the client
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    /// Todo ID
    pub id: Uuid,

    /// Short title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Completion status
    pub status: TodoStatus,

    /// Calendar date the item is due
    pub due_date: NaiveDate,

    /// When the item was created
    pub created_at: chrono::DateTime<Utc>,

    /// When the item was last updated
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            status: todo.status,
            due_date: todo.due_date,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Due-date window: "daily", "weekly", or "monthly"; anything else
    /// means no filter
    pub filter: Option<String>,
}

/// Create a todo owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /api/todos
/// Authorization: Bearer <access_token>
/// Content-Type: application/json
///
/// {
///   "title": "Water the plants",
///   "description": "Only the ones on the balcony",
///   "status": "pending",
///   "due_date": "2024-03-15"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `500 Internal Server Error`: store failure
pub async fn create_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<TodoPayload>,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    req.validate()?;

    let todo = Todo::create(
        &state.db,
        CreateTodo {
            user_id: auth.user_id,
            title: req.title,
            description: req.description,
            status: req.status,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// List the caller's todos
///
/// The optional `filter` query value narrows the list by a due-date window
/// relative to today: `daily` (same day-of-month), `weekly` (same ISO week
/// number), `monthly` (same month number). Year is ignored in all three;
/// an unrecognized value returns the unfiltered list.
///
/// # Endpoint
///
/// ```text
/// GET /api/todos?filter=weekly
/// Authorization: Bearer <access_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `500 Internal Server Error`: store failure
pub async fn list_todos(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let mut todos = Todo::list_by_owner(&state.db, auth.user_id).await?;

    if let Some(filter) = params.filter.as_deref().and_then(DueFilter::parse) {
        let today = Utc::now().date_naive();
        todos.retain(|todo| filter.matches(todo.due_date, today));
    }

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Replace all fields of a todo
///
/// # Endpoint
///
/// ```text
/// PUT /api/todos/:id
/// Authorization: Bearer <access_token>
/// Content-Type: application/json
///
/// { "title": "...", "description": "...", "status": "completed", "due_date": "2024-03-15" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `404 Not Found`: absent, or owned by another user (indistinguishable)
/// - `500 Internal Server Error`: store failure
pub async fn update_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<TodoPayload>,
) -> ApiResult<Json<TodoResponse>> {
    req.validate()?;

    let todo = Todo::update_for_owner(
        &state.db,
        id,
        auth.user_id,
        UpdateTodo {
            title: req.title,
            description: req.description,
            status: req.status,
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Not found".to_string()))?;

    Ok(Json(todo.into()))
}

/// Permanently delete a todo
///
/// # Endpoint
///
/// ```text
/// DELETE /api/todos/:id
/// Authorization: Bearer <access_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `404 Not Found`: absent, or owned by another user (indistinguishable)
/// - `500 Internal Server Error`: store failure
pub async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Todo::delete_for_owner(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
