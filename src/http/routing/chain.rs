use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::application::chain_service::ChainService;
use crate::domain::account::Address;
use crate::domain::todo::{CreateTodo, Priority, Todo, TodoPatch};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: ChainService> {
    pub service: S,
}

pub fn router<S: ChainService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/factory/lists", post(create_todo_list::<S>))
        .route("/factory/lists/:user", get(todo_list_for::<S>))
        .route("/factory/users", get(users::<S>))
        .route("/factory/users/count", get(user_count::<S>))
        .route("/lists/:contract/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route(
            "/lists/:contract/todos/:id",
            get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>),
        )
        .route("/lists/:contract/todos/:id/toggle", post(toggle_todo::<S>))
        .route("/lists/:contract/stats", get(stats::<S>))
        .route("/lists/:contract/owner", get(owner::<S>))
        .route("/lists/:contract/ownership", post(transfer_ownership::<S>))
        .route("/events", get(events::<S>))
        .with_state(state)
}

/// Caller identity for mutating calls, the RPC `from` convention.
#[derive(Deserialize)]
struct FromBody {
    from: Address,
}

#[derive(Deserialize)]
struct CallerQuery {
    from: Address,
}

fn default_limit() -> u64 { 50 }

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    offset: u64,
    #[serde(default = "default_limit")]
    limit: u64,
}

#[derive(Deserialize)]
struct CreateTodoBody {
    from: Address,
    title: String,
    #[serde(default)]
    description: String,
    priority: String,
}

#[derive(Deserialize)]
struct UpdateTodoBody {
    from: Address,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
}

#[derive(Deserialize)]
struct TransferBody {
    from: Address,
    new_owner: Address,
}

async fn create_todo_list<S: ChainService>(
    State(state): State<AppState<S>>,
    Json(body): Json<FromBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let address = state.service.create_todo_list(body.from).await?;
    Ok(Json(serde_json::json!({ "user": body.from, "todo_list": address })))
}

async fn todo_list_for<S: ChainService>(
    State(state): State<AppState<S>>,
    Path(user): Path<Address>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let address = state.service.todo_list_for(user).await?;
    Ok(Json(serde_json::json!({ "user": user, "todo_list": address })))
}

async fn users<S: ChainService>(
    State(state): State<AppState<S>>,
    Query(page): Query<PageQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let users = state.service.users(page.offset, page.limit).await?;
    Ok(Json(serde_json::json!({ "items": users })))
}

async fn user_count<S: ChainService>(
    State(state): State<AppState<S>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state.service.user_count().await?;
    Ok(Json(serde_json::json!({ "count": count })))
}

async fn create_todo<S: ChainService>(
    State(state): State<AppState<S>>,
    Path(contract): Path<Address>,
    Json(body): Json<CreateTodoBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let priority: Priority = body.priority.parse()?;
    let input = CreateTodo { title: body.title, description: body.description, priority };
    let todo = state.service.create_todo(contract, body.from, input).await?;
    Ok(Json(todo_json(&todo)))
}

async fn list_todos<S: ChainService>(
    State(state): State<AppState<S>>,
    Path(contract): Path<Address>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let todos = state.service.todos(contract, caller.from).await?;
    Ok(Json(serde_json::json!({ "items": todos.iter().map(todo_json).collect::<Vec<_>>() })))
}

async fn get_todo<S: ChainService>(
    State(state): State<AppState<S>>,
    Path((contract, id)): Path<(Address, u64)>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let todo = state.service.todo(contract, caller.from, id).await?;
    Ok(Json(todo_json(&todo)))
}

async fn update_todo<S: ChainService>(
    State(state): State<AppState<S>>,
    Path((contract, id)): Path<(Address, u64)>,
    Json(body): Json<UpdateTodoBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let priority = match body.priority.as_deref() {
        Some(s) => Some(s.parse::<Priority>()?),
        None => None,
    };
    let patch = TodoPatch { title: body.title, description: body.description, priority };
    let todo = state.service.update_todo(contract, body.from, id, patch).await?;
    Ok(Json(todo_json(&todo)))
}

async fn toggle_todo<S: ChainService>(
    State(state): State<AppState<S>>,
    Path((contract, id)): Path<(Address, u64)>,
    Json(body): Json<FromBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let todo = state.service.toggle_todo_completion(contract, body.from, id).await?;
    Ok(Json(todo_json(&todo)))
}

async fn delete_todo<S: ChainService>(
    State(state): State<AppState<S>>,
    Path((contract, id)): Path<(Address, u64)>,
    Query(caller): Query<CallerQuery>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_todo(contract, caller.from, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn stats<S: ChainService>(
    State(state): State<AppState<S>>,
    Path(contract): Path<Address>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = state.service.stats(contract, caller.from).await?;
    Ok(Json(serde_json::json!({
        "total": stats.total,
        "completed": stats.completed,
        "pending": stats.pending,
        "high_priority": stats.high_priority,
    })))
}

async fn owner<S: ChainService>(
    State(state): State<AppState<S>>,
    Path(contract): Path<Address>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let owner = state.service.owner_of(contract).await?;
    Ok(Json(serde_json::json!({ "owner": owner })))
}

async fn transfer_ownership<S: ChainService>(
    State(state): State<AppState<S>>,
    Path(contract): Path<Address>,
    Json(body): Json<TransferBody>,
) -> Result<StatusCode, ApiError> {
    state.service.transfer_ownership(contract, body.from, body.new_owner).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn events<S: ChainService>(
    State(state): State<AppState<S>>,
    Query(page): Query<PageQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let events = state.service.events(page.offset, page.limit).await?;
    Ok(Json(serde_json::json!({ "items": events })))
}

fn todo_json(todo: &Todo) -> serde_json::Value {
    serde_json::json!({
        "id": todo.id,
        "title": todo.title,
        "description": todo.description,
        "priority": todo.priority.as_str(),
        "completed": todo.completed,
        "created_at": todo.created_at,
        "updated_at": todo.updated_at,
        "completed_at": todo.completed_at,
    })
}
