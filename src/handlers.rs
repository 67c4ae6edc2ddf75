use crate::engine;
use crate::errors::AppError;
use crate::models::{
    AddTaskRequest, AdminSummary, AdminUser, CreatePlayerRequest, HealthResponse, PlayerState,
    ProgressUpdate, SuggestRequest, SuggestResponse, Task, ToggleTaskResponse, Weekday,
};
use crate::state::AppState;
use crate::stats::build_summary;
use crate::storage::persist_data;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn create_player(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerState>), AppError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }

    let mut data = state.data.lock().await;
    if data.players.contains_key(&user_id) {
        return Err(AppError::conflict(format!(
            "player {user_id} is already initialized"
        )));
    }

    let player = engine::initialize_player(username);
    data.players.insert(user_id.clone(), player.clone());
    persist_data(&state.data_path, &data).await?;

    info!("initialized player {user_id} as {username}");
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PlayerState>, AppError> {
    let data = state.data.lock().await;
    data.players
        .get(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("player {user_id} not initialized")))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Task>>, AppError> {
    let data = state.data.lock().await;
    let tasks = data
        .tasks
        .values()
        .filter(|task| task.user_id == user_id)
        .cloned()
        .collect();
    Ok(Json(tasks))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let user_id = payload.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::bad_request("user_id must not be empty"));
    }
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("task text must not be empty"));
    }
    let day = Weekday::parse(&payload.day)
        .ok_or_else(|| AppError::bad_request(format!("unknown weekday '{}'", payload.day)))?;

    let mut data = state.data.lock().await;
    data.next_task_id += 1;
    let task = Task {
        id: data.next_task_id,
        user_id: user_id.to_string(),
        day,
        text: text.to_string(),
        done: false,
    };
    data.tasks.insert(task.id, task.clone());
    persist_data(&state.data_path, &data).await?;

    info!("task {} added for {user_id} on {day}", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ToggleTaskResponse>, AppError> {
    let today = today();
    let mut data = state.data.lock().await;

    let mut task = data
        .tasks
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("task {id} not found")))?;

    if task.done {
        // Un-completing never touches progression.
        task.done = false;
        let mut staged = data.clone();
        staged.tasks.insert(id, task.clone());
        persist_data(&state.data_path, &staged).await?;
        *data = staged;
        return Ok(Json(ToggleTaskResponse {
            task,
            progress: None,
        }));
    }

    let outcome = {
        let player = data.players.get(&task.user_id).ok_or_else(|| {
            AppError::not_found(format!("player {} not initialized", task.user_id))
        })?;
        engine::complete_task(player, today)
    };

    // Task flag and player snapshot land in the same write; memory takes
    // them only once that write has succeeded.
    task.done = true;
    let mut staged = data.clone();
    staged.tasks.insert(id, task.clone());
    staged
        .players
        .insert(task.user_id.clone(), outcome.player.clone());
    persist_data(&state.data_path, &staged).await?;
    *data = staged;

    if outcome.leveled_up {
        info!(
            "player {} reached level {}",
            task.user_id, outcome.player.level
        );
    }

    Ok(Json(ToggleTaskResponse {
        task,
        progress: Some(ProgressUpdate {
            damage: outcome.damage,
            leveled_up: outcome.leveled_up,
            player: outcome.player,
        }),
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    if data.tasks.remove(&id).is_none() {
        return Err(AppError::not_found(format!("task {id} not found")));
    }
    persist_data(&state.data_path, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn admin_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminSummary>, AppError> {
    require_admin(&state, &headers)?;
    let data = state.data.lock().await;
    Ok(Json(build_summary(&data)))
}

pub async fn admin_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AdminUser>>, AppError> {
    require_admin(&state, &headers)?;
    let data = state.data.lock().await;
    let users = data
        .players
        .iter()
        .map(|(user_id, player)| AdminUser {
            user_id: user_id.clone(),
            username: player.username.clone(),
            level: player.level,
        })
        .collect();
    Ok(Json(users))
}

pub async fn suggest_tasks(
    State(state): State<AppState>,
    Json(payload): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let prompt = payload.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::bad_request("prompt must not be empty"));
    }
    let assistant = state
        .assistant
        .as_ref()
        .ok_or_else(|| AppError::unavailable("assistant is not configured"))?;

    let suggestions = assistant.suggest(prompt).await?;
    Ok(Json(SuggestResponse { suggestions }))
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let email = headers
        .get("x-user-email")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if email != state.admin_email {
        return Err(AppError::forbidden("admin access required"));
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
