//! HTTP API over the engine task.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use slide_puzzle_engine::{EngineError, LEVELS, Level, LevelConfig, StateSnapshot};
use tracing::{debug, info, instrument, warn};

use crate::driver::{EngineHandle, EngineStopped, MoveReply};

/// Body of `POST /game/start`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartRequest {
    /// Level number; anything outside 1..=3 is rejected with 400.
    pub level: i64,
    /// Restart the countdown; `false` reshuffles a running level.
    #[serde(default = "default_reset_timer")]
    pub reset_timer: bool,
}

fn default_reset_timer() -> bool {
    true
}

/// Body of `POST /game/move`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Cell index of the tile to slide; out-of-range values are ignored.
    pub index: i64,
}

/// Errors returned by API handlers.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// Request named a level outside 1..=3.
    #[display("{}", _0)]
    Engine(EngineError),
    /// The engine task is gone.
    #[display("{}", _0)]
    Stopped(EngineStopped),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Engine(_) => StatusCode::BAD_REQUEST,
            ApiError::Stopped(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        warn!(%status, error = %self, "Request failed");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the API router.
pub fn router(engine: EngineHandle) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/levels", get(levels))
        .route("/game/state", get(game_state))
        .route("/game/start", post(start_game))
        .route("/game/move", post(move_tile))
        .with_state(engine)
}

/// Binds `host:port` and serves the API until the process exits.
#[instrument(skip(engine))]
pub async fn serve(engine: EngineHandle, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, "HTTP API listening");
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn levels() -> Json<Vec<LevelConfig>> {
    Json(LEVELS.to_vec())
}

async fn game_state(State(engine): State<EngineHandle>) -> Result<Json<StateSnapshot>, ApiError> {
    Ok(Json(engine.state().await?))
}

#[instrument(skip(engine))]
async fn start_game(
    State(engine): State<EngineHandle>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StateSnapshot>, ApiError> {
    let level = u8::try_from(request.level)
        .map_err(|_| EngineError::UnknownLevel(request.level))
        .and_then(Level::try_from)?;
    let state = engine.start_game(level, request.reset_timer).await?;
    info!(%level, time_remaining = state.time_remaining, "Level started");
    Ok(Json(state))
}

#[instrument(skip(engine))]
async fn move_tile(
    State(engine): State<EngineHandle>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveReply>, ApiError> {
    let Ok(index) = usize::try_from(request.index) else {
        debug!(index = request.index, "Negative index ignored");
        return Ok(Json(MoveReply::new(false, engine.state().await?)));
    };
    Ok(Json(engine.move_tile(index).await?))
}
