use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use crate::db;
use crate::error::ApiError;
use crate::models::{CreatePlayerRequest, Player, PlayerEnvelope};
use crate::AppState;

// GET /api/players - List all players, unpaginated
pub async fn get_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = db::get_all_players(&state.pool)
        .await
        .map_err(ApiError::internal("Error fetching players"))?;

    Ok(Json(players))
}

// POST /api/players - Add a player; omitted numbers default to 0
pub async fn create_player(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlayerEnvelope>), ApiError> {
    let Json(payload) = payload?;
    let new_player = payload.validate().map_err(ApiError::Validation)?;

    let player = db::create_player(&state.pool, &new_player)
        .await
        .map_err(ApiError::internal("Error adding player"))?;

    tracing::info!(player_id = player.id, name = %player.name, "player added");

    Ok((
        StatusCode::CREATED,
        Json(PlayerEnvelope {
            message: "Player added successfully".to_string(),
            player,
        }),
    ))
}
