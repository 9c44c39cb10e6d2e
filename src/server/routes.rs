use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::difficulty::Difficulty;
use super::render;
use super::store::SharedGame;
use super::AppState;
use crate::error::AppError;
use crate::game::{GameState, MoveOutcome, Player};

#[derive(Debug, Deserialize)]
struct StartForm {
    #[serde(default)]
    player1: String,
    #[serde(default)]
    player2: String,
    #[serde(default)]
    difficulty: String,
}

#[derive(Debug, Deserialize)]
struct PlayForm {
    #[serde(default)]
    column: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    live_games: usize,
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn name_or_default(name: &str, player: Player) -> String {
    let name = name.trim();
    if name.is_empty() {
        player.label().to_string()
    } else {
        name.to_string()
    }
}

/// Resolve a path segment to a live game. Malformed and unknown ids both
/// yield `None`; the HTML routes send those back to the start page.
fn lookup(state: &AppState, raw_id: &str) -> Option<(Uuid, SharedGame)> {
    let id = Uuid::parse_str(raw_id).ok()?;
    state.games.get(&id).map(|game| (id, game))
}

async fn home() -> HttpResponse {
    html(render::home_page())
}

async fn start_form() -> HttpResponse {
    html(render::start_page())
}

#[tracing::instrument(skip_all, fields(difficulty = %form.difficulty))]
async fn start_game(
    state: web::Data<AppState>,
    form: web::Form<StartForm>,
) -> HttpResponse {
    let difficulty = Difficulty::from_form(&form.difficulty);
    let dims = difficulty.dimensions();
    let game = GameState::new(
        name_or_default(&form.player1, Player::One),
        name_or_default(&form.player2, Player::Two),
        dims,
    );

    let id = state.games.create(game);
    tracing::info!(
        game_id = %id,
        difficulty = difficulty.as_str(),
        rows = dims.rows(),
        cols = dims.cols(),
        "game created"
    );

    see_other(&format!("/game/{id}"))
}

#[tracing::instrument(skip(state))]
async fn show_game(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let Some((id, game)) = lookup(&state, &path) else {
        return see_other("/start");
    };

    let body = render::game_page(&id, &game.lock());
    html(body)
}

#[tracing::instrument(skip(state, form), fields(column = %form.column))]
async fn play(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<PlayForm>,
) -> HttpResponse {
    let Some((id, game)) = lookup(&state, &path) else {
        return see_other("/start");
    };
    let back = format!("/game/{id}");

    let Ok(column) = form.column.trim().parse::<usize>() else {
        tracing::debug!(game_id = %id, "ignoring unparseable column");
        return see_other(&back);
    };

    let result = game.lock().apply_move(column);
    match result {
        Ok(MoveOutcome::Won { player, .. }) => {
            tracing::info!(game_id = %id, column, winner = player.number(), "game won");
        }
        Ok(MoveOutcome::Draw { .. }) => {
            tracing::info!(game_id = %id, column, "game drawn");
        }
        Ok(MoveOutcome::NextTurn { player, row }) => {
            tracing::debug!(game_id = %id, column, row, next = player.number(), "move accepted");
        }
        Err(err) => {
            tracing::debug!(game_id = %id, column, reason = %err, "move rejected");
        }
    }

    see_other(&back)
}

/// Plays only arrive by POST; any other method goes back to the board.
async fn play_redirect(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match lookup(&state, &path) {
        Some((id, _)) => see_other(&format!("/game/{id}")),
        None => see_other("/start"),
    }
}

#[tracing::instrument(skip(state))]
async fn reset(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let Some((id, game)) = lookup(&state, &path) else {
        return see_other("/start");
    };

    game.lock().reset();
    tracing::info!(game_id = %id, "game reset");
    see_other(&format!("/game/{id}"))
}

async fn game_json(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = Uuid::parse_str(&path)
        .map_err(|_| AppError::BadRequest(format!("invalid game id '{}'", path.as_str())))?;
    let game = state.games.get(&id).ok_or(AppError::GameNotFound(id))?;

    let guard = game.lock();
    Ok(HttpResponse::Ok().json(guard.snapshot()))
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        live_games: state.games.len(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/start", web::get().to(start_form))
        .route("/start", web::post().to(start_game))
        .route("/game/{id}", web::get().to(show_game))
        .route("/game/{id}/play", web::post().to(play))
        .route("/game/{id}/play", web::get().to(play_redirect))
        .route("/game/{id}/reset", web::post().to(reset))
        .route("/api/game/{id}", web::get().to(game_json))
        .route("/health", web::get().to(health));
}
