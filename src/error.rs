use std::path::PathBuf;

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use uuid::Uuid;

/// Errors constructing game values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("board dimensions must be positive with a representable cell count (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Reasons a move is rejected. A rejected move never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is outside the board (0..{cols})")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("the game is already over")]
    GameAlreadyOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Problem body returned for failed API requests.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: &'static str,
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("game {0} not found")]
    GameNotFound(Uuid),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::GameNotFound(_) => "GAME_NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::GameNotFound(_) => "Not Found",
            AppError::BadRequest(_) => "Bad Request",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::GameNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ProblemDetails {
            title: self.title().to_string(),
            status: status.as_u16(),
            detail: self.to_string(),
            code: self.code(),
        })
    }
}
