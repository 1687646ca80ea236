use airsat::domain::PredictionError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::page;

/// フォーム画面のエラー
#[derive(Debug)]
pub enum PageError {
    Rejected(String),
    Prediction(PredictionError),
}

impl From<PredictionError> for PageError {
    fn from(value: PredictionError) -> Self {
        Self::Prediction(value)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(message) => {
                warn!("不正な入力を受信: {}", message);
                (StatusCode::UNPROCESSABLE_ENTITY, Html(page::error(&message))).into_response()
            }
            Self::Prediction(e) => {
                error!("予測エラー: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(page::error("Prediction failed")),
                )
                    .into_response()
            }
        }
    }
}

/// JSON APIのエラー
#[derive(Debug)]
pub enum ApiError {
    Rejected(String),
    Prediction(PredictionError),
}

impl From<PredictionError> for ApiError {
    fn from(value: PredictionError) -> Self {
        Self::Prediction(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(message) => {
                warn!("不正な入力を受信: {}", message);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
            Self::Prediction(e) => {
                error!("予測エラー: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": format!("Prediction failed: {}", e) })),
                )
                    .into_response()
            }
        }
    }
}
