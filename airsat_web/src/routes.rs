use std::sync::Arc;

use airsat::domain::{CustomerRecord, Predictor, Satisfaction};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::{ApiError, PageError},
    page,
};

/// 読み込み済みモデルを共有する
#[derive(Clone, Debug)]
pub struct AppState {
    predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_json))
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(page::index())
}

async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<CustomerRecord>, FormRejection>,
) -> Result<Html<String>, PageError> {
    let Form(record) = form.map_err(|e| PageError::Rejected(e.body_text()))?;
    let prediction = state.predictor.predict(&record)?;
    Ok(Html(page::result(&record, &prediction)))
}

#[derive(Debug, Serialize)]
struct PredictionResponse {
    satisfaction: Satisfaction,
    features: Vec<f64>,
    customer: CustomerRecord,
}

async fn predict_json(
    State(state): State<AppState>,
    json: Result<Json<CustomerRecord>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(record) = json.map_err(|e| ApiError::Rejected(e.body_text()))?;
    let prediction = state.predictor.predict(&record)?;
    Ok(Json(PredictionResponse {
        satisfaction: prediction.satisfaction,
        features: prediction.features.as_slice().to_vec(),
        customer: record,
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
