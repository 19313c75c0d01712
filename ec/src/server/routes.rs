//! API route handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, Uri};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use seqpredict::format::json;
use seqpredict::{
    Echo, common_difference, format_number, iso_timestamp, parse_sequence, predict_multiple, predict_next,
};
use tracing::debug;

use super::AppState;
use super::error::ApiError;

const PROGRESSION_ERROR: &str = "The sequence is not a valid arithmetic progression";
const PROGRESSION_HINT: &str = "The difference between consecutive numbers must be constant";
const FORMAT_HINT: &str = "Please enter numbers separated by commas (e.g., \"3, 6, 9, 12\")";

/// Unwrap a JSON body, turning framework rejections into our 400 shape
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::bad_request_with_hint(
            "Request body must be valid JSON",
            rejection.body_text(),
        )),
    }
}

/// The numbers of a JSON array, or `None` if any element is not a number
fn numbers(items: &[Value]) -> Option<Vec<f64>> {
    items.iter().map(Value::as_f64).collect()
}

fn sequence_array(body: &Value) -> Option<&Vec<Value>> {
    body.get("sequence").and_then(Value::as_array)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub success: bool,
    #[serde(serialize_with = "json::list")]
    pub sequence: Vec<f64>,
    #[serde(serialize_with = "json::number")]
    pub common_difference: f64,
    #[serde(serialize_with = "json::number")]
    pub prediction: f64,
    pub echo_count: usize,
}

/// POST /api/predict - predict the next term and record an echo
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let body = json_body(body)?;
    let items = sequence_array(&body).ok_or_else(|| ApiError::bad_request("Sequence must be an array of numbers"))?;
    if items.is_empty() {
        return Err(ApiError::bad_request("Sequence must contain at least 2 numbers"));
    }

    let sequence = numbers(items).unwrap_or_default();
    let (Some(difference), Some(prediction)) = (common_difference(&sequence), predict_next(&sequence)) else {
        return Err(ApiError::bad_request_with_hint(PROGRESSION_ERROR, PROGRESSION_HINT));
    };

    let echo_count = {
        let mut echoes = state.echoes.lock().await;
        echoes.record(&sequence, prediction);
        echoes.count()
    };
    debug!(prediction, echo_count, "predict: recorded echo");

    Ok(Json(PredictResponse {
        success: true,
        sequence,
        common_difference: difference,
        prediction,
        echo_count,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictMultipleResponse {
    pub success: bool,
    #[serde(serialize_with = "json::list")]
    pub sequence: Vec<f64>,
    #[serde(serialize_with = "json::number")]
    pub common_difference: f64,
    #[serde(serialize_with = "json::list")]
    pub predictions: Vec<f64>,
    pub count: usize,
    pub echo_count: usize,
}

/// POST /api/predict-multiple - predict the next `count` terms
pub async fn predict_many(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictMultipleResponse>, ApiError> {
    let body = json_body(body)?;
    let items = sequence_array(&body);
    let count = body.get("count").and_then(Value::as_f64).filter(|count| *count >= 1.0);
    let (Some(items), Some(count)) = (items, count) else {
        return Err(ApiError::bad_request(
            "Invalid input: sequence must be an array and count must be > 0",
        ));
    };
    if count.fract() != 0.0 {
        return Err(ApiError::bad_request("Invalid input: count must be a whole number"));
    }
    if count > state.max_count as f64 {
        return Err(ApiError::bad_request(format!(
            "Invalid input: count must not exceed {}",
            state.max_count
        )));
    }

    let sequence = numbers(items).unwrap_or_default();
    let (Some(difference), Some(predictions)) = (common_difference(&sequence), predict_multiple(&sequence, count as i64))
    else {
        return Err(ApiError::bad_request_with_hint(PROGRESSION_ERROR, PROGRESSION_HINT));
    };

    let echo_count = state.echo_count().await;
    Ok(Json(PredictMultipleResponse {
        success: true,
        sequence,
        common_difference: difference,
        count: predictions.len(),
        predictions,
        echo_count,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub success: bool,
    pub sequence: Vec<Value>,
    pub is_valid: bool,
    #[serde(serialize_with = "json::option")]
    pub common_difference: Option<f64>,
    pub message: String,
}

/// POST /api/validate - report whether a sequence is a progression
pub async fn validate(body: Result<Json<Value>, JsonRejection>) -> Result<Json<ValidateResponse>, ApiError> {
    let body = json_body(body)?;
    let items = sequence_array(&body).ok_or_else(|| ApiError::bad_request("Sequence must be an array"))?;

    let difference = numbers(items).and_then(|sequence| common_difference(&sequence));
    let message = match difference {
        Some(difference) => format!(
            "Valid arithmetic progression with difference of {}",
            format_number(difference)
        ),
        None => "Not a valid arithmetic progression".to_string(),
    };

    Ok(Json(ValidateResponse {
        success: true,
        sequence: items.clone(),
        is_valid: difference.is_some(),
        common_difference: difference,
        message,
    }))
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub input: String,
    #[serde(serialize_with = "json::list")]
    pub sequence: Vec<f64>,
    pub count: usize,
}

/// POST /api/parse - turn comma-separated text into a sequence
pub async fn parse(body: Result<Json<Value>, JsonRejection>) -> Result<Json<ParseResponse>, ApiError> {
    let body = json_body(body)?;
    let input = body
        .get("input")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request("Input must be a string"))?;

    let sequence = parse_sequence(input)
        .ok_or_else(|| ApiError::bad_request_with_hint("Invalid input format", FORMAT_HINT))?;

    Ok(Json(ParseResponse {
        success: true,
        input: input.to_string(),
        count: sequence.len(),
        sequence,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResponse {
    pub success: bool,
    pub echo_count: usize,
    pub echoes: Vec<Echo>,
}

/// GET /api/memory - every recorded echo, oldest first
pub async fn memory(State(state): State<AppState>) -> Json<MemoryResponse> {
    let echoes = state.echoes.lock().await.all().to_vec();
    Json(MemoryResponse {
        success: true,
        echo_count: echoes.len(),
        echoes,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
    pub echo_count: usize,
}

/// DELETE /api/memory - forget every echo
pub async fn clear_memory(State(state): State<AppState>) -> Json<ClearResponse> {
    let echo_count = {
        let mut echoes = state.echoes.lock().await;
        let removed = echoes.clear();
        debug!(removed, "clear_memory: cleared echoes");
        echoes.count()
    };

    Json(ClearResponse {
        success: true,
        message: "All echoes have been cleared".to_string(),
        echo_count,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub status: &'static str,
    pub application: &'static str,
    pub version: &'static str,
    pub echo_count: usize,
    pub uptime: f64,
    pub timestamp: String,
}

/// GET /api/status - liveness and counters
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        success: true,
        status: "online",
        application: "Echo Chamber",
        version: env!("CARGO_PKG_VERSION"),
        echo_count: state.echo_count().await,
        uptime: state.started.elapsed().as_secs_f64(),
        timestamp: iso_timestamp(Utc::now()),
    })
}

/// Fallback for unmatched paths and methods
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: uri.path().to_string(),
        method: method.to_string(),
    }
}
