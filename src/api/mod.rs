use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::assistant::{AssistantResponse, TravelAssistant};
use crate::intent::{IntentClassifier, RuleClassifier, TravelRequest, normalize_query};
use crate::itinerary::ItineraryPlanner;
use crate::models::{DayPlan, PointOfInterest};
use crate::{AssistantError, VERSION};

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    pub planner: Arc<ItineraryPlanner>,
    pub classifier: Arc<dyn IntentClassifier>,
    pub assistant: Arc<TravelAssistant>,
}

impl ApiState {
    pub fn new(planner: ItineraryPlanner, assistant: TravelAssistant) -> Self {
        Self {
            planner: Arc::new(planner),
            classifier: Arc::new(RuleClassifier),
            assistant: Arc::new(assistant),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItineraryRequest {
    #[serde(default)]
    pub points: Vec<PointOfInterest>,
    pub days: u32,
    #[serde(default)]
    pub weather: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IntentRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub text: String,
    pub response: AssistantResponse,
}

/// JSON `{"error": ...}` with a status code
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Validation { .. } => Self(StatusCode::BAD_REQUEST, err.to_string()),
            other => {
                error!("Request failed: {other}");
                Self(StatusCode::INTERNAL_SERVER_ERROR, other.user_message())
            }
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itinerary", post(plan_itinerary))
        .route("/intent", post(classify_intent))
        .route("/chat", post(chat))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

async fn plan_itinerary(
    State(state): State<ApiState>,
    Json(request): Json<ItineraryRequest>,
) -> Result<Json<Vec<DayPlan>>, ApiError> {
    let days = state
        .planner
        .plan(&request.points, request.days, &request.weather)
        .inspect_err(|e| warn!("Rejected itinerary request: {e}"))?;
    Ok(Json(days))
}

async fn classify_intent(
    State(state): State<ApiState>,
    Json(request): Json<IntentRequest>,
) -> Json<TravelRequest> {
    Json(state.classifier.classify(&normalize_query(&request.query)))
}

async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.user_id.trim().is_empty() {
        return Err(ApiError(StatusCode::BAD_REQUEST, "user_id must not be empty".to_string()));
    }

    let response = state
        .assistant
        .handle_query(&request.user_id, &request.query)
        .await
        .map_err(|e| {
            error!("Chat request failed: {e:#}");
            let message = e.downcast_ref::<AssistantError>().map_or_else(
                || "Failed to process query".to_string(),
                AssistantError::user_message,
            );
            ApiError(StatusCode::INTERNAL_SERVER_ERROR, message)
        })?;

    Ok(Json(ChatResponse {
        text: response.to_string(),
        response,
    }))
}
