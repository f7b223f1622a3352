use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::generate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub recipe_id: String,
    pub question: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub answer: String,
}

#[utoipa::path(
    post,
    path = "/recipe/chat",
    tag = "recipes",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer grounded in the recipe", body = ChatResponse),
        (status = 400, description = "Empty question or generation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let answer = generate::answer_question(
        &state.generator,
        state.store.as_ref(),
        &request.recipe_id,
        &request.question,
    )
    .await?;

    Ok(Json(ChatResponse {
        answer: answer.answer,
    }))
}
