use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deening_core::generate;
use serde::Serialize;
use utoipa::ToSchema;

pub const NO_INGREDIENTS_MESSAGE: &str = "No ingredients found in the image";

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct DetectRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DetectedIngredient {
    pub ingredient_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DetectResponse {
    pub ingredients: Vec<DetectedIngredient>,
}

fn multipart_error(e: &axum::extract::multipart::MultipartError) -> ApiError {
    tracing::warn!("Multipart read error: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::bad_request("Image is too large")
    } else {
        ApiError::bad_request(format!("Failed to read multipart data: {}", e.body_text()))
    }
}

/// Read the bytes of the `image` field, skipping any other fields.
async fn read_image(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let data = field.bytes().await.map_err(|e| multipart_error(&e))?;
        return Ok(data.to_vec());
    }
    Err(ApiError::bad_request("No image provided"))
}

/// Identify food items in a photo.
#[utoipa::path(
    post,
    path = "/refrigerator/ingredient-detect",
    tag = "refrigerator",
    request_body(content_type = "multipart/form-data", content = DetectRequest),
    responses(
        (status = 200, description = "Detected ingredients", body = DetectResponse),
        (status = 400, description = "Missing or invalid image, or detection failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Nothing recognizable in the image", body = MessageResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn detect_ingredients(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let image = read_image(&mut multipart).await?;
    let detected = generate::detect_ingredients(&state.generator, &image).await?;

    if detected.ingredients.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            MessageResponse::new(NO_INGREDIENTS_MESSAGE),
        )
            .into_response());
    }

    let ingredients = detected
        .ingredients
        .into_iter()
        .map(|ingredient_name| DetectedIngredient { ingredient_name })
        .collect();
    Ok(Json(DetectResponse { ingredients }).into_response())
}
