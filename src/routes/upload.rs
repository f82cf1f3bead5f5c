use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    services::upload as upload_service,
    state::AppState,
};

/// multipart 폼의 `image` 필드 하나를 S3에 올립니다.
pub async fn upload_image(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !upload_service::is_allowed_image(&content_type) {
            return Err(AppError::bad_request("Only image files can be uploaded."));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        let url =
            upload_service::upload_image(&state, &file_name, &content_type, bytes.to_vec()).await?;

        return Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "An image file has been uploaded.", "url": url })),
        ));
    }

    Err(AppError::bad_request("image file is required"))
}

pub async fn presigned_url(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (url, key) = upload_service::presigned_url(&state).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "pre-signed url has been created.", "url": url, "key": key })),
    ))
}
