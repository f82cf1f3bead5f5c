//! # 이미지 업로드 서비스
//!
//! 키 형식: `<밀리초 타임스탬프><UUIDv7><소문자 확장자>`
//! presigned URL 키 형식: `<밀리초 타임스탬프>.jpg`

use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use crate::error::AppError;
use crate::state::AppState;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const PRESIGNED_URL_TTL: Duration = Duration::from_secs(3600);

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpg", "image/jpeg", "image/png", "image/gif"];

pub fn is_allowed_image(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

pub fn image_key(file_name: &str) -> String {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    format!(
        "{}{}{}",
        Utc::now().timestamp_millis(),
        uuid::Uuid::now_v7(),
        extension
    )
}

pub async fn upload_image(
    state: &AppState,
    file_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, AppError> {
    if !is_allowed_image(content_type) {
        return Err(AppError::bad_request("Only image files can be uploaded."));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::bad_request("Image file must not be larger than 5MB."));
    }

    let key = image_key(file_name);
    let size = bytes.len();
    let url = state
        .storage
        .put_object(&key, bytes, content_type)
        .await
        .inspect_err(|e| tracing::error!(key = %key, error = %e, "image upload failed"))?;
    tracing::debug!(key = %key, size, "image uploaded");

    Ok(url)
}

/// 브라우저가 S3로 직접 올릴 수 있는 PUT URL과 그 키
pub async fn presigned_url(state: &AppState) -> Result<(String, String), AppError> {
    let key = format!("{}.jpg", Utc::now().timestamp_millis());
    let url = state.storage.presign_put(&key, PRESIGNED_URL_TTL).await?;
    Ok((url, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_listed_image_types() {
        assert!(is_allowed_image("image/png"));
        assert!(is_allowed_image("image/jpg"));
        assert!(!is_allowed_image("image/webp"));
        assert!(!is_allowed_image("application/pdf"));
    }

    #[test]
    fn key_keeps_lowercased_extension() {
        let key = image_key("Photo.PNG");
        assert!(key.ends_with(".png"));
        assert_eq!(key.len(), 13 + 36 + ".png".len());
        assert!(key.chars().take(13).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn key_without_extension_has_no_suffix() {
        assert!(!image_key("blob").contains('.'));
    }
}
