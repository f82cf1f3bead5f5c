//! # 오브젝트 스토리지 (이미지 업로드)
//!
//! 운영 환경은 `S3Storage`(aws-sdk-s3), 테스트는 메모리 구현을 씁니다.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    config::Region, presigning::PresigningConfig, primitives::ByteStream, Client,
};

use crate::config::S3Config;
use crate::error::AppError;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// 객체를 올리고 공개 URL을 반환합니다.
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;

    /// 클라이언트가 직접 PUT 할 수 있는 서명된 URL
    async fn presign_put(&self, key: &str, expires_in: Duration) -> Result<String, AppError>;
}

/// `https://<bucket>.s3.amazonaws.com/<key>`
pub fn object_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// 자격 증명은 AWS 기본 체인(환경변수, 프로필 등)에서 읽습니다.
    pub async fn from_config(config: &S3Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Failed to upload {key}: {e}")))?;

        Ok(object_url(&self.bucket, key))
    }

    async fn presign_put(&self, key: &str, expires_in: Duration) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::internal(format!("Invalid presign expiry: {e}")))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::internal(format!("Failed to presign {key}: {e}")))?;

        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_virtual_hosted_url() {
        assert_eq!(
            object_url("scs-images", "1700000000000abc.png"),
            "https://scs-images.s3.amazonaws.com/1700000000000abc.png"
        );
    }
}
