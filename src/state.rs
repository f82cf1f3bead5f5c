//! 모든 핸들러가 공유하는 애플리케이션 상태

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::services::mail::Mailer;
use crate::services::storage::ObjectStorage;

/// Axum `State`로 주입되는 공유 상태
///
/// `SqlitePool`과 `Arc`는 clone해도 같은 자원을 가리키므로
/// 요청마다 복제되어도 비용이 거의 없습니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    /// 인증 코드 메일 발송기 (운영: SMTP, 테스트: 기록용)
    pub mailer: Arc<dyn Mailer>,
    /// 이미지 저장소 (운영: S3, 테스트: 메모리)
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        config: Config,
        mailer: Arc<dyn Mailer>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            mailer,
            storage,
        }
    }
}
