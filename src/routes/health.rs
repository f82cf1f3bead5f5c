//! # 헬스체크 핸들러
//!
//! - `GET /v1/health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 오케스트레이터가 서버 가동 여부를 확인할 때 씁니다.

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
