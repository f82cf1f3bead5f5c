#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use scs::{
    config::{Config, JwtConfig, S3Config, SmtpConfig},
    db::MIGRATOR,
    error::AppError,
    services::{
        mail::Mailer,
        storage::{object_url, ObjectStorage},
    },
    AppState,
};
use serde_json::{json, Value};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tempfile::TempDir;

pub const PASSWORD: &str = "password123";
pub const BUCKET: &str = "test-bucket";

/// 보낸 인증 코드를 기억해 두는 메일러
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::internal("smtp unavailable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryStorage {
    pub fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(object_url(BUCKET, key))
    }

    async fn presign_put(&self, key: &str, expires_in: Duration) -> Result<String, AppError> {
        Ok(format!(
            "{}?X-Amz-Expires={}",
            object_url(BUCKET, key),
            expires_in.as_secs()
        ))
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub mailer: Arc<RecordingMailer>,
    pub storage: Arc<MemoryStorage>,
    _dir: TempDir,
}

fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_expires_in: 3600,
            refresh_expires_in: 7200,
        },
        smtp: SmtpConfig {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: "\"SCS\" <admin@example.com>".to_string(),
        },
        s3: S3Config {
            region: "ap-northeast-2".to_string(),
            bucket: BUCKET.to_string(),
        },
        cors_origins: vec!["http://localhost:5173".to_string()],
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("scs-test.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();

        let mailer = Arc::new(RecordingMailer::default());
        let storage = Arc::new(MemoryStorage::default());
        let state = AppState::new(pool.clone(), test_config(), mailer.clone(), storage.clone());
        let server = TestServer::new(scs::app(state)).unwrap();

        Self {
            server,
            pool,
            mailer,
            storage,
            _dir: dir,
        }
    }

    /// 인증 코드 발송 → 확인 → 가입까지 거쳐 사용자 id를 반환합니다.
    pub async fn signup(&self, email: &str, nickname: &str) -> i64 {
        self.server
            .post("/v1/auth/email/verification-code")
            .json(&json!({ "email": email }))
            .await
            .assert_status(StatusCode::CREATED);

        let code = self.mailer.last_code_for(email).unwrap();
        self.server
            .post("/v1/auth/email/verify-code")
            .json(&json!({ "email": email, "verificationCode": code }))
            .await
            .assert_status_ok();

        let response = self
            .server
            .post("/v1/auth/signup")
            .json(&json!({
                "email": email,
                "password": PASSWORD,
                "nickname": nickname,
                "affiliation": "SNU",
                "position": "student",
                "verificationCode": code,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["user"]["id"].as_i64().unwrap()
    }

    pub async fn login(&self, email: &str) -> Value {
        let response = self
            .server
            .post("/v1/auth/jwt/login")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    /// 가입 + 로그인 후 (id, access token)
    pub async fn user(&self, email: &str, nickname: &str) -> (i64, String) {
        let id = self.signup(email, nickname).await;
        let tokens = self.login(email).await;
        (id, tokens["accessToken"].as_str().unwrap().to_string())
    }

    /// 관리자 권한은 토큰에 들어가므로 역할을 바꾼 뒤 로그인합니다.
    pub async fn admin(&self, email: &str) -> (i64, String) {
        let id = self.signup(email, "admin").await;
        sqlx::query("UPDATE users SET role = 'admin' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .unwrap();
        let tokens = self.login(email).await;
        (id, tokens["accessToken"].as_str().unwrap().to_string())
    }

    pub async fn create_section(&self, admin_token: &str, subject: &str) -> i64 {
        let response = self
            .server
            .post("/v1/sections")
            .authorization_bearer(admin_token)
            .json(&json!({ "subject": subject, "description": "desc" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["section"]["id"].as_i64().unwrap()
    }

    pub async fn create_question(&self, token: &str, section_id: i64, content: &str) -> i64 {
        let response = self
            .server
            .post("/v1/questions")
            .authorization_bearer(token)
            .json(&json!({ "sectionId": section_id, "content": content }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["question"]["id"].as_i64().unwrap()
    }

    pub async fn create_action(&self, token: &str, question_id: i64, content: &str) -> i64 {
        let response = self
            .server
            .post("/v1/actions")
            .authorization_bearer(token)
            .json(&json!({ "questionId": question_id, "title": "answer", "content": content }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["action"]["id"].as_i64().unwrap()
    }

    pub async fn create_book(&self, token: &str, title: &str, visibility: &str) -> i64 {
        let response = self
            .server
            .post("/v1/books")
            .authorization_bearer(token)
            .json(&json!({ "title": title, "visibility": visibility }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["book"]["id"].as_i64().unwrap()
    }

    pub async fn question_saved(&self, question_id: i64) -> i64 {
        let (saved,): (i64,) = sqlx::query_as("SELECT saved FROM questions WHERE id = ?")
            .bind(question_id)
            .fetch_one(&self.pool)
            .await
            .unwrap();
        saved
    }
}
