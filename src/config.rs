//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수(`.env` 포함)에서 서버 설정값을 읽어옵니다.
//!
//! 필수 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `JWT_ACCESS_SECRET` / `JWT_REFRESH_SECRET`: 토큰 종류별 서명 키
//!
//! 나머지(만료 시간, SMTP, S3, CORS, HOST/PORT)는 기본값이 있습니다.

use std::env;

/// 애플리케이션 전체 설정
///
/// 서버 시작 시 한 번 읽어서 `AppState`에 담아 공유합니다.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
    pub s3: S3Config,
    /// CORS 허용 출처 목록 (`CORS_ORIGINS`, 쉼표 구분)
    pub cors_origins: Vec<String>,
    pub host: String,
    pub port: u16,
}

/// JWT 서명 키와 만료 시간(초)
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// 발신자 주소 (예: `"SCS" <admin@example.com>`)
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub region: String,
    pub bucket: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`, `JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET` 중 하나라도 없으면
    /// `VarError`를 반환합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        let smtp_username = env::var("SMTP_EMAIL").unwrap_or_default();

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt: JwtConfig {
                access_secret: env::var("JWT_ACCESS_SECRET")?,
                refresh_secret: env::var("JWT_REFRESH_SECRET")?,
                access_expires_in: parse_or("JWT_ACCESS_EXPIRES_IN", 60 * 60),
                refresh_expires_in: parse_or("JWT_REFRESH_EXPIRES_IN", 60 * 60 * 24 * 14),
            },
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").unwrap_or_default(),
                port: parse_or("SMTP_PORT", 587),
                from: env::var("MAIL_FROM")
                    .unwrap_or_else(|_| format!("\"SCS\" <{}>", smtp_username)),
                username: smtp_username,
                password: env::var("SMTP_PASS").unwrap_or_default(),
            },
            s3: S3Config {
                region: env::var("AWS_S3_REGION").unwrap_or_else(|_| "ap-northeast-2".to_string()),
                bucket: env::var("AWS_S3_BUCKET_NAME").unwrap_or_else(|_| "scs-images".to_string()),
            },
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 4000),
        })
    }
}

/// 숫자형 환경변수를 읽고, 없거나 파싱에 실패하면 기본값을 씁니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
