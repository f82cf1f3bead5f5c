//! # SCS 웹 서버 진입점
//!
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션
//! 4. 메일 발송기(SMTP), 이미지 저장소(S3) 준비
//! 5. 라우터 조립 후 HTTP 서버 시작

use std::{str::FromStr, sync::Arc};

use anyhow::Result;
use scs::{
    config::Config,
    db::MIGRATOR,
    services::{mail::SmtpMailer, storage::S3Storage},
    AppState,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scs=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting SCS server on {}:{}", config.host, config.port);

    // 외래키 제약(ON DELETE CASCADE)은 sqlx SQLite 연결에서 기본으로 켜져 있습니다.
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;

    let mailer = SmtpMailer::new(&config.smtp)?;
    let storage = S3Storage::from_config(&config.s3).await;
    tracing::info!(bucket = %config.s3.bucket, region = %config.s3.region, "S3 storage ready");

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(pool, config, Arc::new(mailer), Arc::new(storage));
    let app = scs::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
