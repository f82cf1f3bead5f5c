//! # 메일 발송
//!
//! 서비스 계층은 `Mailer` 트레이트에만 의존합니다.
//! 운영 환경에서는 `SmtpMailer`(lettre)를 `AppState`에 넣고,
//! 테스트에서는 보낸 코드를 기록만 하는 구현을 넣습니다.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::error::AppError;

pub const VERIFICATION_SUBJECT: &str = "Study Computer Science - Email Verification";

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), AppError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// STARTTLS로 SMTP 서버에 연결하는 발송기를 만듭니다.
    /// 실제 연결은 첫 발송 시점에 맺어집니다.
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        if config.host.is_empty() {
            anyhow::bail!("SMTP_HOST is not set");
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from.parse()?,
        })
    }
}

fn verification_body(code: &str) -> String {
    format!(
        "<h2>Study Computer Science</h2>\
         <p>아래 인증 코드를 회원가입 화면에 입력해 주세요.</p>\
         <p style=\"font-size:24px;font-weight:bold;letter-spacing:4px\">{code}</p>"
    )
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid recipient {to}: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(VERIFICATION_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(verification_body(code))
            .map_err(|e| AppError::internal(format!("Failed to build mail: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::internal(format!("Failed to send mail: {e}")))?;

        Ok(())
    }
}
