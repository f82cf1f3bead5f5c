//! 요청 본문 검증 헬퍼. 실패하면 400 `BadRequest`를 돌려줍니다.

use crate::error::AppError;
use crate::services::password::VERIFICATION_CODE_LEN;

pub fn non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{field} should not be empty")));
    }
    Ok(())
}

/// 길이는 바이트가 아니라 문자 수로 셉니다.
pub fn length_between(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::bad_request(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), AppError> {
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        });
    if !valid || value.contains(char::is_whitespace) {
        return Err(AppError::bad_request("email must be an email"));
    }
    Ok(())
}

pub fn verification_code(value: &str) -> Result<(), AppError> {
    if value.chars().count() != VERIFICATION_CODE_LEN {
        return Err(AppError::bad_request(format!(
            "verificationCode must be {VERIFICATION_CODE_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_emails() {
        assert!(email("kim@example.com").is_ok());
        assert!(email("kim@example").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("kim @example.com").is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(length_between("content", "댓글", 1, 2).is_ok());
        assert!(length_between("content", "", 1, 200).is_err());
        assert!(length_between("password", "short", 8, 32).is_err());
    }

    #[test]
    fn blank_is_empty() {
        assert!(non_empty("nickname", "   ").is_err());
        assert!(non_empty("nickname", "kim").is_ok());
    }

    #[test]
    fn code_must_have_six_chars() {
        assert!(verification_code("a1b2c3").is_ok());
        assert!(verification_code("a1b2c").is_err());
    }
}
