//! 비밀번호 해싱(Argon2id)과 이메일 인증 코드 생성

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::{OsRng, RngCore};

use crate::error::AppError;

const CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const VERIFICATION_CODE_LEN: usize = 6;

/// PHC 형식 해시 문자열(솔트와 파라미터 포함)을 반환합니다.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 숫자와 영문 소문자로 된 6자리 인증 코드
pub fn generate_verification_code() -> String {
    (0..VERIFICATION_CODE_LEN)
        .map(|_| {
            let index = OsRng.next_u32() as usize % CODE_ALPHABET.len();
            CODE_ALPHABET[index] as char
        })
        .collect()
}
