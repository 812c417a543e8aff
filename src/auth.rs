use bcrypt::{hash, verify, BcryptError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Bcrypt(#[from] BcryptError),
    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

/// bcrypt is deliberately slow, so both directions run on the blocking pool.
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, AuthError> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_is_salted_and_verifies() {
        let first = hash_password("hunter2", TEST_COST).unwrap();
        let second = hash_password("hunter2", TEST_COST).unwrap();

        assert_ne!(first, "hunter2");
        assert_ne!(first, second);
        assert!(verify_password("hunter2", &first).unwrap());
        assert!(verify_password("hunter2", &second).unwrap());
        assert!(!verify_password("hunter3", &first).unwrap());
    }

    #[test]
    fn hash_records_its_cost() {
        let hashed = hash_password("pw", TEST_COST).unwrap();
        assert!(hashed.starts_with("$2b$04$"));
    }

    #[test]
    fn garbage_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("pw", "not-a-bcrypt-hash").is_err());
    }

    #[tokio::test]
    async fn blocking_wrappers_round_trip() {
        let hashed = hash_password_blocking("pw".into(), TEST_COST).await.unwrap();
        assert!(verify_password_blocking("pw".into(), hashed.clone()).await.unwrap());
        assert!(!verify_password_blocking("nope".into(), hashed).await.unwrap());
    }
}
