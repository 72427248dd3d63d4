use anyhow::Context;

use crate::errors::AppError;

/// bcrypt work factor.
pub const HASH_COST: u32 = 10;

/// Hashes on the blocking pool; bcrypt at cost 10 takes tens of milliseconds.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .context("password hashing task panicked")?
        .context("failed to hash password")?;
    Ok(hashed)
}

/// Malformed stored hashes count as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task panicked")?
        .unwrap_or(false);
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("hunter22".to_string()).await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("hunter23".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_hash_is_a_mismatch() {
        assert!(!verify_password("pw".to_string(), "not-a-hash".to_string())
            .await
            .unwrap());
    }
}
