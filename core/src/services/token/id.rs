//! Token-id generation.
//!
//! Token ids serve both as JWT `jti` values and as refresh-token handles,
//! so they must be unpredictable: 16 bytes from the OS entropy source,
//! encoded as 32 lowercase hex characters.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::error;

use crate::errors::{DomainError, TokenError};

/// Entropy drawn per token id.
pub const TOKEN_ID_BYTES: usize = 16;

/// Generate a fresh token id.
///
/// An entropy-source failure aborts the issuing operation; nothing is
/// persisted in that case.
pub fn generate_token_id() -> Result<String, DomainError> {
    let mut bytes = [0u8; TOKEN_ID_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
        error!("OS entropy source failure: {}", e);
        DomainError::Token(TokenError::IssuanceFailed)
    })?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_32_lowercase_hex_chars() {
        let id = generate_token_id().unwrap();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn ids_do_not_collide() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_token_id().unwrap()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
