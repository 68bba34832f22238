//! API DTOs (Data Transfer Objects)
//!
//! Field names are part of the wire contract: the token endpoint follows
//! the OAuth2 password-grant response shape.

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Registration request (JSON body)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Token (login)
// ============================================================================

/// Login request (form body, OAuth2 password-grant shape)
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

// ============================================================================
// Email verification
// ============================================================================

/// Successful redemption response
#[derive(Debug, Clone, Serialize)]
pub struct RedeemResponse {
    pub detail: String,
}

impl RedeemResponse {
    pub fn access() -> Self {
        Self {
            detail: "Access".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_shape() {
        let response = TokenResponse::bearer("tok".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["token_type"], "bearer");
    }

    #[test]
    fn test_redeem_response_shape() {
        let json = serde_json::to_value(RedeemResponse::access()).unwrap();
        assert_eq!(json["detail"], "Access");
    }
}
