use serde::{Deserialize, Serialize};

// ============ Authentication ============

/// The signed-in identity as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Company domain the account answers mail for
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub domain: String,
}

/// Login/registration result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub user: UserProfile,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Result of `POST /auth/refresh`; the server may rotate the refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_tokens_camel_case() {
        let json = r#"{
            "user": {"id": "u1", "email": "a@b.com", "name": "Ann", "domain": "b.com"},
            "accessToken": "tok",
            "refreshToken": "ref"
        }"#;
        let tokens: AuthTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "tok");
        assert_eq!(tokens.refresh_token.as_deref(), Some("ref"));
        assert_eq!(tokens.user.domain.as_deref(), Some("b.com"));
    }

    #[test]
    fn test_refresh_token_optional() {
        let tokens: RefreshedToken = serde_json::from_str(r#"{"accessToken": "new"}"#).unwrap();
        assert_eq!(tokens.access_token, "new");
        assert!(tokens.refresh_token.is_none());
    }
}
