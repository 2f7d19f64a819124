#[cfg(test)]
use mockall::automock;
use {
    crate::{
        api::RestError,
        kernel::entities::UserId,
    },
    axum::async_trait,
    serde::{
        Deserialize,
        Serialize,
    },
    std::fmt::Debug,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

/// Identity established by the external provider for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Claims {
    pub uid:  UserId,
    pub role: Role,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Seam to the external identity provider. The server never inspects bearer
/// credentials itself.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenVerifier: Debug + Send + Sync + 'static {
    async fn verify_token(&self, token: &str) -> Result<Claims, RestError>;
}

#[derive(Deserialize)]
struct TokenInfoResponse {
    uid:  UserId,
    /// The role claim is optional on the provider side.
    role: Option<Role>,
}

/// Verifies bearer tokens against the provider's token-info endpoint.
#[derive(Clone, Debug)]
pub struct HttpTokenVerifier {
    client:         reqwest::Client,
    token_info_url: String,
}

impl HttpTokenVerifier {
    pub fn new(token_info_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_info_url,
        }
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify_token(&self, token: &str) -> Result<Claims, RestError> {
        let response = self
            .client
            .post(&self.token_info_url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "Failed to reach identity provider");
                RestError::TemporarilyUnavailable
            })?;

        if response.status().is_client_error() {
            return Err(RestError::InvalidToken);
        }

        let info: TokenInfoResponse = response
            .error_for_status()
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "Identity provider returned an error");
                RestError::TemporarilyUnavailable
            })?
            .json()
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "Failed to parse token info response");
                RestError::TemporarilyUnavailable
            })?;

        Ok(Claims {
            uid:  info.uid,
            role: info.role.unwrap_or(Role::Buyer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_claim_is_optional() {
        let info: TokenInfoResponse = serde_json::from_str(r#"{"uid": "user-1"}"#).unwrap();
        assert_eq!(info.uid, "user-1");
        assert_eq!(info.role, None);

        let info: TokenInfoResponse =
            serde_json::from_str(r#"{"uid": "user-2", "role": "admin"}"#).unwrap();
        assert_eq!(info.role, Some(Role::Admin));
    }
}
