use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims record handed back by the identity provider after sign-in.
///
/// `sub` is the only claim the chat backend cares about; it is sent as
/// `user_id` on every gateway call. Everything else rides along untouched so
/// the record can be written back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl UserIdentity {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: None,
            name: None,
            claims: Map::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Decodes the payload segment of a JWT without verifying its signature.
    ///
    /// Only use on tokens received directly from the token endpoint.
    pub fn from_id_token(token: &str) -> Result<Self, IdTokenError> {
        let payload = token.split('.').nth(1).ok_or(IdTokenError::Malformed)?;
        let bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| IdTokenError::Decode(e.to_string()))?;
        let identity: UserIdentity =
            serde_json::from_slice(&bytes).map_err(|e| IdTokenError::Decode(e.to_string()))?;

        if identity.sub.trim().is_empty() {
            return Err(IdTokenError::MissingSubject);
        }
        Ok(identity)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdTokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("payload decode failed: {0}")]
    Decode(String),
    #[error("token has no subject claim")]
    MissingSubject,
}
