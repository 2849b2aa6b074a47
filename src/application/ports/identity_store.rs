use async_trait::async_trait;

use crate::domain::UserIdentity;

/// Local persistence for the signed-in user's claims record.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn load(&self) -> Result<UserIdentity, IdentityError>;

    async fn save(&self, identity: &UserIdentity) -> Result<(), IdentityError>;

    async fn clear(&self) -> Result<(), IdentityError>;

    async fn is_authenticated(&self) -> bool {
        self.load().await.is_ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("user not authenticated")]
    NotAuthenticated,
    #[error("invalid user data: {0}")]
    Invalid(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
