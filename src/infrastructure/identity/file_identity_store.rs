use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{IdentityError, IdentityStore};
use crate::domain::UserIdentity;

/// Keeps the claims record as a JSON file, the desktop analogue of the
/// browser's `userDetails` local-storage key.
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IdentityStore for FileIdentityStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<UserIdentity, IdentityError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(IdentityError::NotAuthenticated);
            }
            Err(e) => return Err(IdentityError::Io(e)),
        };

        let identity: UserIdentity =
            serde_json::from_str(&raw).map_err(|e| IdentityError::Invalid(e.to_string()))?;

        if identity.sub.trim().is_empty() {
            return Err(IdentityError::Invalid("empty sub claim".to_string()));
        }
        Ok(identity)
    }

    #[tracing::instrument(skip(self, identity), fields(path = %self.path.display()))]
    async fn save(&self, identity: &UserIdentity) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(identity)
            .map_err(|e| IdentityError::Invalid(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;

        tracing::info!(user_id = %identity.user_id(), "Stored identity");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<(), IdentityError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IdentityError::Io(e)),
        }
    }
}
