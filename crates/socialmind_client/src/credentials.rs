//! crates/socialmind_client/src/credentials.rs
//!
//! Where the dashboard keeps its Graph API token between requests.

use socialmind_core::domain::AccessToken;
use std::sync::RwLock;

/// Storage for the single bearer credential attached to outgoing requests.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<AccessToken>;
    fn store(&self, token: AccessToken);
    fn clear(&self);
}

/// Keeps the token in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<AccessToken> {
        // A poisoned lock still holds a usable value.
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store(&self, token: AccessToken) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
    }

    fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}
