//! Registration and login against the credential store.

use tracing::info;

use super::credentials::{CredentialStore, User};
use super::password::{hash_password, verify_password};
use crate::{MediabinError, Result};

/// Authentication service.
///
/// Each operation performs its own load of the credential store; callers hold
/// this service behind a single lock so the register read-modify-write cannot
/// interleave with another writer.
#[derive(Debug)]
pub struct AuthService {
    store: CredentialStore,
}

impl AuthService {
    /// Create a new authentication service over the given store.
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// The underlying credential store.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Register a new user.
    ///
    /// Fails with `Validation` when username or password is empty and with
    /// `Conflict` when the username is already taken. The password is never
    /// persisted in plaintext.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() || password.is_empty() {
            return Err(MediabinError::Validation(
                "Username and password are required.".to_string(),
            ));
        }

        let mut users = self.store.load()?;
        if users.contains_key(username) {
            return Err(MediabinError::Conflict("User already exists.".to_string()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| MediabinError::Io(std::io::Error::other(e.to_string())))?;

        users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password_hash,
            },
        );
        self.store.save(&users)?;

        info!(username, "registered new user");
        Ok(())
    }

    /// Verify credentials and return the matching user.
    ///
    /// Fails with `Auth` when the user is unknown or the password does not
    /// match the stored hash.
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let users = self.store.load()?;
        let user = users
            .get(username)
            .ok_or_else(|| MediabinError::Auth("invalid username or password".to_string()))?;

        verify_password(password, &user.password_hash)
            .map_err(|_| MediabinError::Auth("invalid username or password".to_string()))?;

        Ok(user.clone())
    }
}
