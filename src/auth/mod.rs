//! Authentication for mediabin: credential storage, password hashing,
//! registration/login, and session management.

pub mod credentials;
pub mod password;
pub mod service;
pub mod session;

pub use credentials::{CredentialStore, User};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::AuthService;
pub use session::{AuthSession, SessionManager};
