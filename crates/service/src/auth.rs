//! Account registration and login.
//!
//! Passwords are hashed with Argon2id. The account store is a collaborator
//! trait, so the service runs unchanged against `PostgreSQL` or the
//! in-memory store.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use boardshipper_core::{Email, EmailError};

use crate::models::{Account, SenderProfile};
use crate::store::{AccountStore, StoreError};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (wrong password or unknown account).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("account already exists")]
    AccountAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Authentication service over an account store.
pub struct AuthService<S> {
    accounts: S,
}

impl<S: AccountStore> AuthService<S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(accounts: S) -> Self {
        Self { accounts }
    }

    /// Register a new business account with its sender profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::WeakPassword` if the password doesn't meet requirements,
    /// and `AuthError::AccountAlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        profile: SenderProfile,
    ) -> Result<Account, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        self.accounts
            .create(&email, &password_hash, profile)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::AccountAlreadyExists,
                other => AuthError::Store(other),
            })
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or a
    /// wrong password; callers cannot tell the two apart.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = Email::parse(email)?;

        let (account, password_hash) = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(account)
    }

    /// Fetch the sender profile for an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the lookup fails.
    pub async fn sender_profile(
        &self,
        account: &Account,
    ) -> Result<Option<SenderProfile>, AuthError> {
        Ok(self.accounts.sender_profile(account.id).await?)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn profile() -> SenderProfile {
        SenderProfile {
            business_name: "Board Barn".to_owned(),
            street_address: "1 Shaper Way".to_owned(),
            city: "Oceanside".to_owned(),
            state: "CA".to_owned(),
            zip_code: "92054".to_owned(),
            country: "United States".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login_roundtrip() {
        let auth = AuthService::new(MemoryStore::new());

        let account = auth
            .register("shop@surfco.com", "correct horse battery", profile())
            .await
            .unwrap();
        assert_eq!(account.email.as_str(), "shop@surfco.com");

        let logged_in = auth
            .login("shop@surfco.com", "correct horse battery")
            .await
            .unwrap();
        assert_eq!(logged_in.id, account.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = AuthService::new(MemoryStore::new());
        auth.register("shop@surfco.com", "correct horse battery", profile())
            .await
            .unwrap();

        let err = auth
            .login("shop@surfco.com", "wrong password!")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let auth = AuthService::new(MemoryStore::new());

        let err = auth
            .login("nobody@surfco.com", "whatever password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let auth = AuthService::new(MemoryStore::new());
        auth.register("shop@surfco.com", "correct horse battery", profile())
            .await
            .unwrap();

        let err = auth
            .register("shop@surfco.com", "another password", profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountAlreadyExists));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let auth = AuthService::new(MemoryStore::new());

        let err = auth
            .register("shop@surfco.com", "short", profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_sender_profile_fetch() {
        let auth = AuthService::new(MemoryStore::new());
        let account = auth
            .register("shop@surfco.com", "correct horse battery", profile())
            .await
            .unwrap();

        let stored = auth.sender_profile(&account).await.unwrap().unwrap();
        assert_eq!(stored, profile());
    }
}
