//! Account operations against the user repository.

use std::sync::Arc;

use chrono::Utc;
use rand::{RngExt, distr::Alphanumeric};
use tracing::info;
use uuid::Uuid;

use dataroom_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use dataroom_auth::password::PasswordHasher;
use dataroom_core::config::auth::AuthConfig;
use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_database::repositories::user::UserRepository;
use dataroom_entity::user::{CreateUser, User};

/// Length of the emailed confirmation token.
const CONFIRMATION_TOKEN_LENGTH: usize = 48;

/// Signup, login, refresh, and email confirmation.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
    /// Minimum accepted password length.
    min_password_length: usize,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(
        users: Arc<UserRepository>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            encoder,
            decoder,
            min_password_length: config.min_password_length,
        }
    }

    /// Register a new account.
    ///
    /// Returns the created user together with the confirmation token the
    /// email link carries.
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<(User, String)> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if password.len() < self.min_password_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let confirmation_token = generate_token();

        let user = self
            .users
            .create(&CreateUser {
                email,
                password_hash,
                confirmation_token: confirmation_token.clone(),
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "Account created");
        Ok((user, confirmation_token))
    }

    /// Authenticate and issue a token pair.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, &user.email, user.is_confirmed())?;

        info!(user_id = %user.id, "Login");
        Ok((user, tokens))
    }

    /// Issue a fresh token pair from a refresh token.
    ///
    /// The user row is reloaded so the confirmed flag in the new tokens is
    /// current, not the one frozen at the previous issuance.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user = self.current_user(claims.user_id()).await?;

        self.encoder
            .generate_token_pair(user.id, &user.email, user.is_confirmed())
    }

    /// Confirm an email address from its token.
    pub async fn confirm(&self, token: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_confirmation_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown or already-used confirmation token"))?;

        let user = self.users.confirm_email(user.id, Utc::now()).await?;
        info!(user_id = %user.id, "Email confirmed");
        Ok(user)
    }

    /// Load the current user by ID.
    pub async fn current_user(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }
}

/// Random alphanumeric confirmation token.
fn generate_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(CONFIRMATION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
