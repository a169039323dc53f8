//! Account registration, login and profile updates.
//!
//! Passwords are stored and compared as plain text.

use chrono::Utc;

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::{Account, NewAccount};

pub async fn register(store: &dyn Store, username: &str, password: &str, email: &str) -> Result<Account> {
    if store.username_exists(username).await? {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }
    if store.email_exists(email).await? {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let account = store
        .create_account(&NewAccount {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!("Registered new user: {}", account.id);
    Ok(account)
}

/// Unknown usernames and wrong passwords fail the same way.
pub async fn login(store: &dyn Store, username: &str, password: &str) -> Result<Account> {
    match store.get_account_by_username(username).await? {
        Some(account) if account.password == password => Ok(account),
        _ => Err(ApiError::InvalidCredentials),
    }
}

/// Placeholder session token handed out on login.
pub fn session_token(account: &Account) -> String {
    format!("token_{}", account.id)
}

pub async fn fetch(store: &dyn Store, id: i64) -> Result<Account> {
    store
        .get_account(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} does not exist", id)))
}

/// Overwrite username, password and email.
///
/// Taking another account's username or email is rejected by the store.
pub async fn update(
    store: &dyn Store,
    id: i64,
    username: &str,
    password: &str,
    email: &str,
) -> Result<Account> {
    let mut account = fetch(store, id).await?;
    account.username = username.to_string();
    account.password = password.to_string();
    account.email = email.to_string();

    store
        .update_account(&account)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} does not exist", id)))
}
