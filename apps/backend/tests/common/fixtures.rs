//! Test fixtures and factory functions for request bodies.

use serde_json::json;
use uuid::Uuid;

/// Create a submit essay request body.
pub fn submit_essay_request(user_id: i64, title: &str, content: &str) -> serde_json::Value {
    json!({ "userId": user_id, "title": title, "content": content })
}

/// Create an update essay request body.
pub fn update_essay_request(title: &str, content: &str) -> serde_json::Value {
    json!({ "title": title, "content": content })
}

/// Create a register request body.
pub fn register_request(username: &str, password: &str, email: &str) -> serde_json::Value {
    json!({ "username": username, "password": password, "email": email })
}

/// Create a login request body.
pub fn login_request(username: &str, password: &str) -> serde_json::Value {
    json!({ "username": username, "password": password })
}

/// Create an update account request body.
pub fn update_account_request(username: &str, password: &str, email: &str) -> serde_json::Value {
    json!({ "username": username, "password": password, "email": email })
}

/// Generate a unique username to avoid collisions in a shared database.
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
