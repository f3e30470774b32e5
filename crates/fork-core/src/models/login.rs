//! Login flow request/response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::account::AccountRole;

/// Payload for `PUT /api/login/salt`: names the account to fetch salt for.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginReference {
	#[validate(email(message = "Login must be an email address."))]
	#[validate(length(max = 256, message = "Login is too long."))]
	pub login: String,
}

/// Salt material the client needs to precompute the password hash.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSaltResponse {
	/// Algorithm tag, e.g. `"SHA256"`.
	pub hash_type: String,
	pub salt: String,
}

/// Payload for `POST /api/login`: the client-side hash, never the plaintext.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	#[validate(email(message = "Login must be an email address."))]
	#[validate(length(max = 256, message = "Login is too long."))]
	pub login: String,
	#[validate(length(min = 1, max = 256, message = "Hash is required."))]
	pub hash: String,
}

/// Successful login: a signed time-bounded bearer token plus account basics.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	pub login: String,
	pub role: AccountRole,
	pub access_token: String,
	pub access_valid_to: DateTime<Utc>,
}
