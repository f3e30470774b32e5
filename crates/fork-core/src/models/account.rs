//! Account entity and its request/response shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::ticket::Ticket;

/// Access role carried in the JWT and checked by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum AccountRole {
	Administrator,
	Manager,
	Developer,
}

/// A registered user of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	pub id: i64,
	pub login: String,
	pub first_name: String,
	pub last_name: String,
	pub role: AccountRole,
}

/// Password verification material for one account.
///
/// The server stores and compares precomputed hashes only; plaintext never
/// crosses the wire on the login path. The record lives and dies with its
/// account row and is never serialized into a response.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AccountSecurity {
	/// Hex digest of `password + salt` under the algorithm named by `hash_type`.
	pub hash: String,
	/// Algorithm tag the client must apply, e.g. `"SHA256"`.
	pub hash_type: String,
	/// Per-account salt appended to the password before hashing.
	pub salt: String,
}

/// Account detail read, optionally carrying the assigned tickets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
	#[serde(flatten)]
	pub account: Account,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tickets: Option<Vec<Ticket>>,
}

/// Payload for `POST /api/account`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
	/// Must be absent or zero; the store assigns ids.
	#[serde(default)]
	pub id: i64,
	#[validate(email(message = "Login must be an email address."))]
	#[validate(length(max = 256, message = "Login is too long."))]
	pub login: String,
	#[serde(default)]
	#[validate(length(max = 256, message = "First name is too long."))]
	pub first_name: String,
	#[serde(default)]
	#[validate(length(max = 256, message = "Last name is too long."))]
	pub last_name: String,
	pub role: AccountRole,
	/// Initial password; the security record is built server-side from it.
	#[validate(length(min = 1, max = 256, message = "Password is required."))]
	pub password: String,
	/// Rejected when non-empty: assignments go through the ticket endpoints.
	#[serde(default)]
	pub tickets: Option<Vec<serde_json::Value>>,
}

/// Payload for `PUT /api/account`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditAccountRequest {
	pub id: i64,
	#[validate(email(message = "Login must be an email address."))]
	#[validate(length(max = 256, message = "Login is too long."))]
	pub login: String,
	#[serde(default)]
	#[validate(length(max = 256, message = "First name is too long."))]
	pub first_name: String,
	#[serde(default)]
	#[validate(length(max = 256, message = "Last name is too long."))]
	pub last_name: String,
	pub role: AccountRole,
	/// Rejected when non-empty: assignments go through the ticket endpoints.
	#[serde(default)]
	pub tickets: Option<Vec<serde_json::Value>>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use validator::Validate;

	#[test]
	fn create_request_rejects_bad_email() {
		let request: CreateAccountRequest = serde_json::from_value(serde_json::json!({
			"login": "not-an-email",
			"role": "Developer",
			"password": "secret",
		}))
		.unwrap();

		assert!(request.validate().is_err());
	}

	#[test]
	fn create_request_accepts_minimal_payload() {
		let request: CreateAccountRequest = serde_json::from_value(serde_json::json!({
			"login": "dev@example.com",
			"role": "Developer",
			"password": "secret",
		}))
		.unwrap();

		assert!(request.validate().is_ok());
		assert_eq!(request.id, 0);
		assert!(request.tickets.is_none());
	}

	#[test]
	fn account_serializes_camel_case_without_security() {
		let account = Account {
			id: 7,
			login: "dev@example.com".to_string(),
			first_name: "Ada".to_string(),
			last_name: "Lovelace".to_string(),
			role: AccountRole::Manager,
		};

		let json = serde_json::to_value(&account).unwrap();
		assert_eq!(json["firstName"], "Ada");
		assert_eq!(json["role"], "Manager");
		assert!(json.get("hash").is_none());
	}
}
