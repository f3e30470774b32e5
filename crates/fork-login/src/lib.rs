//! Client for the fork-back login flow.
//!
//! The password never leaves the machine: [`LoginClient::login`] fetches the
//! account's salt, computes `sha256_hex(password + salt)` locally, and sends
//! only the hash. The resulting bearer token is good for one hour.

use reqwest::StatusCode;
use thiserror::Error;

use fork_auth::{HASH_TYPE_SHA256, sha256_hex};
use fork_core::{Account, LoginReference, LoginRequest, LoginResponse, LoginSaltResponse};

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// Structured refusal from the server, with the problem-body title.
	#[error("server answered {status}: {title}")]
	Api { status: StatusCode, title: String },

	/// The server advertises a hash scheme this client cannot compute.
	#[error("unsupported hash type {0:?}")]
	UnsupportedHashType(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Computes the hash the server expects for this salt.
pub fn client_hash(password: &str, salt: &str) -> String {
	sha256_hex(&format!("{password}{salt}"))
}

pub struct LoginClient {
	base_url: String,
	http: reqwest::Client,
}

impl LoginClient {
	/// `base_url` is the server root, e.g. `http://127.0.0.1:5000`.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			http: reqwest::Client::new(),
		}
	}

	/// Fetches the salt material for `login`.
	pub async fn fetch_salt(&self, login: &str) -> Result<LoginSaltResponse> {
		let response = self
			.http
			.put(format!("{}/api/login/salt", self.base_url))
			.json(&LoginReference {
				login: login.to_string(),
			})
			.send()
			.await?;
		deserialize(response).await
	}

	/// Runs the full flow: salt, local hash, then token issue.
	pub async fn login(&self, login: &str, password: &str) -> Result<LoginResponse> {
		let salt = self.fetch_salt(login).await?;
		if salt.hash_type != HASH_TYPE_SHA256 {
			return Err(ClientError::UnsupportedHashType(salt.hash_type));
		}

		let response = self
			.http
			.post(format!("{}/api/login", self.base_url))
			.json(&LoginRequest {
				login: login.to_string(),
				hash: client_hash(password, &salt.salt),
			})
			.send()
			.await?;
		deserialize(response).await
	}

	/// Resolves the account behind a bearer token.
	pub async fn me(&self, token: &str) -> Result<Account> {
		let response = self
			.http
			.get(format!("{}/api/account/me", self.base_url))
			.bearer_auth(token)
			.send()
			.await?;
		deserialize(response).await
	}
}

/// Decodes a success body, or lifts the problem-body title into an error.
async fn deserialize<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
	let status = response.status();
	if status.is_success() {
		return Ok(response.json().await?);
	}

	let title = response
		.json::<serde_json::Value>()
		.await
		.ok()
		.and_then(|body| body.get("title").and_then(|t| t.as_str()).map(String::from))
		.unwrap_or_else(|| status.to_string());
	Err(ClientError::Api { status, title })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn hash_is_password_concatenated_with_salt() {
		// matches sha256("hunter2SALT")
		assert_eq!(
			client_hash("hunter2", "SALT"),
			"4499588202be3cf1154e5c4ab000f8fc7caf5ee117c7b8dfc9e07c15c510c818"
		);
	}

	#[rstest]
	fn base_url_trailing_slash_is_trimmed() {
		let client = LoginClient::new("http://localhost:5000/");
		assert_eq!(client.base_url, "http://localhost:5000");
	}

	#[rstest]
	fn api_error_displays_title() {
		let error = ClientError::Api {
			status: StatusCode::UNAUTHORIZED,
			title: "Invalid login or password.".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"server answered 401 Unauthorized: Invalid login or password."
		);
	}
}
