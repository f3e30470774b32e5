//! Login flow: salt handout, then hash comparison and token issue.
//!
//! The server never sees a plaintext password here. The client fetches the
//! account's salt, computes `sha256_hex(password + salt)` locally, and
//! submits only the hash. A failed comparison and an unknown login both
//! answer 401 with the same message.

use chrono::Utc;
use validator::Validate;

use fork_auth::verify_hash;
use fork_core::{
	Error, LoginReference, LoginRequest, LoginResponse, LoginSaltResponse, Result,
};

use crate::http::{Request, Response};
use crate::routing::AppState;

const BAD_CREDENTIALS: &str = "Invalid login or password.";

/// `PUT /api/login/salt` — hands out the salt material for an account.
///
/// Unknown logins get 404 here; the account list is not treated as secret
/// and the desktop client relies on the distinction to prompt for signup.
pub async fn salt(state: &AppState, request: &Request) -> Result<Response> {
	let payload: LoginReference = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;

	let account = state
		.store
		.find_account_by_login(&payload.login)
		.await?
		.ok_or(Error::NotFound("account"))?;
	let security = state
		.store
		.account_security(account.id)
		.await?
		.ok_or(Error::NotFound("account"))?;

	Response::ok().with_json(&LoginSaltResponse {
		hash_type: security.hash_type,
		salt: security.salt,
	})
}

/// `POST /api/login` — compares precomputed hashes and issues a token.
pub async fn login(state: &AppState, request: &Request) -> Result<Response> {
	let payload: LoginRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;

	let account = state
		.store
		.find_account_by_login(&payload.login)
		.await?
		.ok_or_else(|| Error::Unauthorized(BAD_CREDENTIALS.to_string()))?;
	let security = state
		.store
		.account_security(account.id)
		.await?
		.ok_or_else(|| Error::Unauthorized(BAD_CREDENTIALS.to_string()))?;

	if !verify_hash(&security, &payload.hash) {
		return Err(Error::Unauthorized(BAD_CREDENTIALS.to_string()));
	}

	let access = state.tokens.issue(&account, Utc::now())?;
	tracing::info!(login = %account.login, "login succeeded");

	Response::ok().with_json(&LoginResponse {
		login: account.login,
		role: account.role,
		access_token: access.token,
		access_valid_to: access.valid_to,
	})
}
