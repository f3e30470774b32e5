//! Account endpoints.

use validator::Validate;

use fork_auth::build_security;
use fork_core::{
	AccountDetail, CreateAccountRequest, EditAccountRequest, Error, Result,
};

use crate::controllers::{include_flag, page_params, reject_embedded, require_empty_id};
use crate::http::{Request, Response};
use crate::routing::AppState;

pub async fn list(state: &AppState, request: &Request) -> Result<Response> {
	let (limit, offset) = page_params(request)?;
	let accounts = state.store.list_accounts(limit, offset).await?;
	Response::ok().with_json(&accounts)
}

pub async fn get(state: &AppState, request: &Request, id: i64) -> Result<Response> {
	let account = state
		.store
		.get_account(id)
		.await?
		.ok_or(Error::NotFound("account"))?;

	let tickets = if include_flag(request, "includeTickets") {
		Some(state.store.tickets_for_account(id).await?)
	} else {
		None
	};

	Response::ok().with_json(&AccountDetail { account, tickets })
}

/// Resolves the caller from the bearer token and returns their account.
pub async fn me(state: &AppState, request: &Request) -> Result<Response> {
	let token = request
		.bearer_token()
		.ok_or_else(|| Error::Unauthorized("Missing bearer token.".to_string()))?;
	let claims = state.tokens.verify(token)?;
	let id: i64 = claims
		.sub
		.parse()
		.map_err(|_| Error::Unauthorized("Malformed subject claim.".to_string()))?;

	let account = state
		.store
		.get_account(id)
		.await?
		.ok_or(Error::NotFound("account"))?;
	Response::ok().with_json(&account)
}

pub async fn create(state: &AppState, request: &Request) -> Result<Response> {
	let payload: CreateAccountRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	require_empty_id(payload.id)?;
	reject_embedded(&payload.tickets, "tickets")?;

	if state.store.is_login_used(&payload.login, None).await? {
		return Err(Error::validation("login", "Login is already used."));
	}

	let security = build_security(&payload.password);
	let account = state
		.store
		.create_account(
			&payload.login,
			&payload.first_name,
			&payload.last_name,
			payload.role,
			&security,
		)
		.await?;
	Response::created().with_json(&account)
}

pub async fn update(state: &AppState, request: &Request) -> Result<Response> {
	let payload: EditAccountRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	reject_embedded(&payload.tickets, "tickets")?;

	let existing = state
		.store
		.get_account(payload.id)
		.await?
		.ok_or(Error::NotFound("account"))?;

	// login doubles as the token subject's identity, so it never changes
	if payload.login != existing.login {
		return Err(Error::validation("login", "Login cannot be changed."));
	}

	let account = state
		.store
		.update_account(
			payload.id,
			&payload.first_name,
			&payload.last_name,
			payload.role,
		)
		.await?
		.ok_or(Error::NotFound("account"))?;
	Response::ok().with_json(&account)
}

pub async fn delete(state: &AppState, id: i64) -> Result<Response> {
	if !state.store.delete_account(id).await? {
		return Err(Error::NotFound("account"));
	}
	Ok(Response::no_content())
}
