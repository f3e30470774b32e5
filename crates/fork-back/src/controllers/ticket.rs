//! Ticket endpoints: CRUD, the lifecycle state sub-resource, and account
//! assignment.
//!
//! Every state change flows through [`fork_core::apply_state`]; nothing
//! here stamps a date itself. Writes go through the revision counter, so a
//! caller that sends the revision it read gets compare-and-set semantics.

use chrono::Utc;
use validator::Validate;

use fork_core::{
	CreateTicketRequest, EditTicketRequest, EpicDetail, Error, Result, Ticket, TicketDetail,
	TicketStateRequest, TicketStateView, apply_state,
};

use crate::controllers::{
	filter_id, include_flag, page_params, reject_embedded, require_empty_id,
};
use crate::http::{Request, Response};
use crate::routing::AppState;

pub async fn list(state: &AppState, request: &Request) -> Result<Response> {
	let (limit, offset) = page_params(request)?;
	let epic_id = filter_id(request, "epicId")?;
	let tickets = state.store.list_tickets(epic_id, limit, offset).await?;
	Response::ok().with_json(&tickets)
}

pub async fn get(state: &AppState, request: &Request, id: i64) -> Result<Response> {
	let ticket = state
		.store
		.get_ticket(id)
		.await?
		.ok_or(Error::NotFound("ticket"))?;

	let epic = if include_flag(request, "includeEpic") {
		match state.store.get_epic(ticket.epic_id).await? {
			Some(epic) => {
				let project = if include_flag(request, "thenIncludeEpicProject") {
					state.store.get_project(epic.project_id).await?
				} else {
					None
				};
				Some(EpicDetail {
					epic,
					project,
					tickets: None,
				})
			}
			None => None,
		}
	} else {
		None
	};
	let accounts = if include_flag(request, "includeAccounts") {
		Some(state.store.accounts_for_ticket(id).await?)
	} else {
		None
	};

	Response::ok().with_json(&TicketDetail {
		ticket,
		epic,
		accounts,
	})
}

/// New tickets always start in `Triage` with only the creation date set;
/// any timestamps in the payload shape are ignored by construction.
pub async fn create(state: &AppState, request: &Request) -> Result<Response> {
	let payload: CreateTicketRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	require_empty_id(payload.id)?;
	reject_embedded(&payload.accounts, "accounts")?;
	reject_embedded(&payload.epic, "epic")?;

	if !state.store.epic_exists(payload.epic_id).await? {
		return Err(Error::validation("epicId", "Epic does not exist."));
	}

	let ticket = state
		.store
		.create_ticket(payload.epic_id, &payload.title, &payload.description, Utc::now())
		.await?;
	Response::created().with_json(&ticket)
}

pub async fn update(state: &AppState, request: &Request) -> Result<Response> {
	let payload: EditTicketRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	reject_embedded(&payload.accounts, "accounts")?;
	reject_embedded(&payload.epic, "epic")?;

	let current = state
		.store
		.get_ticket(payload.id)
		.await?
		.ok_or(Error::NotFound("ticket"))?;

	if !state.store.epic_exists(payload.epic_id).await? {
		return Err(Error::validation("epicId", "Epic does not exist."));
	}

	let stamped = apply_state(&current, payload.state, Utc::now());
	let updated = Ticket {
		epic_id: payload.epic_id,
		title: payload.title,
		description: payload.description,
		..stamped
	};
	let ticket = state.store.update_ticket(&updated, payload.revision).await?;
	Response::ok().with_json(&ticket)
}

pub async fn get_state(state: &AppState, id: i64) -> Result<Response> {
	let ticket = state
		.store
		.get_ticket(id)
		.await?
		.ok_or(Error::NotFound("ticket"))?;
	Response::ok().with_json(&TicketStateView::from(&ticket))
}

pub async fn put_state(state: &AppState, request: &Request, id: i64) -> Result<Response> {
	let payload: TicketStateRequest = request.json()?;
	let current = state
		.store
		.get_ticket(id)
		.await?
		.ok_or(Error::NotFound("ticket"))?;

	// same-state requests succeed without touching the row
	if payload.state == current.state {
		return Response::ok().with_json(&TicketStateView::from(&current));
	}

	let stamped = apply_state(&current, payload.state, Utc::now());
	let ticket = state.store.update_ticket(&stamped, payload.revision).await?;
	Response::ok().with_json(&TicketStateView::from(&ticket))
}

pub async fn assign(state: &AppState, ticket_id: i64, account_id: i64) -> Result<Response> {
	if state.store.get_ticket(ticket_id).await?.is_none() {
		return Err(Error::NotFound("ticket"));
	}
	if state.store.get_account(account_id).await?.is_none() {
		return Err(Error::NotFound("account"));
	}

	state.store.assign_account(ticket_id, account_id).await?;
	Ok(Response::no_content())
}

pub async fn unassign(state: &AppState, ticket_id: i64, account_id: i64) -> Result<Response> {
	if !state.store.unassign_account(ticket_id, account_id).await? {
		return Err(Error::NotFound("assignment"));
	}
	Ok(Response::no_content())
}

pub async fn delete(state: &AppState, id: i64) -> Result<Response> {
	if !state.store.delete_ticket(id).await? {
		return Err(Error::NotFound("ticket"));
	}
	Ok(Response::no_content())
}
