//! Epic endpoints.

use validator::Validate;

use fork_core::{CreateEpicRequest, EditEpicRequest, EpicDetail, Error, Result};

use crate::controllers::{
	filter_id, include_flag, page_params, reject_embedded, require_empty_id,
};
use crate::http::{Request, Response};
use crate::routing::AppState;

pub async fn list(state: &AppState, request: &Request) -> Result<Response> {
	let (limit, offset) = page_params(request)?;
	let project_id = filter_id(request, "projectId")?;
	let epics = state.store.list_epics(project_id, limit, offset).await?;
	Response::ok().with_json(&epics)
}

pub async fn get(state: &AppState, request: &Request, id: i64) -> Result<Response> {
	let epic = state
		.store
		.get_epic(id)
		.await?
		.ok_or(Error::NotFound("epic"))?;

	let project = if include_flag(request, "includeProject") {
		state.store.get_project(epic.project_id).await?
	} else {
		None
	};
	let tickets = if include_flag(request, "includeTickets") {
		Some(state.store.tickets_for_epic(id).await?)
	} else {
		None
	};

	Response::ok().with_json(&EpicDetail {
		epic,
		project,
		tickets,
	})
}

pub async fn create(state: &AppState, request: &Request) -> Result<Response> {
	let payload: CreateEpicRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	require_empty_id(payload.id)?;
	reject_embedded(&payload.tickets, "tickets")?;
	reject_embedded(&payload.project, "project")?;

	if !state.store.project_exists(payload.project_id).await? {
		return Err(Error::validation("projectId", "Project does not exist."));
	}

	let epic = state
		.store
		.create_epic(payload.project_id, &payload.title, &payload.description)
		.await?;
	Response::created().with_json(&epic)
}

pub async fn update(state: &AppState, request: &Request) -> Result<Response> {
	let payload: EditEpicRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	reject_embedded(&payload.tickets, "tickets")?;
	reject_embedded(&payload.project, "project")?;

	if !state.store.project_exists(payload.project_id).await? {
		return Err(Error::validation("projectId", "Project does not exist."));
	}

	let epic = state
		.store
		.update_epic(
			payload.id,
			payload.project_id,
			&payload.title,
			&payload.description,
		)
		.await?
		.ok_or(Error::NotFound("epic"))?;
	Response::ok().with_json(&epic)
}

pub async fn delete(state: &AppState, id: i64) -> Result<Response> {
	if !state.store.delete_epic(id).await? {
		return Err(Error::NotFound("epic"));
	}
	Ok(Response::no_content())
}
