//! Project endpoints.

use validator::Validate;

use fork_core::{CreateProjectRequest, EditProjectRequest, Error, ProjectDetail, Result};

use crate::controllers::{include_flag, page_params, reject_embedded, require_empty_id};
use crate::http::{Request, Response};
use crate::routing::AppState;

pub async fn list(state: &AppState, request: &Request) -> Result<Response> {
	let (limit, offset) = page_params(request)?;
	let projects = state.store.list_projects(limit, offset).await?;
	Response::ok().with_json(&projects)
}

pub async fn get(state: &AppState, request: &Request, id: i64) -> Result<Response> {
	let project = state
		.store
		.get_project(id)
		.await?
		.ok_or(Error::NotFound("project"))?;

	let epics = if include_flag(request, "includeEpics") {
		Some(state.store.epics_for_project(id).await?)
	} else {
		None
	};

	Response::ok().with_json(&ProjectDetail { project, epics })
}

pub async fn create(state: &AppState, request: &Request) -> Result<Response> {
	let payload: CreateProjectRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	require_empty_id(payload.id)?;
	reject_embedded(&payload.epics, "epics")?;

	if state.store.is_url_used(&payload.url, None).await? {
		return Err(Error::validation("url", "Url is already used."));
	}

	let project = state
		.store
		.create_project(&payload.name, &payload.description, &payload.url)
		.await?;
	Response::created().with_json(&project)
}

pub async fn update(state: &AppState, request: &Request) -> Result<Response> {
	let payload: EditProjectRequest = request.json()?;
	payload.validate().map_err(|e| Error::from_validation_errors(&e))?;
	reject_embedded(&payload.epics, "epics")?;

	if state.store.is_url_used(&payload.url, Some(payload.id)).await? {
		return Err(Error::validation("url", "Url is already used."));
	}

	let project = state
		.store
		.update_project(payload.id, &payload.name, &payload.description, &payload.url)
		.await?
		.ok_or(Error::NotFound("project"))?;
	Response::ok().with_json(&project)
}

pub async fn delete(state: &AppState, id: i64) -> Result<Response> {
	if !state.store.delete_project(id).await? {
		return Err(Error::NotFound("project"));
	}
	Ok(Response::no_content())
}
