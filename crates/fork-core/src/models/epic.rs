//! Epic entity and its request/response shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::project::Project;
use super::ticket::Ticket;

/// A feature-sized grouping of tickets under one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
	pub id: i64,
	pub project_id: i64,
	pub title: String,
	pub description: String,
}

/// Epic detail read, optionally carrying the parent project and owned tickets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicDetail {
	#[serde(flatten)]
	pub epic: Epic,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub project: Option<Project>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tickets: Option<Vec<Ticket>>,
}

/// Payload for `POST /api/epic`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEpicRequest {
	/// Must be absent or zero; the store assigns ids.
	#[serde(default)]
	pub id: i64,
	pub project_id: i64,
	#[validate(length(min = 1, max = 256, message = "Title is required."))]
	pub title: String,
	#[serde(default)]
	pub description: String,
	/// Rejected when non-empty: tickets are managed through their own endpoints.
	#[serde(default)]
	pub tickets: Option<Vec<serde_json::Value>>,
	/// Rejected when present: reference the project by `projectId` only.
	#[serde(default)]
	pub project: Option<serde_json::Value>,
}

/// Payload for `PUT /api/epic`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditEpicRequest {
	pub id: i64,
	pub project_id: i64,
	#[validate(length(min = 1, max = 256, message = "Title is required."))]
	pub title: String,
	#[serde(default)]
	pub description: String,
	/// Rejected when non-empty: tickets are managed through their own endpoints.
	#[serde(default)]
	pub tickets: Option<Vec<serde_json::Value>>,
	/// Rejected when present: reference the project by `projectId` only.
	#[serde(default)]
	pub project: Option<serde_json::Value>,
}
