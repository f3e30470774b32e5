//! Project entity and its request/response shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::epic::Epic;

/// A named unit of work owning a collection of epics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	pub id: i64,
	pub name: String,
	pub description: String,
	/// Repository URL; unique across projects.
	pub url: String,
}

/// Project detail read, optionally carrying the owned epics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
	#[serde(flatten)]
	pub project: Project,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub epics: Option<Vec<Epic>>,
}

/// Payload for `POST /api/project`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
	/// Must be absent or zero; the store assigns ids.
	#[serde(default)]
	pub id: i64,
	#[validate(length(min = 1, max = 256, message = "Name is required."))]
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[validate(url(message = "Url must be a valid URL."))]
	pub url: String,
	/// Rejected when non-empty: epics are managed through their own endpoints.
	#[serde(default)]
	pub epics: Option<Vec<serde_json::Value>>,
}

/// Payload for `PUT /api/project`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditProjectRequest {
	pub id: i64,
	#[validate(length(min = 1, max = 256, message = "Name is required."))]
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[validate(url(message = "Url must be a valid URL."))]
	pub url: String,
	/// Rejected when non-empty: epics are managed through their own endpoints.
	#[serde(default)]
	pub epics: Option<Vec<serde_json::Value>>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn create_request_rejects_bad_url() {
		let request: CreateProjectRequest = serde_json::from_value(serde_json::json!({
			"name": "Fork-back",
			"url": "not a url",
		}))
		.unwrap();

		assert!(request.validate().is_err());
	}
}
