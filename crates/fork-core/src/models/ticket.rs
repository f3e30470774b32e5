//! Ticket entity, lifecycle state, and request/response shapes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::account::Account;
use super::epic::EpicDetail;
use crate::error::Error;

/// Lifecycle state of a ticket.
///
/// The set is closed; anything else on the wire is rejected before it can
/// reach the lifecycle engine. States serialize as their symbolic names, not
/// ordinals, so the contract survives reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TicketState {
	Triage,
	Open,
	InProgress,
	Resolved,
	Verified,
}

impl fmt::Display for TicketState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			TicketState::Triage => "Triage",
			TicketState::Open => "Open",
			TicketState::InProgress => "InProgress",
			TicketState::Resolved => "Resolved",
			TicketState::Verified => "Verified",
		};
		f.write_str(name)
	}
}

impl FromStr for TicketState {
	type Err = Error;

	/// Parses a symbolic state name, failing with a validation error for
	/// anything outside the closed set.
	///
	/// # Examples
	///
	/// ```
	/// use fork_core::TicketState;
	///
	/// assert_eq!("Open".parse::<TicketState>().unwrap(), TicketState::Open);
	/// assert!("Reopened".parse::<TicketState>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Triage" => Ok(TicketState::Triage),
			"Open" => Ok(TicketState::Open),
			"InProgress" => Ok(TicketState::InProgress),
			"Resolved" => Ok(TicketState::Resolved),
			"Verified" => Ok(TicketState::Verified),
			other => Err(Error::validation(
				"state",
				format!("Unrecognized ticket state '{other}'."),
			)),
		}
	}
}

/// A unit of work under one epic, assignable to many accounts.
///
/// The four timestamps are populated monotonically in the order
/// created ≤ opened ≤ resolved ≤ verified and recomputed by
/// [`crate::workflow::apply_state`] on every state change. `revision` counts
/// writes and backs the optional compare-and-set on edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
	pub id: i64,
	pub epic_id: i64,
	pub title: String,
	pub description: String,
	pub state: TicketState,
	pub date_created: Option<DateTime<Utc>>,
	pub date_opened: Option<DateTime<Utc>>,
	pub date_resolved: Option<DateTime<Utc>>,
	pub date_verified: Option<DateTime<Utc>>,
	pub revision: i64,
}

/// Ticket detail read, optionally carrying the parent epic (with or without
/// its project) and the assigned accounts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
	#[serde(flatten)]
	pub ticket: Ticket,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub epic: Option<EpicDetail>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub accounts: Option<Vec<Account>>,
}

/// Reduced shape for the state endpoint: identity, state, and the four
/// timestamps, with title/description/relations stripped.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStateView {
	pub id: i64,
	pub state: TicketState,
	pub date_created: Option<DateTime<Utc>>,
	pub date_opened: Option<DateTime<Utc>>,
	pub date_resolved: Option<DateTime<Utc>>,
	pub date_verified: Option<DateTime<Utc>>,
	pub revision: i64,
}

impl From<&Ticket> for TicketStateView {
	fn from(ticket: &Ticket) -> Self {
		Self {
			id: ticket.id,
			state: ticket.state,
			date_created: ticket.date_created,
			date_opened: ticket.date_opened,
			date_resolved: ticket.date_resolved,
			date_verified: ticket.date_verified,
			revision: ticket.revision,
		}
	}
}

/// Payload for `PUT /api/ticket/{id}/state`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStateRequest {
	pub state: TicketState,
	/// Revision the caller read; when present the write is compare-and-set.
	#[serde(default)]
	pub revision: Option<i64>,
}

/// Payload for `POST /api/ticket`.
///
/// New tickets always start in `Triage` with only `dateCreated` stamped;
/// any timestamps or state in the payload are ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
	/// Must be absent or zero; the store assigns ids.
	#[serde(default)]
	pub id: i64,
	pub epic_id: i64,
	#[validate(length(min = 1, max = 256, message = "Title is required."))]
	pub title: String,
	#[serde(default)]
	pub description: String,
	/// Rejected when non-empty: use the assignment endpoints.
	#[serde(default)]
	pub accounts: Option<Vec<serde_json::Value>>,
	/// Rejected when present: reference the epic by `epicId` only.
	#[serde(default)]
	pub epic: Option<serde_json::Value>,
}

/// Payload for `PUT /api/ticket`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditTicketRequest {
	pub id: i64,
	pub epic_id: i64,
	#[validate(length(min = 1, max = 256, message = "Title is required."))]
	pub title: String,
	#[serde(default)]
	pub description: String,
	pub state: TicketState,
	/// Revision the caller read; when present the write is compare-and-set.
	#[serde(default)]
	pub revision: Option<i64>,
	/// Rejected when non-empty: use the assignment endpoints.
	#[serde(default)]
	pub accounts: Option<Vec<serde_json::Value>>,
	/// Rejected when present: reference the epic by `epicId` only.
	#[serde(default)]
	pub epic: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_ticket() -> Ticket {
		Ticket {
			id: 1,
			epic_id: 2,
			title: "Create Ticket Model".to_string(),
			description: String::new(),
			state: TicketState::Triage,
			date_created: None,
			date_opened: None,
			date_resolved: None,
			date_verified: None,
			revision: 0,
		}
	}

	#[test]
	fn state_serializes_as_symbolic_name() {
		let json = serde_json::to_string(&TicketState::InProgress).unwrap();
		assert_eq!(json, "\"InProgress\"");
	}

	#[test]
	fn unknown_state_is_rejected_by_serde() {
		let result: Result<TicketStateRequest, _> =
			serde_json::from_str(r#"{"state":"Reopened"}"#);
		assert!(result.is_err());
	}

	#[test]
	fn state_view_strips_title_and_relations() {
		let view = TicketStateView::from(&sample_ticket());
		let json = serde_json::to_value(&view).unwrap();
		assert!(json.get("title").is_none());
		assert!(json.get("epicId").is_none());
		assert_eq!(json["state"], "Triage");
		assert!(json["dateOpened"].is_null());
	}
}
