//! Request handlers, one module per resource.

pub mod account;
pub mod debug;
pub mod epic;
pub mod login;
pub mod project;
pub mod ticket;

use fork_core::{Error, MAX_PAGE_COUNT, Result};

use crate::http::Request;

/// Parses `limit`/`offset` list parameters.
///
/// `limit` defaults to the page cap and must stay within `1..=100`;
/// `offset` defaults to zero and must not be negative.
pub(crate) fn page_params(request: &Request) -> Result<(i64, i64)> {
	let params = request.query_params();

	let limit = match params.get("limit") {
		Some(raw) => raw
			.parse::<i64>()
			.map_err(|_| Error::validation("limit", "Limit must be an integer."))?,
		None => MAX_PAGE_COUNT,
	};
	if !(1..=MAX_PAGE_COUNT).contains(&limit) {
		return Err(Error::validation(
			"limit",
			format!("Limit must be between 1 and {MAX_PAGE_COUNT}."),
		));
	}

	let offset = match params.get("offset") {
		Some(raw) => raw
			.parse::<i64>()
			.map_err(|_| Error::validation("offset", "Offset must be an integer."))?,
		None => 0,
	};
	if offset < 0 {
		return Err(Error::validation("offset", "Offset must not be negative."));
	}

	Ok((limit, offset))
}

/// Reads a `?includeX` style flag; `true` and `1` switch it on.
pub(crate) fn include_flag(request: &Request, name: &str) -> bool {
	request
		.query_params()
		.get(name)
		.is_some_and(|v| v == "true" || v == "1")
}

/// Optional numeric filter parameter, e.g. `?epicId=3`.
pub(crate) fn filter_id(request: &Request, name: &'static str) -> Result<Option<i64>> {
	match request.query_params().get(name) {
		Some(raw) => raw
			.parse::<i64>()
			.map(Some)
			.map_err(|_| Error::validation(name, "Filter must be an integer id.")),
		None => Ok(None),
	}
}

/// Creation payloads must not carry a preassigned id.
pub(crate) fn require_empty_id(id: i64) -> Result<()> {
	if id != 0 {
		return Err(Error::validation("id", "Id should be empty."));
	}
	Ok(())
}

/// Child collections are managed through their own endpoints; embedded
/// copies on a parent write are rejected outright.
pub(crate) fn reject_embedded<T>(value: &Option<T>, field: &'static str) -> Result<()> {
	if value.is_some() {
		return Err(Error::validation(
			field,
			format!("{field} cannot be written through this endpoint."),
		));
	}
	Ok(())
}
