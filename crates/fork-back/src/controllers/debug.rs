//! Development-only database endpoints.
//!
//! Both are gated on the `dev_mode` setting and answer 400 in production.

use serde_json::json;

use fork_core::Result;

use crate::http::Response;
use crate::routing::AppState;

fn disabled() -> Result<Response> {
	Response::bad_request().with_json(&json!({
		"title": "Debug endpoints are disabled.",
		"status": 400,
	}))
}

/// `POST /api/debug/recreate-database` — drops and re-creates the schema.
pub async fn recreate_database(state: &AppState) -> Result<Response> {
	if !state.dev_mode {
		return disabled();
	}
	state.store.recreate().await?;
	tracing::warn!("database recreated");
	Ok(Response::no_content())
}

/// `POST /api/debug/fill-database` — inserts the sample dataset.
pub async fn fill_database(state: &AppState) -> Result<Response> {
	if !state.dev_mode {
		return disabled();
	}
	fork_db::seed::fill_database(&state.store).await?;
	Ok(Response::no_content())
}
