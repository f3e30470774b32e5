//! Route table for the `/api` surface.
//!
//! Dispatch is a single match over the request method and path segments;
//! numeric segments are parsed here so controllers only ever see valid ids.
//! An unroutable path is a plain 404.

use std::sync::Arc;

use hyper::Method;

use fork_auth::TokenIssuer;
use fork_core::{Error, Result};
use fork_db::Store;

use crate::controllers::{account, debug, epic, login, project, ticket};
use crate::http::{Handler, Request, Response};

/// Shared per-request context.
#[derive(Clone)]
pub struct AppState {
	pub store: Store,
	pub tokens: Arc<TokenIssuer>,
	/// Enables the `/api/debug` endpoints.
	pub dev_mode: bool,
}

impl AppState {
	pub fn new(store: Store, tokens: TokenIssuer, dev_mode: bool) -> Self {
		Self {
			store,
			tokens: Arc::new(tokens),
			dev_mode,
		}
	}
}

pub struct Router {
	state: AppState,
}

impl Router {
	pub fn new(state: AppState) -> Self {
		Self { state }
	}
}

/// An id segment that does not parse as an integer never matches a resource.
fn parse_id(segment: &str, resource: &'static str) -> Result<i64> {
	segment.parse().map_err(|_| Error::NotFound(resource))
}

#[async_trait::async_trait]
impl Handler for Router {
	async fn handle(&self, request: Request) -> Result<Response> {
		let path = request.path().trim_matches('/').to_string();
		let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
		let state = &self.state;

		match (&request.method, segments.as_slice()) {
			// Accounts
			(&Method::GET, ["api", "account"]) => account::list(state, &request).await,
			(&Method::GET, ["api", "account", "me"]) => account::me(state, &request).await,
			(&Method::GET, ["api", "account", id]) => {
				account::get(state, &request, parse_id(id, "account")?).await
			}
			(&Method::POST, ["api", "account"]) => account::create(state, &request).await,
			(&Method::PUT, ["api", "account"]) => account::update(state, &request).await,
			(&Method::DELETE, ["api", "account", id]) => {
				account::delete(state, parse_id(id, "account")?).await
			}

			// Projects
			(&Method::GET, ["api", "project"]) => project::list(state, &request).await,
			(&Method::GET, ["api", "project", id]) => {
				project::get(state, &request, parse_id(id, "project")?).await
			}
			(&Method::POST, ["api", "project"]) => project::create(state, &request).await,
			(&Method::PUT, ["api", "project"]) => project::update(state, &request).await,
			(&Method::DELETE, ["api", "project", id]) => {
				project::delete(state, parse_id(id, "project")?).await
			}

			// Epics
			(&Method::GET, ["api", "epic"]) => epic::list(state, &request).await,
			(&Method::GET, ["api", "epic", id]) => {
				epic::get(state, &request, parse_id(id, "epic")?).await
			}
			(&Method::POST, ["api", "epic"]) => epic::create(state, &request).await,
			(&Method::PUT, ["api", "epic"]) => epic::update(state, &request).await,
			(&Method::DELETE, ["api", "epic", id]) => {
				epic::delete(state, parse_id(id, "epic")?).await
			}

			// Tickets and their assignment sub-resource
			(&Method::GET, ["api", "ticket"]) => ticket::list(state, &request).await,
			(&Method::GET, ["api", "ticket", id, "state"]) => {
				ticket::get_state(state, parse_id(id, "ticket")?).await
			}
			(&Method::PUT, ["api", "ticket", id, "state"]) => {
				ticket::put_state(state, &request, parse_id(id, "ticket")?).await
			}
			(&Method::PUT, ["api", "ticket", id, "account", account_id]) => {
				ticket::assign(
					state,
					parse_id(id, "ticket")?,
					parse_id(account_id, "account")?,
				)
				.await
			}
			(&Method::DELETE, ["api", "ticket", id, "account", account_id]) => {
				ticket::unassign(
					state,
					parse_id(id, "ticket")?,
					parse_id(account_id, "account")?,
				)
				.await
			}
			(&Method::GET, ["api", "ticket", id]) => {
				ticket::get(state, &request, parse_id(id, "ticket")?).await
			}
			(&Method::POST, ["api", "ticket"]) => ticket::create(state, &request).await,
			(&Method::PUT, ["api", "ticket"]) => ticket::update(state, &request).await,
			(&Method::DELETE, ["api", "ticket", id]) => {
				ticket::delete(state, parse_id(id, "ticket")?).await
			}

			// Login
			(&Method::PUT, ["api", "login", "salt"]) => login::salt(state, &request).await,
			(&Method::POST, ["api", "login"]) => login::login(state, &request).await,

			// Debug (dev-mode only)
			(&Method::POST, ["api", "debug", "recreate-database"]) => {
				debug::recreate_database(state).await
			}
			(&Method::POST, ["api", "debug", "fill-database"]) => {
				debug::fill_database(state).await
			}

			_ => Err(Error::NotFound("resource")),
		}
	}
}
