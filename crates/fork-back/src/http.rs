//! Minimal HTTP plumbing over hyper 1.x.
//!
//! [`Request`] and [`Response`] are owned, fully-buffered views of a single
//! exchange; the [`Handler`] trait is the seam between the connection loop
//! and the routing layer. Everything above this module works with these
//! types only and never touches hyper directly.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper::{HeaderMap, Method, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;

use fork_core::{Error, Result};

/// A single buffered HTTP request.
#[derive(Debug)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			headers,
			body,
		}
	}

	/// Path component of the request URI, without the query string.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Decoded query parameters. Repeated keys keep the last value.
	pub fn query_params(&self) -> HashMap<String, String> {
		self.uri
			.query()
			.and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
			.map(|pairs| pairs.into_iter().collect())
			.unwrap_or_default()
	}

	/// Deserializes the body as JSON into `T`.
	///
	/// A missing or malformed body is a client error, reported on the
	/// synthetic `body` field.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_slice(&self.body)
			.map_err(|e| Error::validation("body", format!("Request body is invalid: {e}.")))
	}

	/// Token from an `Authorization: Bearer ...` header, if present.
	pub fn bearer_token(&self) -> Option<&str> {
		self.headers
			.get(hyper::header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.strip_prefix("Bearer "))
			.map(str::trim)
	}
}

/// A single buffered HTTP response.
#[derive(Debug)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn created() -> Self {
		Self::new(StatusCode::CREATED)
	}

	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	/// Serializes `data` as the JSON body and sets the content type.
	pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self> {
		let body = serde_json::to_vec(data)
			.map_err(|e| Error::validation("response", format!("serialization failed: {e}")))?;
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("application/json"),
		);
		self.body = Bytes::from(body);
		Ok(self)
	}
}

/// Request handler seam implemented by the router.
#[async_trait::async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// ASP.NET-style problem body carried by every error response.
#[derive(Debug, Serialize)]
struct ProblemBody {
	title: String,
	status: u16,
	#[serde(skip_serializing_if = "Option::is_none")]
	errors: Option<HashMap<String, Vec<String>>>,
}

/// Maps a domain error onto the wire.
///
/// Validation failures use 422 with a per-field message map; everything
/// else is a flat `{title, status}` body. Storage failures are logged here
/// and surface as an opaque 500.
pub fn error_response(error: &Error) -> Response {
	let (status, title, errors) = match error {
		Error::NotFound(resource) => (
			StatusCode::NOT_FOUND,
			format!("{resource} was not found."),
			None,
		),
		Error::Validation { field, message } => (
			StatusCode::UNPROCESSABLE_ENTITY,
			"One or more validation errors occurred.".to_string(),
			Some(HashMap::from([(field.clone(), vec![message.clone()])])),
		),
		Error::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.clone(), None),
		Error::Conflict(message) => (StatusCode::CONFLICT, message.clone(), None),
		Error::Database(e) => {
			tracing::error!(error = %e, "storage failure");
			(
				StatusCode::INTERNAL_SERVER_ERROR,
				"An internal error occurred.".to_string(),
				None,
			)
		}
	};

	let body = ProblemBody {
		title,
		status: status.as_u16(),
		errors,
	};
	Response::new(status)
		.with_json(&body)
		.unwrap_or_else(|_| Response::new(StatusCode::INTERNAL_SERVER_ERROR))
}

/// hyper service adapter: buffers the body, delegates to the handler, and
/// renders domain errors through [`error_response`].
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body_bytes = body.collect().await?.to_bytes();

			let request = Request::new(parts.method.clone(), parts.uri.clone(), parts.headers, body_bytes);

			let response = match handler.handle(request).await {
				Ok(response) => response,
				Err(error) => error_response(&error),
			};

			tracing::debug!(
				method = %parts.method,
				path = parts.uri.path(),
				status = response.status.as_u16(),
				remote = %remote_addr,
				"request handled"
			);

			let mut hyper_response = hyper::Response::builder().status(response.status);
			for (key, value) in response.headers.iter() {
				hyper_response = hyper_response.header(key, value);
			}
			Ok(hyper_response.body(Full::new(response.body))?)
		})
	}
}

/// Binds `addr` and serves connections until the process is stopped.
pub async fn serve(
	addr: SocketAddr,
	handler: Arc<dyn Handler>,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
	let listener = TcpListener::bind(addr).await?;
	tracing::info!(%addr, "listening");

	loop {
		let (stream, remote_addr) = listener.accept().await?;
		let handler = handler.clone();

		tokio::task::spawn(async move {
			let io = TokioIo::new(stream);
			let service = RequestService {
				handler,
				remote_addr,
			};
			if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
				tracing::warn!(error = %err, %remote_addr, "connection error");
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn request(uri: &str) -> Request {
		Request::new(
			Method::GET,
			uri.parse().unwrap(),
			HeaderMap::new(),
			Bytes::new(),
		)
	}

	#[rstest]
	fn query_params_are_decoded() {
		let req = request("/api/ticket?epicId=3&limit=10");
		let params = req.query_params();
		assert_eq!(params.get("epicId").map(String::as_str), Some("3"));
		assert_eq!(params.get("limit").map(String::as_str), Some("10"));
	}

	#[rstest]
	fn missing_query_is_empty() {
		assert!(request("/api/ticket").query_params().is_empty());
	}

	#[rstest]
	fn bearer_token_is_extracted() {
		let mut req = request("/api/account/me");
		req.headers.insert(
			hyper::header::AUTHORIZATION,
			"Bearer abc.def.ghi".parse().unwrap(),
		);
		assert_eq!(req.bearer_token(), Some("abc.def.ghi"));
	}

	#[rstest]
	fn non_bearer_authorization_is_ignored() {
		let mut req = request("/api/account/me");
		req.headers.insert(
			hyper::header::AUTHORIZATION,
			"Basic dXNlcjpwdw==".parse().unwrap(),
		);
		assert_eq!(req.bearer_token(), None);
	}

	#[rstest]
	fn malformed_json_body_is_a_validation_error() {
		let mut req = request("/api/project");
		req.body = Bytes::from_static(b"{not json");
		let result: Result<serde_json::Value> = req.json();
		assert!(matches!(result, Err(Error::Validation { field, .. }) if field == "body"));
	}

	#[rstest]
	fn validation_error_renders_problem_body() {
		let response = error_response(&Error::validation("url", "Url is already used."));
		assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

		let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
		assert_eq!(body["status"], 422);
		assert_eq!(body["errors"]["url"][0], "Url is already used.");
	}

	#[rstest]
	fn not_found_renders_flat_body() {
		let response = error_response(&Error::NotFound("ticket"));
		assert_eq!(response.status, StatusCode::NOT_FOUND);

		let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
		assert_eq!(body["title"], "ticket was not found.");
		assert!(body.get("errors").is_none());
	}

	#[rstest]
	fn conflict_maps_to_409() {
		let response = error_response(&Error::Conflict("Ticket was modified.".into()));
		assert_eq!(response.status, StatusCode::CONFLICT);
	}

	#[rstest]
	fn database_error_is_opaque() {
		let response = error_response(&Error::Database(sqlx::Error::PoolClosed));
		assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
		let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
		assert_eq!(body["title"], "An internal error occurred.");
	}
}
