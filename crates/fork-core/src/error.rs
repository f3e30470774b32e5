//! Error types shared across the fork-back crates.

use thiserror::Error;

/// Errors surfaced by the store and the request handlers.
///
/// Every variant is recoverable and maps onto a structured HTTP response;
/// nothing here is fatal to the process. The lifecycle engine itself never
/// constructs one of these — an unrecognized state name is rejected at the
/// string boundary before the engine runs.
#[derive(Debug, Error)]
pub enum Error {
	/// A referenced entity id does not exist.
	#[error("{0} was not found")]
	NotFound(&'static str),

	/// Request shape, uniqueness, or relationship constraint violated.
	#[error("validation failed on {field}: {message}")]
	Validation {
		/// Field the constraint applies to, camelCase as it appears on the wire.
		field: String,
		/// Human-readable constraint description.
		message: String,
	},

	/// Credential mismatch or missing/invalid bearer token.
	#[error("unauthorized: {0}")]
	Unauthorized(String),

	/// Stale revision token on a compare-and-set write.
	#[error("conflict: {0}")]
	Conflict(String),

	/// Underlying storage failure.
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

impl Error {
	/// Shorthand for a single-field validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use fork_core::Error;
	///
	/// let err = Error::validation("login", "Login is already used.");
	/// assert_eq!(
	///     err.to_string(),
	///     "validation failed on login: Login is already used."
	/// );
	/// ```
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation {
			field: field.into(),
			message: message.into(),
		}
	}

	/// Collapses `validator` derive output into the first failed field.
	pub fn from_validation_errors(errors: &validator::ValidationErrors) -> Self {
		let (field, message) = errors
			.field_errors()
			.into_iter()
			.next()
			.map(|(field, errs)| {
				let message = errs
					.first()
					.and_then(|e| e.message.as_ref())
					.map(|m| m.to_string())
					.unwrap_or_else(|| {
						errs.first()
							.map(|e| e.code.to_string())
							.unwrap_or_else(|| "invalid value".to_string())
					});
				(field.to_string(), message)
			})
			.unwrap_or_else(|| ("request".to_string(), "invalid request".to_string()));

		Self::Validation { field, message }
	}
}

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn not_found_display() {
		let error = Error::NotFound("ticket");
		assert_eq!(error.to_string(), "ticket was not found");
	}

	#[rstest]
	fn validation_display() {
		let error = Error::validation("url", "Url is already used.");
		assert_eq!(
			error.to_string(),
			"validation failed on url: Url is already used."
		);
	}

	#[rstest]
	fn database_error_from() {
		let db_error = sqlx::Error::RowNotFound;
		let error: Error = db_error.into();
		assert!(matches!(error, Error::Database(_)));
	}
}
