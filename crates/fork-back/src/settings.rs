//! Process configuration, from flags or environment.

use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "fork-back", about = "HTTP API server for the Fork ticket tracker")]
pub struct Settings {
	/// Address to bind the HTTP listener to.
	#[arg(long, env = "FORK_LISTEN", default_value = "127.0.0.1:5000")]
	pub listen: SocketAddr,

	/// SQLite connection string.
	#[arg(long, env = "FORK_DATABASE_URL", default_value = "sqlite://fork.db")]
	pub database_url: String,

	/// HMAC secret for signing access tokens.
	#[arg(long, env = "FORK_JWT_SECRET")]
	pub jwt_secret: String,

	/// Enables the /api/debug endpoints.
	#[arg(long, env = "FORK_DEV_MODE", default_value_t = false)]
	pub dev_mode: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn defaults_apply_when_only_secret_is_given() {
		let settings =
			Settings::try_parse_from(["fork-back", "--jwt-secret", "s3cret"]).unwrap();
		assert_eq!(settings.listen, "127.0.0.1:5000".parse().unwrap());
		assert_eq!(settings.database_url, "sqlite://fork.db");
		assert!(!settings.dev_mode);
	}

	#[rstest]
	fn missing_secret_is_an_error() {
		// clap falls back to the env var, so mask it for the assertion
		if std::env::var_os("FORK_JWT_SECRET").is_none() {
			assert!(Settings::try_parse_from(["fork-back"]).is_err());
		}
	}

	#[rstest]
	fn flags_override_defaults() {
		let settings = Settings::try_parse_from([
			"fork-back",
			"--jwt-secret",
			"s3cret",
			"--listen",
			"0.0.0.0:8080",
			"--dev-mode",
		])
		.unwrap();
		assert_eq!(settings.listen, "0.0.0.0:8080".parse().unwrap());
		assert!(settings.dev_mode);
	}
}
