use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fork_auth::TokenIssuer;
use fork_back::{AppState, Router, Settings, serve};
use fork_db::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let settings = Settings::parse();
	tracing::info!(
		database = %settings.database_url,
		dev_mode = settings.dev_mode,
		"starting fork-back"
	);

	let store = Store::connect(&settings.database_url).await?;
	let tokens = TokenIssuer::new(settings.jwt_secret.as_bytes());
	let state = AppState::new(store, tokens, settings.dev_mode);

	serve(settings.listen, Arc::new(Router::new(state))).await
}
