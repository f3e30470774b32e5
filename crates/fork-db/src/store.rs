//! Connection pool and schema lifecycle.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use fork_core::Result;

/// Handle to the relational store.
///
/// Cloning is cheap; the pool is shared. All repository operations live in
/// `impl Store` blocks under [`crate::repo`].
#[derive(Clone)]
pub struct Store {
	pool: SqlitePool,
}

impl Store {
	/// Opens (creating if missing) the database at `url` and applies pending
	/// migrations.
	///
	/// # Examples
	///
	/// ```no_run
	/// # async fn example() -> fork_core::Result<()> {
	/// use fork_db::Store;
	///
	/// let store = Store::connect("sqlite://fork.db").await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn connect(url: &str) -> Result<Self> {
		let options = SqliteConnectOptions::from_str(url)
			.map_err(sqlx::Error::from)?
			.create_if_missing(true)
			.foreign_keys(true);

		let pool = SqlitePoolOptions::new().connect_with(options).await?;

		let store = Self { pool };
		store.migrate().await?;
		Ok(store)
	}

	/// Opens a private in-memory database, for tests and ephemeral runs.
	///
	/// The pool is capped at a single connection: each SQLite `:memory:`
	/// connection is its own database.
	pub async fn in_memory() -> Result<Self> {
		let options = SqliteConnectOptions::from_str("sqlite::memory:")
			.map_err(sqlx::Error::from)?
			.foreign_keys(true);

		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.connect_with(options)
			.await?;

		let store = Self { pool };
		store.migrate().await?;
		Ok(store)
	}

	pub(crate) fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	async fn migrate(&self) -> Result<()> {
		sqlx::migrate!("./migrations")
			.run(&self.pool)
			.await
			.map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
		Ok(())
	}

	/// Drops every table and replays the migrations. Backs the dev-only
	/// debug endpoint; never reachable in production mode.
	pub async fn recreate(&self) -> Result<()> {
		for table in [
			"ticket_accounts",
			"tickets",
			"epics",
			"projects",
			"accounts",
			"_sqlx_migrations",
		] {
			sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
				.execute(&self.pool)
				.await?;
		}

		tracing::info!("database schema dropped, replaying migrations");
		self.migrate().await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn migrations_apply_on_a_fresh_database() {
		let store = Store::in_memory().await.unwrap();

		let tables: Vec<(String,)> = sqlx::query_as(
			"SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
		)
		.fetch_all(store.pool())
		.await
		.unwrap();

		let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
		for expected in ["accounts", "projects", "epics", "tickets", "ticket_accounts"] {
			assert!(names.contains(&expected), "missing table {expected}");
		}
	}

	#[tokio::test]
	async fn recreate_resets_all_rows() {
		let store = Store::in_memory().await.unwrap();

		sqlx::query("INSERT INTO projects (name, url) VALUES ('Fork-back', 'https://example.com/fork')")
			.execute(store.pool())
			.await
			.unwrap();

		store.recreate().await.unwrap();

		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
			.fetch_one(store.pool())
			.await
			.unwrap();
		assert_eq!(count, 0);
	}
}
