//! Epic repository.

use fork_core::{Epic, Result, Ticket};

use crate::store::Store;

const EPIC_COLUMNS: &str = "id, project_id, title, description";

impl Store {
	/// Lists epics, optionally restricted to one project.
	pub async fn list_epics(
		&self,
		project_id: Option<i64>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Epic>> {
		let epics = match project_id {
			Some(project_id) => {
				sqlx::query_as::<_, Epic>(&format!(
					"SELECT {EPIC_COLUMNS} FROM epics WHERE project_id = ? \
					 ORDER BY id LIMIT ? OFFSET ?"
				))
				.bind(project_id)
				.bind(limit)
				.bind(offset)
				.fetch_all(self.pool())
				.await?
			}
			None => {
				sqlx::query_as::<_, Epic>(&format!(
					"SELECT {EPIC_COLUMNS} FROM epics ORDER BY id LIMIT ? OFFSET ?"
				))
				.bind(limit)
				.bind(offset)
				.fetch_all(self.pool())
				.await?
			}
		};
		Ok(epics)
	}

	pub async fn get_epic(&self, id: i64) -> Result<Option<Epic>> {
		let epic = sqlx::query_as::<_, Epic>(&format!(
			"SELECT {EPIC_COLUMNS} FROM epics WHERE id = ?"
		))
		.bind(id)
		.fetch_optional(self.pool())
		.await?;
		Ok(epic)
	}

	pub async fn epic_exists(&self, id: i64) -> Result<bool> {
		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM epics WHERE id = ?")
			.bind(id)
			.fetch_one(self.pool())
			.await?;
		Ok(count > 0)
	}

	pub async fn create_epic(
		&self,
		project_id: i64,
		title: &str,
		description: &str,
	) -> Result<Epic> {
		let epic = sqlx::query_as::<_, Epic>(&format!(
			"INSERT INTO epics (project_id, title, description) VALUES (?, ?, ?) \
			 RETURNING {EPIC_COLUMNS}"
		))
		.bind(project_id)
		.bind(title)
		.bind(description)
		.fetch_one(self.pool())
		.await?;
		Ok(epic)
	}

	pub async fn update_epic(
		&self,
		id: i64,
		project_id: i64,
		title: &str,
		description: &str,
	) -> Result<Option<Epic>> {
		let epic = sqlx::query_as::<_, Epic>(&format!(
			"UPDATE epics SET project_id = ?, title = ?, description = ? \
			 WHERE id = ? RETURNING {EPIC_COLUMNS}"
		))
		.bind(project_id)
		.bind(title)
		.bind(description)
		.bind(id)
		.fetch_optional(self.pool())
		.await?;
		Ok(epic)
	}

	/// Deletes the epic; owned tickets go with it via cascade.
	pub async fn delete_epic(&self, id: i64) -> Result<bool> {
		let result = sqlx::query("DELETE FROM epics WHERE id = ?")
			.bind(id)
			.execute(self.pool())
			.await?;
		Ok(result.rows_affected() > 0)
	}

	/// Tickets owned by the epic, by explicit join on the foreign key.
	pub async fn tickets_for_epic(&self, epic_id: i64) -> Result<Vec<Ticket>> {
		let tickets = sqlx::query_as::<_, Ticket>(
			"SELECT id, epic_id, title, description, state, date_created, date_opened, \
			 date_resolved, date_verified, revision FROM tickets \
			 WHERE epic_id = ? ORDER BY id",
		)
		.bind(epic_id)
		.fetch_all(self.pool())
		.await?;
		Ok(tickets)
	}
}
