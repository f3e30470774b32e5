//! Project repository.

use fork_core::{Epic, Project, Result};

use crate::store::Store;

const PROJECT_COLUMNS: &str = "id, name, description, url";

impl Store {
	pub async fn list_projects(&self, limit: i64, offset: i64) -> Result<Vec<Project>> {
		let projects = sqlx::query_as::<_, Project>(&format!(
			"SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id LIMIT ? OFFSET ?"
		))
		.bind(limit)
		.bind(offset)
		.fetch_all(self.pool())
		.await?;
		Ok(projects)
	}

	pub async fn get_project(&self, id: i64) -> Result<Option<Project>> {
		let project = sqlx::query_as::<_, Project>(&format!(
			"SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"
		))
		.bind(id)
		.fetch_optional(self.pool())
		.await?;
		Ok(project)
	}

	pub async fn project_exists(&self, id: i64) -> Result<bool> {
		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE id = ?")
			.bind(id)
			.fetch_one(self.pool())
			.await?;
		Ok(count > 0)
	}

	/// True when `url` is taken by a project other than `exclude_id`.
	pub async fn is_url_used(&self, url: &str, exclude_id: Option<i64>) -> Result<bool> {
		let (count,): (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM projects WHERE url = ? AND id <> ?",
		)
		.bind(url)
		.bind(exclude_id.unwrap_or(0))
		.fetch_one(self.pool())
		.await?;
		Ok(count > 0)
	}

	pub async fn create_project(
		&self,
		name: &str,
		description: &str,
		url: &str,
	) -> Result<Project> {
		let project = sqlx::query_as::<_, Project>(&format!(
			"INSERT INTO projects (name, description, url) VALUES (?, ?, ?) \
			 RETURNING {PROJECT_COLUMNS}"
		))
		.bind(name)
		.bind(description)
		.bind(url)
		.fetch_one(self.pool())
		.await?;
		Ok(project)
	}

	pub async fn update_project(
		&self,
		id: i64,
		name: &str,
		description: &str,
		url: &str,
	) -> Result<Option<Project>> {
		let project = sqlx::query_as::<_, Project>(&format!(
			"UPDATE projects SET name = ?, description = ?, url = ? \
			 WHERE id = ? RETURNING {PROJECT_COLUMNS}"
		))
		.bind(name)
		.bind(description)
		.bind(url)
		.bind(id)
		.fetch_optional(self.pool())
		.await?;
		Ok(project)
	}

	/// Deletes the project; epics and their tickets go with it via cascade.
	pub async fn delete_project(&self, id: i64) -> Result<bool> {
		let result = sqlx::query("DELETE FROM projects WHERE id = ?")
			.bind(id)
			.execute(self.pool())
			.await?;
		Ok(result.rows_affected() > 0)
	}

	/// Epics owned by the project, by explicit join on the foreign key.
	pub async fn epics_for_project(&self, project_id: i64) -> Result<Vec<Epic>> {
		let epics = sqlx::query_as::<_, Epic>(
			"SELECT id, project_id, title, description FROM epics \
			 WHERE project_id = ? ORDER BY id",
		)
		.bind(project_id)
		.fetch_all(self.pool())
		.await?;
		Ok(epics)
	}
}
