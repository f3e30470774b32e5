//! Ticket repository.
//!
//! Every write bumps the ticket's `revision`. Callers that pass the revision
//! they read get compare-and-set semantics; callers that omit it keep plain
//! last-writer-wins.

use chrono::{DateTime, Utc};

use fork_core::{Account, Error, Result, Ticket, TicketState};

use crate::store::Store;

const TICKET_COLUMNS: &str = "id, epic_id, title, description, state, \
	date_created, date_opened, date_resolved, date_verified, revision";

impl Store {
	/// Lists tickets, optionally restricted to one epic.
	pub async fn list_tickets(
		&self,
		epic_id: Option<i64>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Ticket>> {
		let tickets = match epic_id {
			Some(epic_id) => {
				sqlx::query_as::<_, Ticket>(&format!(
					"SELECT {TICKET_COLUMNS} FROM tickets WHERE epic_id = ? \
					 ORDER BY id LIMIT ? OFFSET ?"
				))
				.bind(epic_id)
				.bind(limit)
				.bind(offset)
				.fetch_all(self.pool())
				.await?
			}
			None => {
				sqlx::query_as::<_, Ticket>(&format!(
					"SELECT {TICKET_COLUMNS} FROM tickets ORDER BY id LIMIT ? OFFSET ?"
				))
				.bind(limit)
				.bind(offset)
				.fetch_all(self.pool())
				.await?
			}
		};
		Ok(tickets)
	}

	pub async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>> {
		let ticket = sqlx::query_as::<_, Ticket>(&format!(
			"SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?"
		))
		.bind(id)
		.fetch_optional(self.pool())
		.await?;
		Ok(ticket)
	}

	/// Inserts a new ticket in `Triage` with only `date_created` stamped.
	pub async fn create_ticket(
		&self,
		epic_id: i64,
		title: &str,
		description: &str,
		now: DateTime<Utc>,
	) -> Result<Ticket> {
		let ticket = sqlx::query_as::<_, Ticket>(&format!(
			"INSERT INTO tickets (epic_id, title, description, state, date_created) \
			 VALUES (?, ?, ?, ?, ?) RETURNING {TICKET_COLUMNS}"
		))
		.bind(epic_id)
		.bind(title)
		.bind(description)
		.bind(TicketState::Triage)
		.bind(now)
		.fetch_one(self.pool())
		.await?;
		Ok(ticket)
	}

	/// Persists an updated ticket snapshot in a single write.
	///
	/// With `expected_revision` the update is compare-and-set and a stale
	/// token yields [`Error::Conflict`]; without it the write is
	/// last-writer-wins. Either way the stored revision is incremented.
	pub async fn update_ticket(
		&self,
		ticket: &Ticket,
		expected_revision: Option<i64>,
	) -> Result<Ticket> {
		let query = match expected_revision {
			Some(_) => {
				"UPDATE tickets SET epic_id = ?, title = ?, description = ?, state = ?, \
				 date_created = ?, date_opened = ?, date_resolved = ?, date_verified = ?, \
				 revision = revision + 1 WHERE id = ? AND revision = ?"
			}
			None => {
				"UPDATE tickets SET epic_id = ?, title = ?, description = ?, state = ?, \
				 date_created = ?, date_opened = ?, date_resolved = ?, date_verified = ?, \
				 revision = revision + 1 WHERE id = ?"
			}
		};

		let mut update = sqlx::query(query)
			.bind(ticket.epic_id)
			.bind(&ticket.title)
			.bind(&ticket.description)
			.bind(ticket.state)
			.bind(ticket.date_created)
			.bind(ticket.date_opened)
			.bind(ticket.date_resolved)
			.bind(ticket.date_verified)
			.bind(ticket.id);
		if let Some(revision) = expected_revision {
			update = update.bind(revision);
		}

		let result = update.execute(self.pool()).await?;
		if result.rows_affected() == 0 {
			return match self.get_ticket(ticket.id).await? {
				Some(_) => Err(Error::Conflict(
					"Ticket was modified by another request.".to_string(),
				)),
				None => Err(Error::NotFound("ticket")),
			};
		}

		self.get_ticket(ticket.id)
			.await?
			.ok_or(Error::NotFound("ticket"))
	}

	pub async fn delete_ticket(&self, id: i64) -> Result<bool> {
		let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
			.bind(id)
			.execute(self.pool())
			.await?;
		Ok(result.rows_affected() > 0)
	}

	/// Accounts assigned to the ticket, by explicit join.
	pub async fn accounts_for_ticket(&self, ticket_id: i64) -> Result<Vec<Account>> {
		let accounts = sqlx::query_as::<_, Account>(
			"SELECT a.id, a.login, a.first_name, a.last_name, a.role FROM accounts a \
			 JOIN ticket_accounts ta ON ta.account_id = a.id \
			 WHERE ta.ticket_id = ? ORDER BY a.id",
		)
		.bind(ticket_id)
		.fetch_all(self.pool())
		.await?;
		Ok(accounts)
	}

	/// Assigns an account to a ticket; repeating the call is a no-op.
	pub async fn assign_account(&self, ticket_id: i64, account_id: i64) -> Result<()> {
		sqlx::query(
			"INSERT OR IGNORE INTO ticket_accounts (ticket_id, account_id) VALUES (?, ?)",
		)
		.bind(ticket_id)
		.bind(account_id)
		.execute(self.pool())
		.await?;
		Ok(())
	}

	/// Removes an assignment, reporting whether one existed.
	pub async fn unassign_account(&self, ticket_id: i64, account_id: i64) -> Result<bool> {
		let result = sqlx::query(
			"DELETE FROM ticket_accounts WHERE ticket_id = ? AND account_id = ?",
		)
		.bind(ticket_id)
		.bind(account_id)
		.execute(self.pool())
		.await?;
		Ok(result.rows_affected() > 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use fork_auth::build_security;
	use fork_core::{AccountRole, apply_state};

	// whole seconds only: sub-second digits are not guaranteed to survive
	// the TEXT column round trip
	fn fixed_now() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
	}

	async fn store_with_epic() -> (Store, i64) {
		let store = Store::in_memory().await.unwrap();
		let project = store
			.create_project("Fork-back", "", "https://example.com/fork-back")
			.await
			.unwrap();
		let epic = store.create_epic(project.id, "Create WebAPI", "").await.unwrap();
		(store, epic.id)
	}

	#[tokio::test]
	async fn create_starts_in_triage_with_only_created_stamped() {
		let (store, epic_id) = store_with_epic().await;
		let now = fixed_now();

		let ticket = store
			.create_ticket(epic_id, "Create Tickets Controller", "", now)
			.await
			.unwrap();

		assert_eq!(ticket.state, TicketState::Triage);
		assert_eq!(ticket.date_created, Some(now));
		assert_eq!(ticket.date_opened, None);
		assert_eq!(ticket.date_resolved, None);
		assert_eq!(ticket.date_verified, None);
		assert_eq!(ticket.revision, 0);
	}

	#[tokio::test]
	async fn update_bumps_revision_and_persists_engine_output() {
		let (store, epic_id) = store_with_epic().await;
		let now = fixed_now();
		let ticket = store.create_ticket(epic_id, "Ticket", "", now).await.unwrap();

		let opened = apply_state(&ticket, TicketState::Open, now);
		let stored = store.update_ticket(&opened, None).await.unwrap();

		assert_eq!(stored.state, TicketState::Open);
		assert_eq!(stored.date_opened, Some(now));
		assert_eq!(stored.revision, ticket.revision + 1);
	}

	#[tokio::test]
	async fn compare_and_set_rejects_stale_revision() {
		let (store, epic_id) = store_with_epic().await;
		let now = fixed_now();
		let ticket = store.create_ticket(epic_id, "Ticket", "", now).await.unwrap();

		let opened = apply_state(&ticket, TicketState::Open, now);
		store.update_ticket(&opened, Some(ticket.revision)).await.unwrap();

		// second write with the original revision token is stale
		let result = store.update_ticket(&opened, Some(ticket.revision)).await;
		assert!(matches!(result, Err(Error::Conflict(_))));
	}

	#[tokio::test]
	async fn update_of_missing_ticket_is_not_found() {
		let (store, epic_id) = store_with_epic().await;
		let now = fixed_now();
		let mut ticket = store.create_ticket(epic_id, "Ticket", "", now).await.unwrap();
		store.delete_ticket(ticket.id).await.unwrap();

		ticket.title = "Renamed".to_string();
		let result = store.update_ticket(&ticket, None).await;
		assert!(matches!(result, Err(Error::NotFound("ticket"))));
	}

	#[tokio::test]
	async fn assignment_is_idempotent_and_cascades_on_delete() {
		let (store, epic_id) = store_with_epic().await;
		let ticket = store
			.create_ticket(epic_id, "Ticket", "", fixed_now())
			.await
			.unwrap();
		let account = store
			.create_account(
				"dev@example.com",
				"Dev",
				"",
				AccountRole::Developer,
				&build_security("pw"),
			)
			.await
			.unwrap();

		store.assign_account(ticket.id, account.id).await.unwrap();
		store.assign_account(ticket.id, account.id).await.unwrap();
		assert_eq!(store.accounts_for_ticket(ticket.id).await.unwrap().len(), 1);
		assert_eq!(store.tickets_for_account(account.id).await.unwrap().len(), 1);

		store.delete_account(account.id).await.unwrap();
		assert!(store.accounts_for_ticket(ticket.id).await.unwrap().is_empty());

		assert!(!store.unassign_account(ticket.id, account.id).await.unwrap());
	}

	#[tokio::test]
	async fn timestamps_round_trip_through_sqlite() {
		let (store, epic_id) = store_with_epic().await;
		let now = fixed_now();
		let ticket = store.create_ticket(epic_id, "Ticket", "", now).await.unwrap();

		let verified = apply_state(&ticket, TicketState::Verified, now);
		let stored = store.update_ticket(&verified, None).await.unwrap();

		assert_eq!(stored.date_created, Some(now));
		assert_eq!(stored.date_opened, Some(now));
		assert_eq!(stored.date_resolved, Some(now));
		assert_eq!(stored.date_verified, Some(now));
	}
}
