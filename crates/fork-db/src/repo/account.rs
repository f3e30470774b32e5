//! Account repository.

use fork_core::{Account, AccountRole, AccountSecurity, Result, Ticket};

use crate::store::Store;

const ACCOUNT_COLUMNS: &str = "id, login, first_name, last_name, role";
const TICKET_COLUMNS: &str = "id, epic_id, title, description, state, \
	date_created, date_opened, date_resolved, date_verified, revision";

impl Store {
	pub async fn list_accounts(&self, limit: i64, offset: i64) -> Result<Vec<Account>> {
		let accounts = sqlx::query_as::<_, Account>(&format!(
			"SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id LIMIT ? OFFSET ?"
		))
		.bind(limit)
		.bind(offset)
		.fetch_all(self.pool())
		.await?;
		Ok(accounts)
	}

	pub async fn get_account(&self, id: i64) -> Result<Option<Account>> {
		let account = sqlx::query_as::<_, Account>(&format!(
			"SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
		))
		.bind(id)
		.fetch_optional(self.pool())
		.await?;
		Ok(account)
	}

	pub async fn find_account_by_login(&self, login: &str) -> Result<Option<Account>> {
		let account = sqlx::query_as::<_, Account>(&format!(
			"SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE login = ?"
		))
		.bind(login)
		.fetch_optional(self.pool())
		.await?;
		Ok(account)
	}

	/// Password material for one account; `None` when the id is unknown.
	pub async fn account_security(&self, account_id: i64) -> Result<Option<AccountSecurity>> {
		let security = sqlx::query_as::<_, AccountSecurity>(
			"SELECT hash, hash_type, salt FROM accounts WHERE id = ?",
		)
		.bind(account_id)
		.fetch_optional(self.pool())
		.await?;
		Ok(security)
	}

	/// True when `login` is taken by an account other than `exclude_id`.
	pub async fn is_login_used(&self, login: &str, exclude_id: Option<i64>) -> Result<bool> {
		let (count,): (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM accounts WHERE login = ? AND id <> ?",
		)
		.bind(login)
		.bind(exclude_id.unwrap_or(0))
		.fetch_one(self.pool())
		.await?;
		Ok(count > 0)
	}

	pub async fn create_account(
		&self,
		login: &str,
		first_name: &str,
		last_name: &str,
		role: AccountRole,
		security: &AccountSecurity,
	) -> Result<Account> {
		let account = sqlx::query_as::<_, Account>(&format!(
			"INSERT INTO accounts (login, first_name, last_name, role, hash, hash_type, salt) \
			 VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {ACCOUNT_COLUMNS}"
		))
		.bind(login)
		.bind(first_name)
		.bind(last_name)
		.bind(role)
		.bind(&security.hash)
		.bind(&security.hash_type)
		.bind(&security.salt)
		.fetch_one(self.pool())
		.await?;
		Ok(account)
	}

	/// Updates the mutable account fields; the login is immutable and the
	/// ticket list is only reachable through the assignment endpoints.
	pub async fn update_account(
		&self,
		id: i64,
		first_name: &str,
		last_name: &str,
		role: AccountRole,
	) -> Result<Option<Account>> {
		let account = sqlx::query_as::<_, Account>(&format!(
			"UPDATE accounts SET first_name = ?, last_name = ?, role = ? \
			 WHERE id = ? RETURNING {ACCOUNT_COLUMNS}"
		))
		.bind(first_name)
		.bind(last_name)
		.bind(role)
		.bind(id)
		.fetch_optional(self.pool())
		.await?;
		Ok(account)
	}

	/// Deletes the account; assignment rows go with it via cascade.
	pub async fn delete_account(&self, id: i64) -> Result<bool> {
		let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
			.bind(id)
			.execute(self.pool())
			.await?;
		Ok(result.rows_affected() > 0)
	}

	/// Tickets assigned to the account, by explicit join.
	pub async fn tickets_for_account(&self, account_id: i64) -> Result<Vec<Ticket>> {
		let tickets = sqlx::query_as::<_, Ticket>(&format!(
			"SELECT t.{} FROM tickets t \
			 JOIN ticket_accounts ta ON ta.ticket_id = t.id \
			 WHERE ta.account_id = ? ORDER BY t.id",
			TICKET_COLUMNS.replace(", ", ", t.")
		))
		.bind(account_id)
		.fetch_all(self.pool())
		.await?;
		Ok(tickets)
	}
}
