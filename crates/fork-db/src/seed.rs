//! Development fixture for the debug endpoints.
//!
//! Populates a small, recognisable dataset: three accounts, two projects,
//! two epics, and a dozen tickets spread across the lifecycle states. Ticket
//! states are driven through the lifecycle engine so the stamped timestamps
//! obey the same invariants as production traffic.

use chrono::Utc;

use fork_auth::build_security;
use fork_core::{AccountRole, Result, TicketState, apply_state};

use crate::store::Store;

/// Inserts the sample dataset. Not idempotent; pair with
/// [`Store::recreate`] when a clean slate is needed.
pub async fn fill_database(store: &Store) -> Result<()> {
	let accounts = [
		("margaret.kyselgova@example.com", "PumaMargo", AccountRole::Developer, "margo"),
		("danil.belikov@example.com", "DanilBelka", AccountRole::Manager, "belka"),
		("kyselgov@example.com", "Supervisor", AccountRole::Administrator, "test"),
	];

	let mut account_ids = Vec::new();
	for (login, first_name, role, password) in accounts {
		let account = store
			.create_account(login, first_name, "", role, &build_security(password))
			.await?;
		account_ids.push(account.id);
	}

	let back = store
		.create_project(
			"Fork-back",
			"Backend of the Fork project",
			"https://github.com/fork-tracker/fork-back.git",
		)
		.await?;
	store
		.create_project(
			"Fork-front",
			"Frontend of the Fork project",
			"https://github.com/fork-tracker/fork-front.git",
		)
		.await?;

	let data_model = store.create_epic(back.id, "Create DataModel", "").await?;
	let web_api = store.create_epic(back.id, "Create WebAPI", "").await?;

	let tickets = [
		(data_model.id, "Create Account Model", TicketState::Resolved),
		(data_model.id, "Create Project Model", TicketState::Resolved),
		(data_model.id, "Create Epic Model", TicketState::Resolved),
		(data_model.id, "Create Ticket Model", TicketState::Resolved),
		(data_model.id, "Create Store Layer", TicketState::Resolved),
		(data_model.id, "Create Schema Migrations", TicketState::Resolved),
		(web_api.id, "Create Login Controller", TicketState::Verified),
		(web_api.id, "Create Accounts Controller", TicketState::Verified),
		(web_api.id, "Create Projects Controller", TicketState::Resolved),
		(web_api.id, "Create Epics Controller", TicketState::Open),
		(web_api.id, "Create Tickets Controller", TicketState::Triage),
		(web_api.id, "Create Debug Controller", TicketState::InProgress),
	];

	let now = Utc::now();
	for (epic_id, title, state) in tickets {
		let ticket = store.create_ticket(epic_id, title, "", now).await?;
		if state != ticket.state {
			store.update_ticket(&apply_state(&ticket, state, now), None).await?;
		}
		for account_id in &account_ids {
			store.assign_account(ticket.id, *account_id).await?;
		}
	}

	tracing::info!("sample data inserted");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn fixture_populates_every_aggregate() {
		let store = Store::in_memory().await.unwrap();
		fill_database(&store).await.unwrap();

		assert_eq!(store.list_accounts(100, 0).await.unwrap().len(), 3);
		assert_eq!(store.list_projects(100, 0).await.unwrap().len(), 2);
		assert_eq!(store.list_epics(None, 100, 0).await.unwrap().len(), 2);

		let tickets = store.list_tickets(None, 100, 0).await.unwrap();
		assert_eq!(tickets.len(), 12);

		// states were driven through the engine, so stamps are consistent
		let verified = tickets
			.iter()
			.find(|t| t.state == TicketState::Verified)
			.unwrap();
		assert!(verified.date_created.is_some());
		assert!(verified.date_opened.is_some());
		assert!(verified.date_resolved.is_some());
		assert!(verified.date_verified.is_some());

		let triaged = tickets
			.iter()
			.find(|t| t.state == TicketState::Triage)
			.unwrap();
		assert!(triaged.date_opened.is_none());

		// every ticket carries all three assignees
		assert_eq!(store.accounts_for_ticket(tickets[0].id).await.unwrap().len(), 3);
	}

	#[tokio::test]
	async fn login_flow_material_matches_seeded_passwords() {
		let store = Store::in_memory().await.unwrap();
		fill_database(&store).await.unwrap();

		let account = store
			.find_account_by_login("kyselgov@example.com")
			.await
			.unwrap()
			.unwrap();
		let security = store.account_security(account.id).await.unwrap().unwrap();

		let client_hash = fork_auth::sha256_hex(&format!("test{}", security.salt));
		assert!(fork_auth::verify_hash(&security, &client_hash));
	}
}
