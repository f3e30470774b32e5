//! Ticket lifecycle engine.
//!
//! The single piece of real business logic in the tracker: given a ticket
//! snapshot and a requested target state, decide the new state and the new
//! timestamp set. The function is pure — the clock is injected, nothing is
//! persisted, and no shared state exists — so it is safe to call from any
//! number of concurrent requests.
//!
//! The timestamp rules form a total function of the *target* state alone,
//! deliberately not a chain of conditionals on the previous state:
//!
//! | target       | created     | opened      | resolved    | verified    |
//! |--------------|-------------|-------------|-------------|-------------|
//! | `Triage`     | keep-or-set | clear       | clear       | clear       |
//! | `Open`       | keep-or-set | **set now** | clear       | clear       |
//! | `InProgress` | keep-or-set | keep-or-set | clear       | clear       |
//! | `Resolved`   | keep-or-set | keep-or-set | keep-or-set | clear       |
//! | `Verified`   | keep-or-set | keep-or-set | keep-or-set | keep-or-set |
//!
//! `Open` is the one asymmetry: it always re-stamps `opened`, encoding
//! "re-opening" as a fresh event, while `InProgress` and later states merely
//! backfill a missing `opened` ("continuing work"). Moving backward clears
//! every milestone above the target; `created` is never cleared.

use chrono::{DateTime, Utc};

use crate::models::{Ticket, TicketState};

/// Applies `target` to a ticket snapshot and returns the updated record.
///
/// Returns an unchanged clone when `target` equals the current state.
/// Persistence is the caller's responsibility; `revision` is left untouched
/// here and bumped by the store on write.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use fork_core::{Ticket, TicketState, apply_state};
///
/// let ticket = Ticket {
///     id: 1,
///     epic_id: 1,
///     title: "Create WebAPI".to_string(),
///     description: String::new(),
///     state: TicketState::Triage,
///     date_created: None,
///     date_opened: None,
///     date_resolved: None,
///     date_verified: None,
///     revision: 0,
/// };
///
/// let now = Utc::now();
/// let opened = apply_state(&ticket, TicketState::Open, now);
/// assert_eq!(opened.state, TicketState::Open);
/// assert_eq!(opened.date_created, Some(now));
/// assert_eq!(opened.date_opened, Some(now));
/// assert_eq!(opened.date_resolved, None);
/// ```
pub fn apply_state(ticket: &Ticket, target: TicketState, now: DateTime<Utc>) -> Ticket {
	if ticket.state == target {
		return ticket.clone();
	}

	let keep_or_set = |current: Option<DateTime<Utc>>| current.or(Some(now));

	let (opened, resolved, verified) = match target {
		TicketState::Triage => (None, None, None),
		// re-opening is a fresh event: always stamp, even if opened before
		TicketState::Open => (Some(now), None, None),
		TicketState::InProgress => (keep_or_set(ticket.date_opened), None, None),
		TicketState::Resolved => (
			keep_or_set(ticket.date_opened),
			keep_or_set(ticket.date_resolved),
			None,
		),
		TicketState::Verified => (
			keep_or_set(ticket.date_opened),
			keep_or_set(ticket.date_resolved),
			keep_or_set(ticket.date_verified),
		),
	};

	Ticket {
		state: target,
		date_created: keep_or_set(ticket.date_created),
		date_opened: opened,
		date_resolved: resolved,
		date_verified: verified,
		..ticket.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;

	fn instant(secs: u32) -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, secs).unwrap()
	}

	fn fresh_ticket() -> Ticket {
		Ticket {
			id: 1,
			epic_id: 1,
			title: "Create Tickets Controller".to_string(),
			description: String::new(),
			state: TicketState::Triage,
			date_created: None,
			date_opened: None,
			date_resolved: None,
			date_verified: None,
			revision: 0,
		}
	}

	#[test]
	fn same_state_is_a_no_op() {
		let ticket = apply_state(&fresh_ticket(), TicketState::Open, instant(1));
		let again = apply_state(&ticket, TicketState::Open, instant(2));
		assert_eq!(again, ticket);
	}

	#[rstest]
	#[case(TicketState::Triage)]
	#[case(TicketState::InProgress)]
	#[case(TicketState::Resolved)]
	#[case(TicketState::Verified)]
	fn applying_twice_is_idempotent(#[case] target: TicketState) {
		let ticket = apply_state(&fresh_ticket(), target, instant(1));
		let again = apply_state(&ticket, target, instant(5));
		assert_eq!(again, ticket);
	}

	#[test]
	fn reopen_after_detour_stamps_a_later_opened() {
		let first_open = apply_state(&fresh_ticket(), TicketState::Open, instant(1));
		let triaged = apply_state(&first_open, TicketState::Triage, instant(2));
		let second_open = apply_state(&triaged, TicketState::Open, instant(3));

		assert_eq!(first_open.date_opened, Some(instant(1)));
		assert_eq!(second_open.date_opened, Some(instant(3)));
		assert!(second_open.date_opened > first_open.date_opened);
	}

	#[test]
	fn regression_to_triage_clears_everything_but_created() {
		let mut ticket = fresh_ticket();
		for (target, at) in [
			(TicketState::Open, 1),
			(TicketState::Resolved, 2),
			(TicketState::Verified, 3),
		] {
			ticket = apply_state(&ticket, target, instant(at));
		}

		let triaged = apply_state(&ticket, TicketState::Triage, instant(4));
		assert_eq!(triaged.state, TicketState::Triage);
		assert_eq!(triaged.date_created, Some(instant(1)));
		assert_eq!(triaged.date_opened, None);
		assert_eq!(triaged.date_resolved, None);
		assert_eq!(triaged.date_verified, None);
	}

	#[test]
	fn forward_progress_does_not_restamp_opened() {
		let opened = apply_state(&fresh_ticket(), TicketState::Open, instant(1));
		let in_progress = apply_state(&opened, TicketState::InProgress, instant(2));
		assert_eq!(in_progress.date_opened, Some(instant(1)));

		let resolved = apply_state(&in_progress, TicketState::Resolved, instant(3));
		assert_eq!(resolved.date_opened, Some(instant(1)));
		assert_eq!(resolved.date_resolved, Some(instant(3)));
	}

	#[test]
	fn created_is_stamped_at_most_once() {
		let mut ticket = fresh_ticket();
		let targets = [
			TicketState::Open,
			TicketState::InProgress,
			TicketState::Triage,
			TicketState::Verified,
			TicketState::Open,
			TicketState::Resolved,
		];
		for (i, target) in targets.into_iter().enumerate() {
			ticket = apply_state(&ticket, target, instant(1 + i as u32));
		}
		assert_eq!(ticket.date_created, Some(instant(1)));
	}

	#[test]
	fn jump_to_verified_backfills_missing_milestones() {
		let verified = apply_state(&fresh_ticket(), TicketState::Verified, instant(1));
		assert_eq!(verified.date_created, Some(instant(1)));
		assert_eq!(verified.date_opened, Some(instant(1)));
		assert_eq!(verified.date_resolved, Some(instant(1)));
		assert_eq!(verified.date_verified, Some(instant(1)));
	}

	#[test]
	fn result_is_independent_of_path_taken() {
		// Triage -> Open -> Resolved versus Triage -> Open -> InProgress -> Resolved
		// with identical stamp times must agree on every field.
		let opened = apply_state(&fresh_ticket(), TicketState::Open, instant(1));
		let direct = apply_state(&opened, TicketState::Resolved, instant(3));

		let via_progress = apply_state(&opened, TicketState::InProgress, instant(2));
		let indirect = apply_state(&via_progress, TicketState::Resolved, instant(3));

		assert_eq!(direct, indirect);
	}

	#[test]
	fn end_to_end_scenario() {
		let ticket = fresh_ticket();
		assert_eq!(ticket.date_created, None);

		let t1 = apply_state(&ticket, TicketState::Open, instant(1));
		assert_eq!(t1.state, TicketState::Open);
		assert_eq!(t1.date_created, Some(instant(1)));
		assert_eq!(t1.date_opened, Some(instant(1)));
		assert_eq!(t1.date_resolved, None);
		assert_eq!(t1.date_verified, None);

		let t2 = apply_state(&t1, TicketState::InProgress, instant(2));
		assert_eq!(t2.state, TicketState::InProgress);
		assert_eq!(t2.date_created, Some(instant(1)));
		assert_eq!(t2.date_opened, Some(instant(1)));
		assert_eq!(t2.date_resolved, None);

		let t3 = apply_state(&t2, TicketState::Resolved, instant(3));
		assert_eq!(t3.state, TicketState::Resolved);
		assert_eq!(t3.date_created, Some(instant(1)));
		assert_eq!(t3.date_opened, Some(instant(1)));
		assert_eq!(t3.date_resolved, Some(instant(3)));
		assert_eq!(t3.date_verified, None);

		let t4 = apply_state(&t3, TicketState::Triage, instant(4));
		assert_eq!(t4.state, TicketState::Triage);
		assert_eq!(t4.date_created, Some(instant(1)));
		assert_eq!(t4.date_opened, None);
		assert_eq!(t4.date_resolved, None);
		assert_eq!(t4.date_verified, None);
	}

	#[test]
	fn engine_leaves_identity_fields_alone() {
		let ticket = fresh_ticket();
		let updated = apply_state(&ticket, TicketState::Open, instant(1));
		assert_eq!(updated.id, ticket.id);
		assert_eq!(updated.epic_id, ticket.epic_id);
		assert_eq!(updated.title, ticket.title);
		assert_eq!(updated.revision, ticket.revision);
	}
}
