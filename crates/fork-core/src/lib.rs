//! Core domain types for the fork-back ticket tracker.
//!
//! This crate carries the entity and DTO definitions shared by the store, the
//! HTTP server, and the login client, together with the one piece of real
//! business logic in the system: the ticket lifecycle engine in [`workflow`].
//! Everything here is synchronous and free of I/O; persistence and transport
//! live in the neighbouring crates.

pub mod error;
pub mod models;
pub mod workflow;

pub use error::{Error, Result};
pub use models::{
	Account, AccountDetail, MAX_PAGE_COUNT, AccountRole, AccountSecurity, CreateAccountRequest,
	CreateEpicRequest, CreateProjectRequest, CreateTicketRequest, EditAccountRequest,
	EditEpicRequest, EditProjectRequest, EditTicketRequest, Epic, EpicDetail, LoginReference,
	LoginRequest, LoginResponse, LoginSaltResponse, Project, ProjectDetail, Ticket, TicketDetail,
	TicketState, TicketStateRequest, TicketStateView,
};
pub use workflow::apply_state;
