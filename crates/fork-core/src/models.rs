//! Entity and DTO definitions.
//!
//! Entities hold foreign keys as plain scalars; there are no back-pointer
//! object fields, so responses can never form reference cycles. Reads that
//! include related records return the `*Detail` composites instead, built
//! from explicit join queries by the store.
//!
//! All wire types serialize camelCase to keep the JSON contract of the
//! original deployment.

mod account;
mod epic;
mod login;
mod project;
mod ticket;

pub use account::{
	Account, AccountDetail, AccountRole, AccountSecurity, CreateAccountRequest,
	EditAccountRequest,
};
pub use epic::{CreateEpicRequest, EditEpicRequest, Epic, EpicDetail};
pub use login::{LoginReference, LoginRequest, LoginResponse, LoginSaltResponse};
pub use project::{CreateProjectRequest, EditProjectRequest, Project, ProjectDetail};
pub use ticket::{
	CreateTicketRequest, EditTicketRequest, Ticket, TicketDetail, TicketState,
	TicketStateRequest, TicketStateView,
};

/// Largest page a list endpoint will return; also the default `limit`.
pub const MAX_PAGE_COUNT: i64 = 100;
