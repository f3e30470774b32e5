//! HTTP API server for the Fork ticket tracker.
//!
//! The binary wires four layers together: [`settings`] (process
//! configuration), [`http`] (hyper plumbing and the [`http::Handler`]
//! seam), [`routing`] (the `/api` route table), and [`controllers`] (one
//! module per resource). Domain types, the lifecycle engine, storage, and
//! token handling live in the `fork-core`, `fork-db`, and `fork-auth`
//! crates.

pub mod controllers;
pub mod http;
pub mod routing;
pub mod settings;

pub use http::{Handler, Request, Response, serve};
pub use routing::{AppState, Router};
pub use settings::Settings;
