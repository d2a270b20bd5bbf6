//! Client core for a single-list todo app.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. `TodoController` sits on top of it: it owns
//! the list view state, turns user actions into commands for the host to
//! execute, and re-fetches the whole list after every confirmed mutation.
//!
//! # Design
//! - The host does all I/O. Blocking hosts can use [`runner::drive`] with a
//!   [`Transport`]; async hosts feed responses back as they arrive.
//! - The list is never patched locally. It is only ever replaced by a
//!   refresh response, and only by one newer than the last applied.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - Logging goes through the `log` facade; the embedding binary picks the
//!   backend.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod notify;
pub mod runner;
pub mod state;
pub mod types;

pub use client::TodoClient;
pub use config::{ControllerConfig, ToggleMode};
pub use controller::{Command, Operation, Ticket, TodoController};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{Notification, NotificationKind};
pub use runner::{drive, Transport};
pub use state::{RowMode, RowView, ViewState};
pub use types::{Todo, TodoId, TodoPayload};
