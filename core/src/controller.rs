//! The todo list controller: view state plus the request/response state
//! machine that keeps it in sync with the backend.
//!
//! # Design
//! The controller never performs I/O. Every user action that needs the
//! backend returns a [`Command`]: a [`Ticket`] plus the `HttpRequest` to run.
//! The host executes it and reports the outcome through
//! [`TodoController::handle_response`], which may hand back a follow-up
//! command (the refresh that follows every successful mutation).
//!
//! Any number of commands may be outstanding at once. Two guards keep state
//! coherent while they settle:
//! - Refreshes carry a generation. A list response is applied only if it is
//!   newer than the last one applied, so a slow early fetch cannot overwrite
//!   a fast later one.
//! - The entry form and each row are busy while a request for them is in
//!   flight; actions on a busy target are refused without a request.
//!
//! Failures never touch `todos`. They are logged, and mutation failures are
//! additionally queued as error notifications unless disabled in
//! [`ControllerConfig`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, info, warn};

use crate::client::TodoClient;
use crate::config::ControllerConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::notify::Notification;
use crate::state::{RowMode, RowView, ViewState};
use crate::types::{Todo, TodoId, TodoPayload};

/// Correlates a response with the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an outstanding ticket was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Refresh { generation: u64 },
    Create,
    Update { id: TodoId },
    Delete { id: TodoId },
}

/// A request the host must execute and answer via `handle_response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

#[derive(Debug)]
pub struct TodoController {
    client: TodoClient,
    config: ControllerConfig,
    state: ViewState,
    in_flight: HashMap<Ticket, Operation>,
    next_ticket: u64,
    issued_generation: u64,
    applied_generation: u64,
    form_busy: bool,
    busy_rows: HashSet<TodoId>,
    notifications: Vec<Notification>,
}

impl TodoController {
    pub fn new(client: TodoClient, config: ControllerConfig) -> Self {
        Self {
            client,
            config,
            state: ViewState::default(),
            in_flight: HashMap::new(),
            next_ticket: 1,
            issued_generation: 0,
            applied_generation: 0,
            form_busy: false,
            busy_rows: HashSet::new(),
            notifications: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn todos(&self) -> &[Todo] {
        &self.state.todos
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.state.todos.is_empty()
    }

    /// True while a create is in flight.
    pub fn form_busy(&self) -> bool {
        self.form_busy
    }

    pub fn is_row_busy(&self, id: &TodoId) -> bool {
        self.busy_rows.contains(id)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn operation(&self, ticket: Ticket) -> Option<&Operation> {
        self.in_flight.get(&ticket)
    }

    /// Rows in server order, each marked with its edit mode and busy flag.
    pub fn rows(&self) -> Vec<RowView<'_>> {
        self.state
            .todos
            .iter()
            .map(|todo| RowView {
                todo,
                mode: if self.state.is_editing(&todo.id) {
                    RowMode::Editing {
                        draft: &self.state.draft_edit_text,
                    }
                } else {
                    RowMode::Viewing
                },
                busy: self.busy_rows.contains(&todo.id),
            })
            .collect()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // -----------------------------------------------------------------------
    // User actions
    // -----------------------------------------------------------------------

    pub fn refresh(&mut self) -> Command {
        self.issued_generation += 1;
        let generation = self.issued_generation;
        debug!("refresh: issuing generation {generation}");
        let request = self.client.build_list_todos();
        self.issue(Operation::Refresh { generation }, request)
    }

    pub fn set_draft_description(&mut self, text: impl Into<String>) -> Option<Command> {
        let text = text.into();
        if self.state.draft_description == text {
            return None;
        }
        self.state.draft_description = text;
        self.input_refresh()
    }

    pub fn set_draft_edit_text(&mut self, text: impl Into<String>) -> Option<Command> {
        let text = text.into();
        if self.state.draft_edit_text == text {
            return None;
        }
        self.state.draft_edit_text = text;
        self.input_refresh()
    }

    /// Creates a todo. Blank descriptions are refused, as is a second create
    /// while one is already in flight.
    pub fn create(&mut self, description: &str) -> Option<Command> {
        if description.trim().is_empty() {
            debug!("create: blank description, nothing sent");
            return None;
        }
        if self.form_busy {
            debug!("create: previous create still in flight");
            return None;
        }
        let payload = TodoPayload {
            description: description.to_string(),
            completed: false,
        };
        let request = match self.client.build_create_todo(&payload) {
            Ok(request) => request,
            Err(err) => {
                self.report_failure("add", &err);
                return None;
            }
        };
        self.form_busy = true;
        Some(self.issue(Operation::Create, request))
    }

    pub fn submit_draft(&mut self) -> Option<Command> {
        let draft = self.state.draft_description.clone();
        self.create(&draft)
    }

    /// Puts `todo` into edit mode, seeding the edit draft with its current
    /// description. Any other uncommitted edit is dropped.
    pub fn begin_edit(&mut self, todo: &Todo) -> Option<Command> {
        if let Some(previous) = self.state.editing_id.as_ref().filter(|id| **id != todo.id) {
            debug!("begin_edit: abandoning uncommitted edit of {previous}");
        }
        let changed = !self.state.is_editing(&todo.id) || self.state.draft_edit_text != todo.description;
        self.state.editing_id = Some(todo.id.clone());
        self.state.draft_edit_text = todo.description.clone();
        if changed {
            self.input_refresh()
        } else {
            None
        }
    }

    /// Sends the edit draft for `todo`, falling back to its current
    /// description when the draft is blank. `todo` must be the row under
    /// edit.
    pub fn commit_edit(&mut self, todo: &Todo) -> Option<Command> {
        if !self.state.is_editing(&todo.id) {
            debug!("commit_edit: {} is not being edited", todo.id);
            return None;
        }
        let description = if self.state.draft_edit_text.trim().is_empty() {
            todo.description.clone()
        } else {
            self.state.draft_edit_text.clone()
        };
        self.issue_update(todo, description)
    }

    pub fn toggle_completed(&mut self, todo: &Todo) -> Option<Command> {
        if self.busy_rows.contains(&todo.id) {
            debug!("toggle_completed: {} is busy", todo.id);
            return None;
        }
        self.state.pending_completed = Some((todo.id.clone(), self.config.toggle.target(todo.completed)));
        self.issue_update(todo, todo.description.clone())
    }

    pub fn delete(&mut self, id: &TodoId) -> Option<Command> {
        if self.busy_rows.contains(id) {
            debug!("delete: {id} is busy");
            return None;
        }
        self.busy_rows.insert(id.clone());
        let request = self.client.build_delete_todo(id);
        Some(self.issue(Operation::Delete { id: id.clone() }, request))
    }

    /// Forgets an outstanding request. Its busy flag is released at once and
    /// its response, if one ever arrives, is ignored.
    pub fn cancel(&mut self, ticket: Ticket) -> bool {
        match self.in_flight.remove(&ticket) {
            Some(operation) => {
                debug!("cancelled {ticket} ({operation:?})");
                self.release(&operation);
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Response side
    // -----------------------------------------------------------------------

    /// Applies the outcome of a command. Returns the refresh to run next when
    /// a mutation succeeded.
    pub fn handle_response(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<Command> {
        let Some(operation) = self.in_flight.remove(&ticket) else {
            debug!("ignoring response for unknown or cancelled ticket {ticket}");
            return None;
        };
        self.release(&operation);

        match operation {
            Operation::Refresh { generation } => {
                self.apply_refresh(generation, result);
                None
            }
            Operation::Create => match result.and_then(|r| self.client.parse_create_todo(r)) {
                Ok(()) => {
                    info!("created todo");
                    self.notifications.push(Notification::success("Todo added"));
                    self.state.draft_description.clear();
                    Some(self.refresh())
                }
                Err(err) => {
                    self.report_failure("add", &err);
                    None
                }
            },
            Operation::Update { id } => match result.and_then(|r| self.client.parse_update_todo(r)) {
                Ok(()) => {
                    info!("updated todo {id}");
                    self.notifications.push(Notification::success("Todo updated"));
                    self.leave_edit(&id);
                    Some(self.refresh())
                }
                Err(err) => {
                    self.report_failure("update", &err);
                    None
                }
            },
            Operation::Delete { id } => match result.and_then(|r| self.client.parse_delete_todo(r)) {
                Ok(()) => {
                    info!("deleted todo {id}");
                    self.notifications.push(Notification::success("Todo deleted"));
                    self.leave_edit(&id);
                    Some(self.refresh())
                }
                Err(err) => {
                    self.report_failure("delete", &err);
                    None
                }
            },
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn issue(&mut self, operation: Operation, request: HttpRequest) -> Command {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        debug!("{ticket}: {} {}", request.method.as_str(), request.path);
        self.in_flight.insert(ticket, operation);
        Command { ticket, request }
    }

    fn issue_update(&mut self, todo: &Todo, description: String) -> Option<Command> {
        if self.busy_rows.contains(&todo.id) {
            debug!("update: {} is busy", todo.id);
            return None;
        }
        let payload = TodoPayload {
            description,
            completed: self.state.completed_for(todo),
        };
        let request = match self.client.build_update_todo(&todo.id, &payload) {
            Ok(request) => request,
            Err(err) => {
                self.report_failure("update", &err);
                return None;
            }
        };
        self.busy_rows.insert(todo.id.clone());
        Some(self.issue(Operation::Update { id: todo.id.clone() }, request))
    }

    fn input_refresh(&mut self) -> Option<Command> {
        if self.config.refresh_on_input {
            Some(self.refresh())
        } else {
            None
        }
    }

    fn release(&mut self, operation: &Operation) {
        match operation {
            Operation::Refresh { .. } => {}
            Operation::Create => self.form_busy = false,
            Operation::Update { id } => {
                self.busy_rows.remove(id);
                if self.state.pending_completed.as_ref().is_some_and(|(pending, _)| pending == id) {
                    self.state.pending_completed = None;
                }
            }
            Operation::Delete { id } => {
                self.busy_rows.remove(id);
            }
        }
    }

    fn apply_refresh(&mut self, generation: u64, result: Result<HttpResponse, ApiError>) {
        let todos = match result.and_then(|r| self.client.parse_list_todos(r)) {
            Ok(todos) => todos,
            Err(err) => {
                warn!("refresh generation {generation} failed: {err}");
                return;
            }
        };
        if generation <= self.applied_generation {
            debug!(
                "discarding stale refresh generation {generation} (applied {})",
                self.applied_generation
            );
            return;
        }
        self.applied_generation = generation;
        self.state.todos = todos;
        self.state.pending_completed = None;

        let edit_vanished = self
            .state
            .editing_id
            .as_ref()
            .is_some_and(|id| self.state.find(id).is_none());
        if edit_vanished {
            debug!("edited todo no longer listed, leaving edit mode");
            self.state.editing_id = None;
            self.state.draft_edit_text.clear();
        }
    }

    fn leave_edit(&mut self, id: &TodoId) {
        if self.state.is_editing(id) {
            self.state.editing_id = None;
            self.state.draft_edit_text.clear();
        }
    }

    fn report_failure(&mut self, action: &str, err: &ApiError) {
        warn!("{action} failed: {err}");
        if self.config.notify_failures {
            self.notifications
                .push(Notification::error(format!("Could not {action} todo: {err}")));
        }
    }
}
