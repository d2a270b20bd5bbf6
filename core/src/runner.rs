//! Synchronous execution of controller commands.
//!
//! Hosts that are happy to block (the CLI, tests) implement [`Transport`] and
//! hand commands to [`drive`], which keeps executing follow-ups until the
//! controller has nothing left to ask for. Async hosts skip this module and
//! call `handle_response` themselves as requests complete.

use crate::controller::{Command, TodoController};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Non-2xx statuses must come back as `Ok(HttpResponse)`; `Err` is reserved
/// for failures where no response exists at all.
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: FnMut(&HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// Runs `command` and every follow-up it produces. Returns the number of
/// round-trips made.
pub fn drive<T>(controller: &mut TodoController, transport: &mut T, command: Option<Command>) -> usize
where
    T: Transport + ?Sized,
{
    let mut next = command;
    let mut trips = 0;
    while let Some(command) = next.take() {
        let result = transport.execute(&command.request);
        trips += 1;
        next = controller.handle_response(command.ticket, result);
    }
    trips
}
