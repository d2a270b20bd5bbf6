//! Interactive terminal front end for the todo list controller.

mod input;
mod render;
mod transport;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use flexi_logger::Logger;
use log::info;
use todolist_core::{drive, Command, ControllerConfig, TodoClient, TodoController, ToggleMode};

use input::Input;
use transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "todolist", version, about = "Interactive todo list client")]
struct Args {
    /// Base URL of the todo backend.
    #[arg(long, env = "TODO_BACKEND_URL", default_value = "http://localhost:5000")]
    backend_url: String,

    /// `flip` toggles both ways, `mark-done` only ever completes.
    #[arg(long, env = "TODO_TOGGLE_MODE", default_value = "flip")]
    toggle: ToggleMode,

    /// Re-fetch the list on every draft change.
    #[arg(long)]
    refresh_on_input: bool,

    /// Only log failed actions instead of also printing them.
    #[arg(long)]
    quiet_failures: bool,

    /// flexi_logger spec, e.g. `debug` or `todolist_core=debug`.
    #[arg(long, env = "TODO_LOG", default_value = "warn")]
    log_level: String,
}

struct Session {
    controller: TodoController,
    transport: UreqTransport,
}

impl Session {
    fn run(&mut self, command: Option<Command>) {
        drive(&mut self.controller, &mut self.transport, command);
    }

    /// Applies one parsed line. Returns false on quit.
    fn apply(&mut self, input: Input) -> bool {
        match input {
            Input::List => {}
            Input::Refresh => {
                let command = self.controller.refresh();
                self.run(Some(command));
            }
            Input::Add(text) => {
                let command = self.controller.create(&text);
                self.run(command);
            }
            Input::Draft(text) => {
                let command = self.controller.set_draft_description(text);
                self.run(command);
            }
            Input::Submit => {
                if self.controller.state().draft_description.trim().is_empty() {
                    println!("draft is empty");
                }
                let command = self.controller.submit_draft();
                self.run(command);
            }
            Input::Edit(index) => {
                if let Some(todo) = self.row(index) {
                    let command = self.controller.begin_edit(&todo);
                    self.run(command);
                }
            }
            Input::Text(text) => {
                if self.controller.state().editing_id.is_none() {
                    println!("nothing is being edited; use `edit <n>` first");
                } else {
                    let command = self.controller.set_draft_edit_text(text);
                    self.run(command);
                }
            }
            Input::Save => {
                let editing = self
                    .controller
                    .state()
                    .editing_id
                    .as_ref()
                    .and_then(|id| self.controller.state().find(id))
                    .cloned();
                match editing {
                    Some(todo) => {
                        let command = self.controller.commit_edit(&todo);
                        self.run(command);
                    }
                    None => println!("nothing is being edited"),
                }
            }
            Input::Toggle(index) => {
                if let Some(todo) = self.row(index) {
                    let command = self.controller.toggle_completed(&todo);
                    self.run(command);
                }
            }
            Input::Remove(index) => {
                if let Some(todo) = self.row(index) {
                    let command = self.controller.delete(&todo.id);
                    self.run(command);
                }
            }
            Input::Help => println!("{}", input::HELP),
            Input::Quit => return false,
        }
        true
    }

    fn row(&self, index: usize) -> Option<todolist_core::Todo> {
        let todo = self.controller.todos().get(index).cloned();
        if todo.is_none() {
            println!("no row {}", index + 1);
        }
        todo
    }

    fn show(&mut self) {
        for note in self.controller.drain_notifications() {
            println!("{}", render::notification(&note));
        }
        print!("{}", render::list(&self.controller));
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str(&args.log_level)
        .context("invalid log spec")?
        .log_to_stderr()
        .start()
        .context("failed to start logger")?;

    let config = ControllerConfig {
        toggle: args.toggle,
        refresh_on_input: args.refresh_on_input,
        notify_failures: !args.quiet_failures,
    };
    info!("backend {} with {config:?}", args.backend_url);

    let mut session = Session {
        controller: TodoController::new(TodoClient::new(&args.backend_url), config),
        transport: UreqTransport::new(),
    };

    let command = session.controller.refresh();
    session.run(Some(command));
    session.show();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush().context("failed to flush stdout")?;
        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read stdin")?;

        match input::parse(&line) {
            Ok(parsed) => {
                if !session.apply(parsed) {
                    break;
                }
            }
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        }
        session.show();
    }
    Ok(())
}
