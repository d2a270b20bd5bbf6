//! Controller behavior against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `TodoController`
//! over real HTTP using ureq. Each test gets its own server so state never
//! leaks between tests.

use todolist_core::{
    drive, ApiError, ControllerConfig, HttpMethod, HttpRequest, HttpResponse, NotificationKind,
    Todo, TodoClient, TodoController, TodoId, ToggleMode,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse::new(status, body))
}

/// Start a fresh mock server and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn controller(config: ControllerConfig) -> TodoController {
    TodoController::new(TodoClient::new(&start_server()), config)
}

fn run(c: &mut TodoController, command: Option<todolist_core::Command>) {
    let mut transport = execute;
    drive(c, &mut transport, command);
}

fn refresh(c: &mut TodoController) {
    let command = c.refresh();
    run(c, Some(command));
}

fn add(c: &mut TodoController, description: &str) -> Todo {
    c.set_draft_description(description);
    let command = c.submit_draft();
    run(c, command);
    c.todos()
        .iter()
        .rev()
        .find(|t| t.description == description)
        .cloned()
        .expect("created todo listed")
}

#[test]
fn create_lists_new_todo_and_clears_draft() {
    let mut c = controller(ControllerConfig::default());
    refresh(&mut c);
    assert!(c.is_empty());

    let milk = add(&mut c, "Buy milk");
    assert!(!milk.completed);
    assert!(c.state().draft_description.is_empty());
    assert_eq!(c.todos().len(), 1);

    let notes = c.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
}

#[test]
fn edit_without_change_keeps_description() {
    let mut c = controller(ControllerConfig::default());
    let milk = add(&mut c, "Buy milk");

    c.begin_edit(&milk);
    let command = c.commit_edit(&milk);
    run(&mut c, command);

    assert_eq!(c.todos()[0].description, "Buy milk");
    assert!(c.state().editing_id.is_none());
}

#[test]
fn edit_with_new_text_updates_row() {
    let mut c = controller(ControllerConfig::default());
    let milk = add(&mut c, "Buy milk");

    c.begin_edit(&milk);
    c.set_draft_edit_text("Buy oat milk");
    let command = c.commit_edit(&milk);
    run(&mut c, command);

    assert_eq!(c.todos()[0].description, "Buy oat milk");
    assert_eq!(c.todos()[0].id, milk.id);
}

#[test]
fn flip_toggle_completes_then_reopens() {
    let mut c = controller(ControllerConfig::default());
    let milk = add(&mut c, "Buy milk");

    let command = c.toggle_completed(&milk);
    run(&mut c, command);
    let toggled = c.todos()[0].clone();
    assert!(toggled.completed);

    let command = c.toggle_completed(&toggled);
    run(&mut c, command);
    assert!(!c.todos()[0].completed);
}

#[test]
fn mark_done_toggle_is_one_way() {
    let mut c = controller(ControllerConfig {
        toggle: ToggleMode::MarkDone,
        ..ControllerConfig::default()
    });
    let milk = add(&mut c, "Buy milk");

    let command = c.toggle_completed(&milk);
    run(&mut c, command);
    let toggled = c.todos()[0].clone();
    assert!(toggled.completed);

    let command = c.toggle_completed(&toggled);
    run(&mut c, command);
    assert!(c.todos()[0].completed);
}

#[test]
fn delete_removes_only_that_todo() {
    let mut c = controller(ControllerConfig::default());
    let milk = add(&mut c, "Buy milk");
    let bread = add(&mut c, "Buy bread");

    let command = c.delete(&milk.id);
    run(&mut c, command);

    assert_eq!(c.todos(), &[bread]);
}

#[test]
fn failed_mutation_leaves_list_untouched() {
    let mut c = controller(ControllerConfig::default());
    add(&mut c, "Buy milk");
    let before = c.todos().to_vec();
    c.drain_notifications();

    let ghost = TodoId::new("00000000-0000-0000-0000-000000000000");
    let command = c.delete(&ghost);
    run(&mut c, command);

    assert_eq!(c.todos(), before.as_slice());
    let notes = c.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Error);
}

#[test]
fn unreachable_backend_keeps_state() {
    let mut c = TodoController::new(TodoClient::new("http://127.0.0.1:9"), ControllerConfig::default());
    c.set_draft_description("Buy milk");
    let command = c.submit_draft();
    run(&mut c, command);

    assert!(c.is_empty());
    assert_eq!(c.state().draft_description, "Buy milk");
    assert!(!c.form_busy());
}
