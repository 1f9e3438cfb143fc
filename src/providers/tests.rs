use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{CardService, Fetched};
use crate::error::{CreateTaskError, SyncError};
use crate::mapper;
use crate::model::form::TaskForm;
use crate::model::task::Task;
use crate::model::trello::{Board, List};

/// An in-memory board service that records the forms it receives.
pub struct MockService {
    pub ready: bool,
    pub authenticated: bool,
    pub default_list: Option<String>,
    pub boards: Vec<Board>,
    pub lists: Vec<List>,
    pub tasks: Vec<Task>,
    pub read_failure: Option<SyncError>,
    pub create_failure: Option<CreateTaskError>,
    pub created: Arc<Mutex<Vec<TaskForm>>>,
    pub listed: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            ready: true,
            authenticated: true,
            default_list: Some("list-default".into()),
            boards: vec![],
            lists: vec![],
            tasks: vec![],
            read_failure: None,
            create_failure: None,
            created: Arc::new(Mutex::new(Vec::new())),
            listed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_tasks(mut self, names: &[&str]) -> Self {
        self.tasks = names.iter().map(|n| make_task(n)).collect();
        self
    }

    pub fn with_boards(mut self, names: &[&str]) -> Self {
        self.boards = names
            .iter()
            .enumerate()
            .map(|(i, name)| Board {
                id: format!("board-{i}"),
                name: name.to_string(),
                description: None,
                closed: false,
                url: None,
                short_url: None,
            })
            .collect();
        self
    }

    pub fn with_lists(mut self, names: &[&str]) -> Self {
        self.lists = names
            .iter()
            .enumerate()
            .map(|(i, name)| List {
                id: format!("list-{i}"),
                name: name.to_string(),
                closed: false,
                board_id: None,
                position: i as f64,
            })
            .collect();
        self
    }

    pub fn with_read_failure(mut self, err: SyncError) -> Self {
        self.read_failure = Some(err);
        self
    }

    pub fn with_create_failure(mut self, err: CreateTaskError) -> Self {
        self.create_failure = Some(err);
        self
    }

    fn read<T: Clone>(&self, items: &[T]) -> Fetched<T> {
        match &self.read_failure {
            Some(err) => Fetched::degraded(err.clone()),
            None => Fetched::ok(items.to_vec()),
        }
    }
}

pub fn make_task(name: &str) -> Task {
    Task {
        id: Some(format!("id-{name}")),
        name: name.to_string(),
        description: Some(format!("About {name}")),
        url: Some(format!("https://trello.com/c/{name}")),
        ..Task::default()
    }
}

#[async_trait]
impl CardService for MockService {
    fn name(&self) -> &str {
        "Mock"
    }

    fn is_service_ready(&self) -> bool {
        self.ready
    }

    async fn check_authentication(&self) -> bool {
        self.authenticated
    }

    async fn list_boards(&self) -> Fetched<Board> {
        self.read(&self.boards)
    }

    async fn list_lists(&self, _board_id: &str) -> Fetched<List> {
        self.read(&self.lists)
    }

    async fn list_tasks(&self, list_id: &str) -> Fetched<Task> {
        self.listed.lock().unwrap().push(list_id.to_string());
        self.read(&self.tasks)
    }

    async fn tasks_for_display(&self) -> Fetched<Task> {
        match &self.default_list {
            Some(list) => self.list_tasks(list).await,
            None => Fetched::degraded(SyncError::Configuration("No default list".into())),
        }
    }

    async fn create_task(&self, form: &TaskForm) -> Result<Task, CreateTaskError> {
        if let Some(err) = &self.create_failure {
            return Err(err.clone());
        }
        self.created.lock().unwrap().push(form.clone());
        Ok(mapper::form_to_task(form))
    }
}

#[tokio::test]
async fn display_reads_default_list() {
    let service = MockService::new().with_tasks(&["a", "b"]);
    let listed = service.listed.clone();

    let fetched = service.tasks_for_display().await;

    assert_eq!(fetched.items.len(), 2);
    assert_eq!(listed.lock().unwrap().as_slice(), &["list-default"]);
}

#[tokio::test]
async fn display_without_default_list_is_degraded() {
    let mut service = MockService::new().with_tasks(&["a"]);
    service.default_list = None;
    let listed = service.listed.clone();

    let fetched = service.tasks_for_display().await;

    assert!(fetched.items.is_empty());
    assert!(fetched.is_degraded());
    assert!(listed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_failure_propagates() {
    let service =
        MockService::new().with_create_failure(CreateTaskError::Rejected { status: Some(400) });
    let result = service.create_task(&TaskForm::new("Fix login")).await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Check the API configuration"));
}

#[tokio::test]
async fn services_are_usable_as_trait_objects() {
    let services: Vec<Box<dyn CardService>> = vec![
        Box::new(MockService::new().with_boards(&["Team"])),
        Box::new(MockService::new().with_read_failure(SyncError::Status { status: 500 })),
    ];

    let healthy = services[0].list_boards().await;
    assert_eq!(healthy.items[0].name, "Team");

    let failing = services[1].list_boards().await;
    assert!(failing.items.is_empty());
    assert_eq!(failing.diagnostic, Some(SyncError::Status { status: 500 }));
}

#[test]
fn fetched_map_keeps_diagnostic() {
    let fetched: Fetched<u8> = Fetched::degraded(SyncError::Transport("timeout".into()));
    let mapped = fetched.map(|n| n.to_string());
    assert!(mapped.items.is_empty());
    assert_eq!(mapped.diagnostic, Some(SyncError::Transport("timeout".into())));

    let ok = Fetched::ok(vec![1u8, 2]).map(|n| n * 10);
    assert_eq!(ok.items, vec![10, 20]);
    assert!(!ok.is_degraded());
}

#[test]
fn create_service_builds_trello_client() {
    let service = super::create_service(&crate::config::AppConfig::default()).unwrap();
    assert_eq!(service.name(), "Trello");
    assert!(!service.is_service_ready());
}
