use std::time::{Duration, Instant};

use crate::event::KeyAction;
use crate::model::form::{parse_due_date, FieldError, Platform, TaskForm};
use crate::model::task::Task;
use crate::model::trello::{Board, List};
use crate::providers::{CardService, Fetched};

const FLASH_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Tasks,
    Boards,
    Lists,
    CreateForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub text: String,
    pub kind: FlashKind,
    pub at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Category,
    Assignee,
    DueDate,
    Platform,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Category,
        FormField::Assignee,
        FormField::DueDate,
        FormField::Platform,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Category => "Category",
            FormField::Assignee => "Assignee",
            FormField::DueDate => "Due (YYYY-MM-DD)",
            FormField::Platform => "Platform",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text typed into the create-task form, before it is turned into a `TaskForm`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub assignee: String,
    pub due_date: String,
    pub platform: Platform,
    pub focus: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        let defaults = TaskForm::default();
        Self {
            title: String::new(),
            description: String::new(),
            priority: defaults.priority.unwrap_or_default(),
            category: String::new(),
            assignee: String::new(),
            due_date: String::new(),
            platform: defaults.platform,
            focus: FormField::Title,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl FormState {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Priority => &self.priority,
            FormField::Category => &self.category,
            FormField::Assignee => &self.assignee,
            FormField::DueDate => &self.due_date,
            FormField::Platform => self.platform.as_str(),
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Priority => Some(&mut self.priority),
            FormField::Category => Some(&mut self.category),
            FormField::Assignee => Some(&mut self.assignee),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Platform => None,
        }
    }

    pub fn push(&mut self, c: char) {
        if let Some(value) = self.value_mut(self.focus) {
            value.push(c);
        } else if c == ' ' {
            self.platform = self.platform.next();
        }
    }

    pub fn pop(&mut self) {
        if let Some(value) = self.value_mut(self.focus) {
            value.pop();
        }
    }

    pub fn to_task_form(&self) -> Result<TaskForm, Vec<FieldError>> {
        let mut due_error = None;
        let due_date = match optional(&self.due_date) {
            Some(raw) => parse_due_date(&raw).map_err(|e| due_error = Some(e)).ok(),
            None => None,
        };

        let form = TaskForm {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            assignee: optional(&self.assignee),
            platform: self.platform,
            due_date,
            priority: optional(&self.priority),
            category: optional(&self.category),
        };

        let mut errors = form.validate().err().unwrap_or_default();
        errors.extend(due_error);
        if errors.is_empty() {
            Ok(form)
        } else {
            Err(errors)
        }
    }
}

fn step(index: &mut usize, len: usize, down: bool) {
    if down {
        if len > 0 && *index < len - 1 {
            *index += 1;
        }
    } else if *index > 0 {
        *index -= 1;
    }
}

pub struct App {
    pub tasks: Vec<Task>,
    pub selected_task: usize,
    pub boards: Vec<Board>,
    pub selected_board: usize,
    pub lists: Vec<List>,
    pub selected_list: usize,
    pub current_board: Option<Board>,
    pub current_list: Option<List>,
    pub view_mode: ViewMode,
    pub form: FormState,
    pub flash_message: Option<Flash>,
    pub loading: bool,
    pub authenticated: Option<bool>,
    pub should_quit: bool,
    service: Box<dyn CardService>,
}

impl App {
    pub fn new(service: Box<dyn CardService>) -> Self {
        Self {
            tasks: Vec::new(),
            selected_task: 0,
            boards: Vec::new(),
            selected_board: 0,
            lists: Vec::new(),
            selected_list: 0,
            current_board: None,
            current_list: None,
            view_mode: ViewMode::Tasks,
            form: FormState::default(),
            flash_message: None,
            loading: true,
            authenticated: None,
            should_quit: false,
            service,
        }
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected_task)
    }

    pub fn list_title(&self) -> String {
        match &self.current_list {
            Some(list) => list.name.clone(),
            None => "Default list".to_string(),
        }
    }

    fn flash(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.flash_message = Some(Flash {
            text: text.into(),
            kind,
            at: Instant::now(),
        });
    }

    /// Take the items out of a read, surfacing its diagnostic as a flash message.
    fn absorb<T>(&mut self, fetched: Fetched<T>) -> Vec<T> {
        if let Some(diagnostic) = &fetched.diagnostic {
            self.flash(FlashKind::Error, format!("Fetch error: {diagnostic}"));
        }
        fetched.items
    }

    pub async fn startup(&mut self) {
        if !self.service.is_service_ready() {
            self.loading = false;
            self.flash(
                FlashKind::Error,
                "Trello is not configured. Set key and token in ~/.taskcard/config.toml",
            );
            return;
        }

        let authenticated = self.service.check_authentication().await;
        self.authenticated = Some(authenticated);
        if !authenticated {
            self.flash(
                FlashKind::Error,
                "Trello authentication failed. Check key and token.",
            );
        }
        self.refresh_tasks().await;
    }

    pub async fn update(&mut self, action: Action) {
        if let Some(flash) = &self.flash_message {
            if flash.at.elapsed() >= FLASH_TTL {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key).await,
            Action::Tick => {}
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    async fn handle_key(&mut self, key: KeyAction) {
        if self.view_mode == ViewMode::CreateForm {
            self.handle_form_key(key).await;
            return;
        }

        match key {
            KeyAction::Up | KeyAction::Down => {
                let down = key == KeyAction::Down;
                match self.view_mode {
                    ViewMode::Tasks => step(&mut self.selected_task, self.tasks.len(), down),
                    ViewMode::Boards => step(&mut self.selected_board, self.boards.len(), down),
                    ViewMode::Lists => step(&mut self.selected_list, self.lists.len(), down),
                    ViewMode::CreateForm => {}
                }
            }
            KeyAction::Select | KeyAction::Right => match self.view_mode {
                ViewMode::Boards => self.select_board().await,
                ViewMode::Lists => self.select_list().await,
                _ => {}
            },
            KeyAction::Escape | KeyAction::Left => match self.view_mode {
                ViewMode::Lists => self.view_mode = ViewMode::Boards,
                ViewMode::Boards => self.view_mode = ViewMode::Tasks,
                _ => {}
            },
            KeyAction::Char('q') => self.should_quit = true,
            KeyAction::Char('r') => match self.view_mode {
                ViewMode::Boards => self.open_boards().await,
                ViewMode::Lists => {
                    if let Some(board) = self.current_board.clone() {
                        self.load_lists(&board).await;
                    }
                }
                _ => self.refresh_tasks().await,
            },
            KeyAction::Char('b') => self.open_boards().await,
            KeyAction::Char('n') => {
                self.form = FormState::default();
                self.view_mode = ViewMode::CreateForm;
            }
            KeyAction::Char('d') => {
                self.current_list = None;
                self.view_mode = ViewMode::Tasks;
                self.refresh_tasks().await;
            }
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Tab | KeyAction::Down => self.form.focus = self.form.focus.next(),
            KeyAction::BackTab | KeyAction::Up => self.form.focus = self.form.focus.prev(),
            KeyAction::Left | KeyAction::Right => {
                if self.form.focus == FormField::Platform {
                    self.form.platform = self.form.platform.next();
                }
            }
            KeyAction::Char(c) => self.form.push(c),
            KeyAction::Backspace => self.form.pop(),
            KeyAction::Escape => self.view_mode = ViewMode::Tasks,
            KeyAction::Select => self.submit_form().await,
        }
    }

    async fn submit_form(&mut self) {
        let form = match self.form.to_task_form() {
            Ok(form) => form,
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                self.flash(FlashKind::Error, message);
                return;
            }
        };

        self.loading = true;
        match self.service.create_task(&form).await {
            Ok(task) => {
                self.form = FormState::default();
                self.view_mode = ViewMode::Tasks;
                // New cards always land in the default list
                self.current_list = None;
                self.refresh_tasks().await;
                self.flash(
                    FlashKind::Success,
                    format!("Task created successfully: {}", task.name),
                );
            }
            Err(err) => {
                self.loading = false;
                self.flash(FlashKind::Error, format!("An error occurred: {err}"));
            }
        }
    }

    pub async fn refresh_tasks(&mut self) {
        self.loading = true;
        let fetched = match &self.current_list {
            Some(list) => self.service.list_tasks(&list.id).await,
            None => self.service.tasks_for_display().await,
        };
        self.tasks = self.absorb(fetched);
        if self.selected_task >= self.tasks.len() {
            self.selected_task = self.tasks.len().saturating_sub(1);
        }
        self.loading = false;
    }

    async fn open_boards(&mut self) {
        self.loading = true;
        let fetched = self.service.list_boards().await;
        self.boards = self.absorb(fetched);
        self.selected_board = 0;
        self.view_mode = ViewMode::Boards;
        self.loading = false;
    }

    async fn load_lists(&mut self, board: &Board) {
        self.loading = true;
        let fetched = self.service.list_lists(&board.id).await;
        self.lists = self.absorb(fetched);
        self.selected_list = 0;
        self.loading = false;
    }

    async fn select_board(&mut self) {
        let Some(board) = self.boards.get(self.selected_board).cloned() else {
            return;
        };
        self.load_lists(&board).await;
        self.current_board = Some(board);
        self.view_mode = ViewMode::Lists;
    }

    async fn select_list(&mut self) {
        let Some(list) = self.lists.get(self.selected_list).cloned() else {
            return;
        };
        self.flash(FlashKind::Info, format!("List: {}", list.name));
        self.current_list = Some(list);
        self.selected_task = 0;
        self.view_mode = ViewMode::Tasks;
        self.refresh_tasks().await;
    }
}
