use crate::config::TrelloConfig;
use crate::error::SyncError;
use crate::model::form::TaskForm;

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// True when the key, token and base URL are all set.
pub fn is_service_ready(config: &TrelloConfig) -> bool {
    present(config.key()) && present(config.token()) && present(config.base_url())
}

/// The default list id, or the reason it cannot be used.
pub fn require_default_list(config: &TrelloConfig) -> Result<&str, SyncError> {
    match config.default_list_id() {
        Some(id) if config.has_default_list_id() => Ok(id),
        _ => Err(SyncError::Configuration(
            "No default list is configured. Check config.toml".into(),
        )),
    }
}

pub fn require_board(config: &TrelloConfig) -> Result<&str, SyncError> {
    match config.board_id() {
        Some(id) if config.has_board_id() => Ok(id),
        _ => Err(SyncError::Configuration(
            "No board id is configured. Check config.toml".into(),
        )),
    }
}

pub fn require_ready(config: &TrelloConfig) -> Result<(), SyncError> {
    if is_service_ready(config) {
        Ok(())
    } else {
        Err(SyncError::Configuration(
            "Trello key, token and base URL must be configured".into(),
        ))
    }
}

/// Preconditions for creating a task, checked before any request is built.
pub fn check_create(config: &TrelloConfig, form: &TaskForm) -> Result<(), SyncError> {
    require_default_list(config)?;
    if form.title.trim().is_empty() {
        return Err(SyncError::Configuration(
            "Task title must not be blank".into(),
        ));
    }
    require_ready(config)
}
