pub mod trello;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::{CreateTaskError, SyncError};
use crate::model::form::TaskForm;
use crate::model::task::Task;
use crate::model::trello::{Board, List};

/// Result of a read against the board service.
///
/// Reads never fail outright. When something went wrong `items` is empty and
/// `diagnostic` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub diagnostic: Option<SyncError>,
}

impl<T> Fetched<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self {
            items,
            diagnostic: None,
        }
    }

    pub fn degraded(diagnostic: SyncError) -> Self {
        Self {
            items: Vec::new(),
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.diagnostic.is_some()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Fetched<U> {
        Fetched {
            items: self.items.into_iter().map(f).collect(),
            diagnostic: self.diagnostic,
        }
    }
}

#[async_trait]
pub trait CardService: Send + Sync {
    fn name(&self) -> &str;
    fn is_service_ready(&self) -> bool;
    async fn check_authentication(&self) -> bool;
    async fn list_boards(&self) -> Fetched<Board>;
    async fn list_lists(&self, board_id: &str) -> Fetched<List>;
    async fn list_tasks(&self, list_id: &str) -> Fetched<Task>;
    /// Tasks from the default list, for the dashboard.
    async fn tasks_for_display(&self) -> Fetched<Task>;
    async fn create_task(&self, form: &TaskForm) -> Result<Task, CreateTaskError>;
}

#[cfg(test)]
pub mod tests;

pub fn create_service(config: &AppConfig) -> Result<Box<dyn CardService>> {
    Ok(Box::new(trello::TrelloClient::new(config.trello.clone())?))
}
