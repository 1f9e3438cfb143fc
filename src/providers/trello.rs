use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::{CardService, Fetched};
use crate::config::TrelloConfig;
use crate::error::{CreateTaskError, SyncError};
use crate::gate;
use crate::mapper;
use crate::model::form::TaskForm;
use crate::model::task::Task;
use crate::model::trello::{Board, Card, List};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the Trello boards/lists/cards endpoints.
///
/// Holds nothing but its configuration and a connection pool, so a single
/// instance can be shared between concurrent callers.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    config: TrelloConfig,
    client: reqwest::Client,
}

impl TrelloClient {
    pub fn new(config: TrelloConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .context("Cannot build Trello HTTP client")?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &TrelloConfig {
        &self.config
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [
            ("key", self.config.key().unwrap_or_default()),
            ("token", self.config.token().unwrap_or_default()),
        ]
    }

    /// Append `segments` to the base URL. Each segment is percent-encoded on
    /// its own, so ids containing `/`, `?` or `#` cannot leave their segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SyncError> {
        let base = self.config.base_url().unwrap_or_default();
        let invalid = |reason: String| SyncError::InvalidUrl {
            url: base.to_string(),
            reason,
        };

        let mut url = Url::parse(base).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_open<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Vec<T>, SyncError> {
        let url = self.endpoint(segments)?;
        let response = self
            .client
            .get(url)
            .query(&self.auth_params())
            .query(&[("filter", "open")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SyncError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| SyncError::Decode(err.to_string()))
    }

    async fn read_open<T: DeserializeOwned>(&self, segments: &[&str], what: &str) -> Fetched<T> {
        match self.fetch_open(segments).await {
            Ok(items) => {
                info!(count = items.len(), "Fetched {what} from Trello");
                Fetched::ok(items)
            }
            Err(err) => {
                match &err {
                    SyncError::Status { status } => {
                        warn!(status, "Unexpected response from Trello while fetching {what}")
                    }
                    _ => error!(error = %err, "Failed to fetch {what} from Trello"),
                }
                Fetched::degraded(err)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_boards_for_current_user(&self) -> Fetched<Board> {
        info!("Fetching boards from Trello");
        self.read_open(&["members", "me", "boards"], "boards").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_lists_for_board(&self, board_id: &str) -> Fetched<List> {
        info!(board_id, "Fetching lists for board");
        self.read_open(&["boards", board_id, "lists"], "lists").await
    }

    pub async fn list_lists_for_configured_board(&self) -> Fetched<List> {
        match gate::require_board(&self.config) {
            Ok(board_id) => self.list_lists_for_board(board_id).await,
            Err(err) => {
                warn!("No board id configured");
                Fetched::degraded(err)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_cards_for_list(&self, list_id: &str) -> Fetched<Task> {
        info!(list_id, "Fetching cards for list");
        self.read_open::<Card>(&["lists", list_id, "cards"], "cards")
            .await
            .map(mapper::card_to_task)
    }

    pub async fn list_default_cards(&self) -> Fetched<Task> {
        match gate::require_default_list(&self.config) {
            Ok(list_id) => self.list_cards_for_list(list_id).await,
            Err(err) => {
                warn!("No default list configured");
                Fetched::degraded(err)
            }
        }
    }

    pub async fn tasks_for_display(&self) -> Fetched<Task> {
        info!("Fetching all tasks for display");
        self.list_default_cards().await
    }

    async fn submit_card(&self, list_id: &str, task: &Task) -> Result<Option<Card>, SyncError> {
        let url = self.endpoint(&["cards"])?;
        let response = self
            .client
            .post(url)
            .query(&self.auth_params())
            .query(&[
                ("idList", list_id),
                ("name", task.name.as_str()),
                ("desc", task.description_or_empty()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SyncError::Status {
                status: status.as_u16(),
            });
        }

        match response.json::<Card>().await {
            Ok(card) => Ok(Some(card)),
            Err(err) => {
                debug!(
                    error = %SyncError::from(err),
                    "Card created but the response was not a card"
                );
                Ok(None)
            }
        }
    }

    /// POST a card into `list_id`.
    ///
    /// Failures are logged and returned as values, never propagated further;
    /// `is_ok()` is the success flag. `Ok(None)` means Trello accepted the card
    /// but the body did not decode as one.
    #[tracing::instrument(level = "debug", skip(self, task), fields(name = %task.name))]
    pub async fn create_card(&self, list_id: &str, task: &Task) -> Result<Option<Card>, SyncError> {
        info!(list_id, "Creating card");
        let outcome = self.submit_card(list_id, task).await;
        match &outcome {
            Ok(_) => info!("Card created"),
            Err(SyncError::Status { status }) => warn!(status, "Could not create card"),
            Err(err) => error!(error = %err, "Failed to create card"),
        }
        outcome
    }

    pub async fn create_card_in_default_list(&self, task: &Task) -> Result<Option<Card>, SyncError> {
        match gate::require_default_list(&self.config) {
            Ok(list_id) => self.create_card(list_id, task).await,
            Err(err) => {
                warn!("No default list configured for card creation");
                Err(err)
            }
        }
    }

    /// Create a card in the default list from a submitted form.
    ///
    /// Unlike the other operations this one reports every failure to the
    /// caller as a tagged error. On success the returned task carries the new
    /// card's ids.
    pub async fn create_task(&self, form: &TaskForm) -> Result<Task, CreateTaskError> {
        info!(title = %form.title, "Creating task from form");
        gate::check_create(&self.config, form)?;
        let task = mapper::form_to_task(form);

        let card = self.create_card_in_default_list(&task).await?;
        info!(title = %form.title, "Task created");
        Ok(match card {
            Some(card) => mapper::link_created_card(task, card),
            None => task,
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn check_authentication(&self) -> bool {
        info!("Checking Trello API authentication");
        let url = match self.endpoint(&["members", "me"]) {
            Ok(url) => url,
            Err(err) => {
                error!(error = %err, "Failed to check authentication");
                return false;
            }
        };

        match self.client.get(url).query(&self.auth_params()).send().await {
            Ok(response) => {
                let valid = response.status() == StatusCode::OK;
                info!("Authentication {}", if valid { "valid" } else { "invalid" });
                valid
            }
            Err(err) => {
                error!(error = %SyncError::from(err), "Failed to check authentication");
                false
            }
        }
    }

    pub fn is_service_ready(&self) -> bool {
        gate::is_service_ready(&self.config)
    }
}

#[async_trait]
impl CardService for TrelloClient {
    fn name(&self) -> &str {
        "Trello"
    }

    fn is_service_ready(&self) -> bool {
        self.is_service_ready()
    }

    async fn check_authentication(&self) -> bool {
        self.check_authentication().await
    }

    async fn list_boards(&self) -> Fetched<Board> {
        self.list_boards_for_current_user().await
    }

    async fn list_lists(&self, board_id: &str) -> Fetched<List> {
        self.list_lists_for_board(board_id).await
    }

    async fn list_tasks(&self, list_id: &str) -> Fetched<Task> {
        self.list_cards_for_list(list_id).await
    }

    async fn tasks_for_display(&self) -> Fetched<Task> {
        self.tasks_for_display().await
    }

    async fn create_task(&self, form: &TaskForm) -> Result<Task, CreateTaskError> {
        self.create_task(form).await
    }
}
