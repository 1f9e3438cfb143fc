//! Records mirroring the JSON returned by the Trello REST API.
//!
//! Only `id` (and `name` where the API always sends one) are required.
//! Everything else falls back to its default and unknown fields are ignored.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, rename = "idBoard")]
    pub board_id: Option<String>,
    #[serde(default, rename = "pos")]
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    #[serde(default, rename = "idBoard")]
    pub board_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default, rename = "idList")]
    pub list_id: Option<String>,
    #[serde(default, rename = "idBoard")]
    pub board_id: Option<String>,
    #[serde(default, rename = "due")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub due_complete: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub date_last_activity: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, rename = "pos")]
    pub position: f64,
}
