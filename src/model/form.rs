use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const ASSIGNEE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Jira,
    Trello,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Jira, Platform::Trello];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Jira => "jira",
            Platform::Trello => "trello",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Platform::Jira => Platform::Trello,
            Platform::Trello => Platform::Jira,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FieldError::new("platform", "Platform must be jira or trello"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Fields collected from the user when creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub platform: Platform,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub category: Option<String>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            assignee: None,
            platform: Platform::default(),
            due_date: None,
            priority: Some("Medium".to_string()),
            category: None,
        }
    }
}

fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl TaskForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn has_category(&self) -> bool {
        non_blank(&self.category)
    }

    pub fn has_assignee(&self) -> bool {
        non_blank(&self.assignee)
    }

    pub fn has_due_date(&self) -> bool {
        self.due_date.is_some()
    }

    pub fn is_jira(&self) -> bool {
        self.platform == Platform::Jira
    }

    /// Check the field constraints, returning every violation found.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let title_len = self.title.trim().chars().count();
        if title_len == 0 {
            errors.push(FieldError::new("title", "Title is required"));
        } else if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_len) {
            errors.push(FieldError::new(
                "title",
                format!("Title must be between {TITLE_MIN_CHARS} and {TITLE_MAX_CHARS} characters"),
            ));
        }

        if let Some(desc) = &self.description {
            if desc.chars().count() > DESCRIPTION_MAX_CHARS {
                errors.push(FieldError::new(
                    "description",
                    format!("Description must not exceed {DESCRIPTION_MAX_CHARS} characters"),
                ));
            }
        }

        if let Some(assignee) = &self.assignee {
            if assignee.chars().count() > ASSIGNEE_MAX_CHARS {
                errors.push(FieldError::new(
                    "assignee",
                    format!("Assignee must not exceed {ASSIGNEE_MAX_CHARS} characters"),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Display for TaskForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TaskForm{{title='{}', description='{}', priority='{}', category='{}'}}",
            self.title,
            self.description.as_deref().unwrap_or(""),
            self.priority.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
        )
    }
}

pub fn parse_due_date(input: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| FieldError::new("due_date", "Due date must be formatted as YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_defaults_to_medium_jira() {
        let form = TaskForm::new("Fix login");
        assert_eq!(form.priority.as_deref(), Some("Medium"));
        assert!(form.is_jira());
        assert_eq!(form.platform, Platform::Jira);
    }

    #[test]
    fn valid_form_passes() {
        let form = TaskForm {
            description: Some("Users can't log in".into()),
            assignee: Some("ada".into()),
            ..TaskForm::new("Fix login")
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn blank_title_is_required_error() {
        let errors = TaskForm::new("   ").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert!(errors[0].message.contains("required"));
    }

    #[test]
    fn title_length_bounds() {
        assert!(TaskForm::new("ab").validate().is_err());
        assert!(TaskForm::new("abc").validate().is_ok());
        assert!(TaskForm::new("x".repeat(100)).validate().is_ok());
        assert!(TaskForm::new("x".repeat(101)).validate().is_err());
    }

    #[test]
    fn title_length_counts_characters() {
        assert!(TaskForm::new("修复登").validate().is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let form = TaskForm {
            description: Some("d".repeat(501)),
            assignee: Some("a".repeat(101)),
            ..TaskForm::new("")
        };
        let fields: Vec<&str> = form
            .validate()
            .unwrap_err()
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["title", "description", "assignee"]);
    }

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("TRELLO".parse::<Platform>().unwrap(), Platform::Trello);
        assert_eq!(" jira ".parse::<Platform>().unwrap(), Platform::Jira);
        assert!("asana".parse::<Platform>().is_err());
    }

    #[test]
    fn helper_predicates_ignore_whitespace() {
        let form = TaskForm {
            category: Some("backend".into()),
            assignee: Some("  ".into()),
            ..TaskForm::new("Fix login")
        };
        assert!(form.has_category());
        assert!(!form.has_assignee());
        assert!(!form.has_due_date());
    }

    #[test]
    fn due_date_parsing() {
        assert_eq!(
            parse_due_date("2024-06-30").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
        assert_eq!(parse_due_date("30/06/2024").unwrap_err().field, "due_date");
    }
}
