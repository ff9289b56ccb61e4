//! Task domain types and the typed command structs accepted at the HTTP
//! boundary.
//!
//! Request payloads are deserialized into per-operation command structs
//! before any business logic runs; unknown fields in a request body are
//! dropped by serde, which is what enforces the update allow-list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const NOTE_MAX_LEN: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse the lowercase wire form; anything else is rejected upstream.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Ordering rank used by `sortBy=priority`
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

/// Freeform note attached to a task, attributed to its author.
/// Notes are append-only; nothing in this crate reorders or removes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Owning user; immutable after creation
    pub user_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Resolved user ids, never raw usernames
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task owned by `owner`. The command must already be
    /// validated and its mention usernames resolved to ids.
    pub fn create(owner: &str, command: &CreateTask, mention_ids: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_task_id(),
            user_id: owner.to_string(),
            title: command.title.trim().to_string(),
            description: command
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            priority: command.priority(),
            completed: false,
            tags: command.tags.clone().unwrap_or_default(),
            mentions: mention_ids,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate a store-assigned task identifier
pub fn new_task_id() -> String {
    Ulid::new().to_string().to_ascii_lowercase()
}

/// Validate the shape of a caller-supplied task id.
///
/// Malformed ids are the cast-error case: they can never match a record,
/// and write paths report them as a 400 rather than a 404.
pub fn parse_task_id(raw: &str) -> Result<String> {
    Ulid::from_string(raw)
        .map(|_| raw.to_ascii_lowercase())
        .map_err(|_| Error::InvalidId(raw.to_string()))
}

/// Body of `POST /api/todos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    /// Raw priority string; validated rather than rejected by serde so the
    /// caller gets an envelope-shaped validation message
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Mention usernames, resolved to ids by the handler
    pub mentions: Option<Vec<String>>,
}

impl CreateTask {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        validate_title(Some(&self.title), &mut errors);
        validate_description(self.description.as_deref(), &mut errors);
        validate_priority(self.priority.as_deref(), &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Parsed priority; call after `validate`
    pub fn priority(&self) -> Priority {
        self.priority
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or_default()
    }
}

/// Body of `PUT /api/todos/{id}`.
///
/// The field set is the update allow-list; anything else in the request
/// body never reaches the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Mention usernames; `Some(vec![])` clears all mentions
    pub mentions: Option<Vec<String>>,
    pub completed: Option<bool>,
}

impl UpdateTask {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        validate_title(self.title.as_deref(), &mut errors);
        validate_description(self.description.as_deref(), &mut errors);
        validate_priority(self.priority.as_deref(), &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority.as_deref().and_then(Priority::parse)
    }
}

/// Body of `POST /api/todos/{id}/notes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddNote {
    #[serde(default)]
    pub content: String,
}

impl AddNote {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.content.trim().is_empty() {
            errors.push("Note content is required".to_string());
        } else if self.content.len() > NOTE_MAX_LEN {
            errors.push(format!(
                "Note cannot be more than {NOTE_MAX_LEN} characters"
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

/// Field changes applied by the store's conditional update.
/// Mentions here are resolved ids, produced by the handler.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub mentions: Option<Vec<String>>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.trim().to_string());
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(tags) = &self.tags {
            task.tags = tags.clone();
        }
        if let Some(mentions) = &self.mentions {
            task.mentions = mentions.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

fn validate_title(title: Option<&str>, errors: &mut Vec<String>) {
    let Some(title) = title else {
        return;
    };
    if title.trim().is_empty() {
        errors.push("Title is required".to_string());
    } else if title.len() > TITLE_MAX_LEN {
        errors.push(format!(
            "Title cannot be more than {TITLE_MAX_LEN} characters"
        ));
    }
}

fn validate_description(description: Option<&str>, errors: &mut Vec<String>) {
    if let Some(description) = description {
        if description.len() > DESCRIPTION_MAX_LEN {
            errors.push(format!(
                "Description cannot be more than {DESCRIPTION_MAX_LEN} characters"
            ));
        }
    }
}

fn validate_priority(priority: Option<&str>, errors: &mut Vec<String>) {
    if let Some(priority) = priority {
        if Priority::parse(priority).is_none() {
            errors.push("Priority must be one of: low, medium, high".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title() {
        let command = CreateTask {
            title: "  ".to_string(),
            ..Default::default()
        };
        let err = command.validate().unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors, vec!["Title is required".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn create_rejects_bad_priority() {
        let command = CreateTask {
            title: "Write tests".to_string(),
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        assert!(command.validate().is_err());
    }

    #[test]
    fn create_defaults_priority_to_medium() {
        let command = CreateTask {
            title: "Write tests".to_string(),
            ..Default::default()
        };
        command.validate().unwrap();
        assert_eq!(command.priority(), Priority::Medium);
    }

    #[test]
    fn update_tolerates_absent_fields() {
        let command = UpdateTask::default();
        command.validate().unwrap();
        assert!(command.priority().is_none());
    }

    #[test]
    fn update_rejects_overlong_title() {
        let command = UpdateTask {
            title: Some("t".repeat(TITLE_MAX_LEN + 1)),
            ..Default::default()
        };
        assert!(command.validate().is_err());
    }

    #[test]
    fn changes_only_touch_supplied_fields() {
        let command = CreateTask {
            title: "Original".to_string(),
            description: Some("keep me".to_string()),
            tags: Some(vec!["x".to_string()]),
            ..Default::default()
        };
        let mut task = Task::create("owner-1", &command, vec![]);

        let changes = TaskChanges {
            completed: Some(true),
            ..Default::default()
        };
        changes.apply(&mut task);

        assert!(task.completed);
        assert_eq!(task.title, "Original");
        assert_eq!(task.description.as_deref(), Some("keep me"));
        assert_eq!(task.tags, vec!["x".to_string()]);
    }

    #[test]
    fn empty_mentions_change_clears() {
        let command = CreateTask {
            title: "With mentions".to_string(),
            ..Default::default()
        };
        let mut task = Task::create("owner-1", &command, vec!["u1".to_string()]);

        let changes = TaskChanges {
            mentions: Some(Vec::new()),
            ..Default::default()
        };
        changes.apply(&mut task);
        assert!(task.mentions.is_empty());
    }

    #[test]
    fn task_ids_parse_case_insensitively() {
        let id = new_task_id();
        assert_eq!(parse_task_id(&id.to_ascii_uppercase()).unwrap(), id);
        assert!(parse_task_id("not-a-ulid").is_err());
    }

    #[test]
    fn note_content_is_required() {
        assert!(AddNote::default().validate().is_err());
        let note = AddNote {
            content: "looks good".to_string(),
        };
        note.validate().unwrap();
    }
}
