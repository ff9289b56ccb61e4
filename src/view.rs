//! Response projections: tasks joined with the display fields of the
//! users they reference (owner, mentions, note authors).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::Store;
use crate::task::{Priority, Task};
use crate::user::UserRef;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: String,
    /// Owner expanded to display fields; null if the user record is gone
    pub user_id: Option<UserRef>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub completed: bool,
    pub tags: Vec<String>,
    /// Mentions whose user records no longer exist are omitted
    pub mentions: Vec<UserRef>,
    pub notes: Vec<NoteView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub content: String,
    pub created_by: Option<UserRef>,
    pub created_at: DateTime<Utc>,
}

impl TaskView {
    pub fn resolve(task: &Task, store: &Store) -> Self {
        let user_ref = |id: &str| store.find_user(id).as_ref().map(UserRef::from);
        Self {
            id: task.id.clone(),
            user_id: user_ref(&task.user_id),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            completed: task.completed,
            tags: task.tags.clone(),
            mentions: task
                .mentions
                .iter()
                .filter_map(|id| user_ref(id))
                .collect(),
            notes: task
                .notes
                .iter()
                .map(|note| NoteView {
                    content: note.content.clone(),
                    created_by: user_ref(&note.created_by),
                    created_at: note.created_at,
                })
                .collect(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
