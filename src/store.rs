//! Document store for tasks and users.
//!
//! Two JSON document files live under the data directory:
//!
//! ```text
//! <data_dir>/
//!   store.lock    # fs2 lock held for the store's lifetime
//!   tasks.json    # all task documents, insertion order preserved
//!   users.json    # user directory
//! ```
//!
//! A handle is constructed with [`Store::open`], injected into the HTTP
//! layer, and released with [`Store::close`]. In-process access is
//! serialized through a `RwLock`; the ownership-gated conditional update
//! happens entirely under the write lock, which is what makes it atomic
//! against racing requests. Every mutation rewrites the touched document
//! file atomically before returning.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::pagination::PageParams;
use crate::query::{SortSpec, TaskFilter};
use crate::stats::TaskStats;
use crate::task::{Task, TaskChanges};
use crate::user::User;

const TASKS_FILE: &str = "tasks.json";
const USERS_FILE: &str = "users.json";
const LOCK_FILE: &str = "store.lock";

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    users: Vec<User>,
}

#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
    state: RwLock<State>,
    _lock: FileLock,
}

impl Store {
    /// Open (or create) the store under `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        let file_lock = FileLock::acquire(data_dir.join(LOCK_FILE), DEFAULT_LOCK_TIMEOUT_MS)?;

        let tasks = read_documents(&data_dir.join(TASKS_FILE))?;
        let users = read_documents(&data_dir.join(USERS_FILE))?;
        tracing::info!(
            data_dir = %data_dir.display(),
            tasks = tasks.len(),
            users = users.len(),
            "opened store"
        );

        Ok(Self {
            data_dir,
            state: RwLock::new(State { tasks, users }),
            _lock: file_lock,
        })
    }

    /// Flush and release the store. Dropping the handle also releases the
    /// lock; `close` exists so shutdown paths can surface flush errors.
    pub fn close(self) -> Result<()> {
        let state = self.state.read();
        self.flush_tasks(&state.tasks)?;
        self.flush_users(&state.users)?;
        Ok(())
    }

    // =========================================================================
    // Task collection
    // =========================================================================

    /// Filtered, sorted, paginated find
    pub fn find_tasks(&self, filter: &TaskFilter, sort: &SortSpec, pages: PageParams) -> Vec<Task> {
        let state = self.state.read();
        let mut matched: Vec<&Task> = state.tasks.iter().filter(|t| filter.matches(t)).collect();
        // Stable sort: ties keep insertion order
        matched.sort_by(|a, b| sort.compare(a, b));
        matched
            .into_iter()
            .skip(pages.skip() as usize)
            .take(pages.limit as usize)
            .cloned()
            .collect()
    }

    pub fn count_tasks(&self, filter: &TaskFilter) -> u64 {
        let state = self.state.read();
        state.tasks.iter().filter(|t| filter.matches(t)).count() as u64
    }

    pub fn find_task(&self, id: &str) -> Option<Task> {
        let state = self.state.read();
        state.tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn insert_task(&self, task: Task) -> Result<Task> {
        let mut state = self.state.write();
        state.tasks.push(task.clone());
        self.flush_tasks(&state.tasks)?;
        Ok(task)
    }

    /// Atomic conditional update: the record must match both id and owner,
    /// checked and replaced under the write lock in one step. `None` means
    /// no record matched; callers cannot tell a missing id from an
    /// ownership mismatch.
    pub fn update_task_owned(
        &self,
        id: &str,
        owner: &str,
        changes: &TaskChanges,
    ) -> Result<Option<Task>> {
        let mut state = self.state.write();
        let Some(task) = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner)
        else {
            return Ok(None);
        };
        changes.apply(task);
        task.updated_at = chrono::Utc::now();
        let updated = task.clone();
        self.flush_tasks(&state.tasks)?;
        Ok(Some(updated))
    }

    /// Replace a previously fetched task (the note-append path's
    /// read-modify-write save). Returns `None` if the record disappeared
    /// between fetch and save.
    pub fn save_task(&self, mut task: Task) -> Result<Option<Task>> {
        let mut state = self.state.write();
        let Some(slot) = state.tasks.iter_mut().find(|t| t.id == task.id) else {
            return Ok(None);
        };
        task.updated_at = chrono::Utc::now();
        *slot = task.clone();
        self.flush_tasks(&state.tasks)?;
        Ok(Some(task))
    }

    /// Delete by id, optionally gated on the owning user.
    pub fn delete_task(&self, id: &str, required_owner: Option<&str>) -> Result<Option<Task>> {
        let mut state = self.state.write();
        let position = state.tasks.iter().position(|t| {
            t.id == id && required_owner.map_or(true, |owner| t.user_id == owner)
        });
        let Some(position) = position else {
            return Ok(None);
        };
        let removed = state.tasks.remove(position);
        self.flush_tasks(&state.tasks)?;
        Ok(Some(removed))
    }

    /// Single-pass grouped counts for one owner's tasks
    pub fn stats_for(&self, owner: &str) -> TaskStats {
        let state = self.state.read();
        TaskStats::collect(state.tasks.iter().filter(|t| t.user_id == owner))
    }

    // =========================================================================
    // User directory
    // =========================================================================

    pub fn find_user(&self, id: &str) -> Option<User> {
        let state = self.state.read();
        state.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        let state = self.state.read();
        state.users.iter().find(|u| u.username == username).cloned()
    }

    /// Resolve mention usernames to user ids, preserving request order and
    /// duplicates. Returns the resolved ids and the usernames that matched
    /// no user.
    pub fn resolve_mentions(&self, usernames: &[String]) -> (Vec<String>, Vec<String>) {
        let state = self.state.read();
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for username in usernames {
            match state.users.iter().find(|u| &u.username == username) {
                Some(user) => resolved.push(user.id.clone()),
                None => unresolved.push(username.clone()),
            }
        }
        (resolved, unresolved)
    }

    pub fn insert_user(&self, user: User) -> Result<User> {
        let mut state = self.state.write();
        state.users.push(user.clone());
        self.flush_users(&state.users)?;
        Ok(user)
    }

    /// Drop all tasks and users (seeding starts from a clean slate)
    pub fn clear_all(&self) -> Result<()> {
        let mut state = self.state.write();
        state.tasks.clear();
        state.users.clear();
        self.flush_tasks(&state.tasks)?;
        self.flush_users(&state.users)?;
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn flush_tasks(&self, tasks: &[Task]) -> Result<()> {
        write_documents(&self.data_dir.join(TASKS_FILE), tasks)
    }

    fn flush_users(&self, users: &[User]) -> Result<()> {
        write_documents(&self.data_dir.join(USERS_FILE), users)
    }
}

fn read_documents<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    let documents: Vec<T> = serde_json::from_str(&content)?;
    Ok(documents)
}

fn write_documents<T: serde::Serialize>(path: &Path, documents: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(documents)?;
    lock::write_atomic(path, json.as_bytes())
}
