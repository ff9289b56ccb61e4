//! List-endpoint query construction: the dynamic filter predicate and the
//! sort key.
//!
//! All supplied constraints combine with AND semantics; an absent query
//! parameter imposes no constraint at all. The one cross-collection step
//! is mention resolution: the `mention` parameter carries a username, and
//! an unknown username short-circuits the whole list operation to an
//! empty result before the task store is consulted.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::store::Store;
use crate::task::Task;

/// Raw query parameters of `GET /api/todos`.
///
/// Everything arrives as optional strings; coercion (page numbers,
/// booleans, priority values) happens here rather than in serde so that
/// garbage input degrades the way the API documents instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<String>,
    pub tag: Option<String>,
    pub mention: Option<String>,
    pub search: Option<String>,
}

/// Conjunctive filter predicate evaluated by the task store
#[derive(Debug, Clone)]
pub struct TaskFilter {
    /// Always present; never overridable by caller input
    pub owner: String,
    /// Raw priority value. An unrecognized value matches nothing, it does
    /// not fall back to an open filter.
    pub priority: Option<String>,
    pub completed: Option<bool>,
    /// Tag set membership, not equality
    pub tag: Option<String>,
    /// Resolved mention user id
    pub mention: Option<String>,
    /// Case-insensitive substring over title OR description
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn for_owner(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            priority: None,
            completed: None,
            tag: None,
            mention: None,
            search: None,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        if task.user_id != self.owner {
            return false;
        }
        if let Some(priority) = &self.priority {
            if task.priority.as_str() != priority {
                return false;
            }
        }
        if let Some(completed) = self.completed {
            if task.completed != completed {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !task.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(mention) = &self.mention {
            if !task.mentions.iter().any(|m| m == mention) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

/// Result of building a filter from raw parameters
#[derive(Debug, Clone)]
pub enum FilterOutcome {
    Filter(TaskFilter),
    /// The mention username resolved to no user; the result set is empty
    /// by construction and the store must not be queried
    NoMatch,
}

/// Translate list parameters into a store filter, resolving the mention
/// username through the user directory.
pub fn build_filter(owner: &str, params: &ListParams, store: &Store) -> FilterOutcome {
    let mut filter = TaskFilter::for_owner(owner);

    if let Some(mention) = non_empty(params.mention.as_deref()) {
        match store.find_user_by_username(mention) {
            Some(user) => filter.mention = Some(user.id),
            None => return FilterOutcome::NoMatch,
        }
    }

    filter.priority = non_empty(params.priority.as_deref()).map(str::to_string);
    filter.completed = completed_constraint(params.completed.as_deref());
    filter.tag = non_empty(params.tag.as_deref()).map(str::to_string);
    filter.search = non_empty(params.search.as_deref()).map(str::to_string);

    FilterOutcome::Filter(filter)
}

/// An empty-valued parameter (`?priority=`) counts as absent. `completed`
/// is the exception: any supplied value, empty included, constrains.
fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

/// The literal `"true"` asks for completed tasks; any other supplied
/// value asks for not-completed; absent leaves the field unconstrained.
fn completed_constraint(raw: Option<&str>) -> Option<bool> {
    raw.map(|value| value == "true")
}

/// Sort keys recognized by the list endpoint.
/// Anything else falls back to creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Title,
    Priority,
    Completed,
}

impl SortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(SortKey::CreatedAt),
            "updatedAt" => Some(SortKey::UpdatedAt),
            "title" => Some(SortKey::Title),
            "priority" => Some(SortKey::Priority),
            "completed" => Some(SortKey::Completed),
            _ => None,
        }
    }
}

/// Single-field sort specification. No tie-break key is applied, so ties
/// keep store-native (insertion) order.
#[derive(Debug, Clone, Copy)]
pub struct SortSpec {
    pub key: SortKey,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            ascending: false,
        }
    }
}

impl SortSpec {
    /// `sortOrder=asc` sorts ascending; anything else (including absent)
    /// sorts descending.
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            key: params
                .sort_by
                .as_deref()
                .and_then(SortKey::parse)
                .unwrap_or(SortKey::CreatedAt),
            ascending: params.sort_order.as_deref() == Some("asc"),
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::Completed => a.completed.cmp(&b.completed),
        };
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{CreateTask, Priority};

    fn task(owner: &str) -> Task {
        let command = CreateTask {
            title: "Ship the release".to_string(),
            description: Some("Cut a tag and publish".to_string()),
            priority: Some("high".to_string()),
            tags: Some(vec!["release".to_string(), "urgent".to_string()]),
            ..Default::default()
        };
        Task::create(owner, &command, vec!["mentioned-user".to_string()])
    }

    #[test]
    fn owner_is_always_enforced() {
        let filter = TaskFilter::for_owner("alice");
        assert!(filter.matches(&task("alice")));
        assert!(!filter.matches(&task("bob")));
    }

    #[test]
    fn absent_fields_impose_no_constraint() {
        let open = TaskFilter::for_owner("alice");
        let mut constrained = TaskFilter::for_owner("alice");
        constrained.priority = Some("high".to_string());
        constrained.tag = Some("release".to_string());
        constrained.mention = Some("mentioned-user".to_string());
        constrained.search = Some("RELEASE".to_string());

        let t = task("alice");
        assert!(open.matches(&t));
        assert!(constrained.matches(&t));
    }

    #[test]
    fn conjunction_fails_on_any_mismatch() {
        let mut filter = TaskFilter::for_owner("alice");
        filter.priority = Some("high".to_string());
        filter.tag = Some("missing-tag".to_string());
        assert!(!filter.matches(&task("alice")));
    }

    #[test]
    fn completed_absent_differs_from_completed_false() {
        let mut t = task("alice");
        t.completed = true;

        let open = TaskFilter::for_owner("alice");
        assert!(open.matches(&t));

        let mut explicit = TaskFilter::for_owner("alice");
        explicit.completed = Some(false);
        assert!(!explicit.matches(&t));
    }

    #[test]
    fn unknown_priority_value_matches_nothing() {
        let mut filter = TaskFilter::for_owner("alice");
        filter.priority = Some("urgent".to_string());
        assert!(!filter.matches(&task("alice")));
    }

    #[test]
    fn search_spans_title_and_description() {
        let mut filter = TaskFilter::for_owner("alice");
        filter.search = Some("publish".to_string());
        assert!(filter.matches(&task("alice")));

        filter.search = Some("nowhere".to_string());
        assert!(!filter.matches(&task("alice")));
    }

    #[test]
    fn empty_valued_params_impose_no_constraint() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("high")), Some("high"));
    }

    #[test]
    fn completed_param_parses_true_literal_only() {
        assert_eq!(completed_constraint(None), None);
        assert_eq!(completed_constraint(Some("true")), Some(true));
        assert_eq!(completed_constraint(Some("false")), Some(false));
        assert_eq!(completed_constraint(Some("yes")), Some(false));
    }

    #[test]
    fn sort_defaults_to_created_at_descending() {
        let spec = SortSpec::from_params(&ListParams::default());
        assert_eq!(spec.key, SortKey::CreatedAt);
        assert!(!spec.ascending);
    }

    #[test]
    fn unrecognized_sort_field_falls_back() {
        let params = ListParams {
            sort_by: Some("popularity".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let spec = SortSpec::from_params(&params);
        assert_eq!(spec.key, SortKey::CreatedAt);
        assert!(spec.ascending);
    }

    #[test]
    fn priority_sorts_by_rank() {
        let mut low = task("alice");
        low.priority = Priority::Low;
        let mut high = task("alice");
        high.priority = Priority::High;

        let spec = SortSpec {
            key: SortKey::Priority,
            ascending: true,
        };
        assert_eq!(spec.compare(&low, &high), Ordering::Less);
    }
}
