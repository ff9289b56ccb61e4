//! Seed a data directory with demo users and tasks.
//!
//! Clears any existing documents first, so re-running converges on the
//! same dataset (with fresh ids).

use crate::error::Result;
use crate::store::Store;
use crate::task::{CreateTask, Task};
use crate::user::User;

const SEED_USERS: [(&str, &str); 5] = [
    ("krishna", "krish@example.com"),
    ("kshitij", "kshitij@example.com"),
    ("gautam", "gautam@example.com"),
    ("keshav", "keshav@example.com"),
    ("mayank", "mayank@example.com"),
];

const SEED_TASKS: [(&str, &str, &str, usize); 8] = [
    (
        "Complete project documentation",
        "Write comprehensive documentation for the new project",
        "high",
        0,
    ),
    (
        "Review code changes",
        "Review pull requests from team members",
        "medium",
        0,
    ),
    (
        "Plan team meeting",
        "Schedule and prepare agenda for weekly team meeting",
        "low",
        0,
    ),
    (
        "Update client presentation",
        "Revise slides for upcoming client presentation",
        "high",
        1,
    ),
    (
        "Database optimization",
        "Optimize database queries for better performance",
        "medium",
        1,
    ),
    (
        "Setup development environment",
        "Configure local development environment for new team member",
        "medium",
        2,
    ),
    (
        "Write unit tests",
        "Create comprehensive unit tests for user authentication",
        "high",
        2,
    ),
    (
        "Research new technologies",
        "Investigate new frameworks and tools for next project",
        "low",
        2,
    ),
];

pub fn run(store: &Store) -> Result<()> {
    store.clear_all()?;
    tracing::info!("existing data cleared");

    let mut users = Vec::with_capacity(SEED_USERS.len());
    for (username, email) in SEED_USERS {
        users.push(store.insert_user(User::new(username, username, email))?);
    }
    tracing::info!(count = users.len(), "users created");

    for (title, description, priority, owner_index) in SEED_TASKS {
        let command = CreateTask {
            title: title.to_string(),
            description: Some(description.to_string()),
            priority: Some(priority.to_string()),
            ..Default::default()
        };
        store.insert_task(Task::create(&users[owner_index].id, &command, vec![]))?;
    }
    tracing::info!(count = SEED_TASKS.len(), "tasks created");

    for user in &users {
        tracing::info!(id = %user.id, username = %user.username, email = %user.email, "seeded user");
    }

    Ok(())
}
