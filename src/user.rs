//! User records consumed by the task API.
//!
//! Users are created and destroyed by an external identity subsystem;
//! this crate only reads them (mention resolution, populate joins) and
//! writes them when seeding.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Ulid::new().to_string().to_ascii_lowercase(),
            username: username.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Display projection embedded in task responses in place of raw user ids
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
