//! Application user provisioning
//!
//! The driver has no typed helper for user administration, so the
//! `createUser` command is issued directly against the target database.
//! That also scopes the account to the database it is granted access to.

use bson::{doc, Document};
use mongodb::Database;
use tracing::{info, warn};

use super::Outcome;
use crate::types::{classify, BootstrapError, Result};

/// A privilege level bound to one database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

/// Credentials and grants for the application user
#[derive(Debug, Clone)]
pub struct UserSpec {
    pub username: String,
    pub password: String,
    pub roles: Vec<RoleGrant>,
}

impl UserSpec {
    /// Build the `createUser` command document
    pub fn command(&self) -> Document {
        let roles: Vec<Document> = self
            .roles
            .iter()
            .map(|grant| doc! { "role": &grant.role, "db": &grant.db })
            .collect();

        doc! {
            "createUser": &self.username,
            "pwd": &self.password,
            "roles": roles,
        }
    }
}

/// Create the application user, or report it as already present.
///
/// The existing account is never modified; in strict mode its presence
/// is an error instead.
pub async fn provision(db: &Database, spec: &UserSpec, strict: bool) -> Result<Outcome> {
    info!(user = %spec.username, db = %db.name(), "Creating application user");

    match db.run_command(spec.command()).await {
        Ok(_) => Ok(Outcome::Created),
        Err(e) => match classify(e) {
            BootstrapError::Duplicate(msg) if !strict => {
                warn!(user = %spec.username, "User already exists, leaving untouched: {}", msg);
                Ok(Outcome::AlreadyExists)
            }
            other => Err(other),
        },
    }
}
