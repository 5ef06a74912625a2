//! Administrative MongoDB connection
//!
//! Wraps the driver client with connect-time timeouts and a ping check
//! so an unreachable server fails the run in seconds instead of hanging
//! at the first provisioning call.

use bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database};
use tracing::info;

use crate::types::{classify, BootstrapError, Result};

/// Trait for document schemas that declare their own indexes
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Administrative MongoDB connection, pinned to one target database
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and verify the connection with a ping
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        let client = Client::with_uri_str(&with_client_timeouts(uri))
            .await
            .map_err(|e| BootstrapError::Config(format!("Invalid MongoDB URI: {}", e)))?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(classify)?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Handle to the target database
    pub fn database(&self) -> Database {
        self.client.database(&self.db_name)
    }
}

// Use serverSelectionTimeoutMS to avoid hanging on unreachable MongoDB
fn with_client_timeouts(uri: &str) -> String {
    if uri.contains('?') {
        format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
    } else {
        format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
    }
}
