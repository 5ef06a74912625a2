//! Collection provisioning
//!
//! Creates the collection with capped storage explicitly disabled, then
//! applies whatever indexes the document schema declares. Index creation
//! also runs on the already-exists path, since createIndexes is a no-op
//! for indexes that are already in place.

use mongodb::options::CreateCollectionOptions;
use mongodb::{Database, IndexModel};
use tracing::{info, warn};

use super::Outcome;
use crate::db::mongo::IntoIndexes;
use crate::types::{classify, BootstrapError, Result};

/// Create `name` as a plain (non-capped) collection, or report it as
/// already present, then ensure the schema indexes of `T` exist.
pub async fn provision<T>(db: &Database, name: &str, strict: bool) -> Result<Outcome>
where
    T: Send + Sync + IntoIndexes,
{
    info!(collection = %name, db = %db.name(), "Creating collection");

    let options = CreateCollectionOptions::builder().capped(false).build();
    let outcome = match db.create_collection(name).with_options(options).await {
        Ok(()) => Outcome::Created,
        Err(e) => match classify(e) {
            BootstrapError::Duplicate(msg) if !strict => {
                warn!(collection = %name, "Collection already exists, leaving untouched: {}", msg);
                Outcome::AlreadyExists
            }
            other => return Err(other),
        },
    };

    apply_indexes::<T>(db, name).await?;

    Ok(outcome)
}

/// Apply schema-defined indexes
async fn apply_indexes<T>(db: &Database, name: &str) -> Result<()>
where
    T: Send + Sync + IntoIndexes,
{
    let schema_indices = T::into_indices();
    if schema_indices.is_empty() {
        return Ok(());
    }

    let indices: Vec<IndexModel> = schema_indices
        .into_iter()
        .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
        .collect();

    let count = indices.len();
    db.collection::<T>(name)
        .create_indexes(indices)
        .await
        .map_err(classify)?;

    info!(collection = %name, count, "Schema indexes ensured");
    Ok(())
}
