//! Development fixture data
//!
//! The starter dataset the Ion backend ships for development
//! environments. Seeding only happens on an empty collection, so
//! re-running the bootstrap never duplicates records.

use chrono::NaiveTime;
use mongodb::Database;
use tracing::info;

use crate::db::schemas::PatientDoc;
use crate::types::{classify, BootstrapError, Result};

/// A fixture patient as authored: name plus ISO date of birth
#[derive(Debug, Clone, Copy)]
pub struct FixturePatient {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub date_of_birth: &'static str,
}

/// Development dataset
pub const FIXTURE_DATA: &[FixturePatient] = &[
    FixturePatient {
        first_name: "Jim",
        last_name: "Jones",
        date_of_birth: "1960-10-01",
    },
    FixturePatient {
        first_name: "Winston",
        last_name: "Rogers",
        date_of_birth: "1970-04-04",
    },
    FixturePatient {
        first_name: "Diane",
        last_name: "Simmons",
        date_of_birth: "1980-08-01",
    },
];

impl FixturePatient {
    /// Materialize as a document with a fresh id and no image fields
    pub fn to_doc(&self) -> Result<PatientDoc> {
        let date = chrono::NaiveDate::parse_from_str(self.date_of_birth, "%Y-%m-%d")
            .map_err(|e| {
                BootstrapError::Config(format!(
                    "Invalid fixture date '{}': {}",
                    self.date_of_birth, e
                ))
            })?;

        // Dates of birth are stored as midnight UTC
        let midnight = date.and_time(NaiveTime::MIN).and_utc();

        Ok(PatientDoc::new(
            self.first_name.to_string(),
            self.last_name.to_string(),
            bson::DateTime::from_chrono(midnight),
        ))
    }
}

/// Insert the fixture dataset unless the collection already holds data.
///
/// Returns the number of inserted documents (0 when seeding was skipped).
pub async fn populate(db: &Database, collection: &str) -> Result<usize> {
    let patients = db.collection::<PatientDoc>(collection);

    let existing = patients
        .estimated_document_count()
        .await
        .map_err(classify)?;
    if existing > 0 {
        info!(
            collection = %collection,
            count = existing,
            "Collection already populated, skipping fixtures"
        );
        return Ok(0);
    }

    let docs = FIXTURE_DATA
        .iter()
        .map(FixturePatient::to_doc)
        .collect::<Result<Vec<_>>>()?;

    let result = patients.insert_many(&docs).await.map_err(classify)?;
    let inserted = result.inserted_ids.len();
    info!(collection = %collection, count = inserted, "Fixture patients inserted");

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_dataset_matches_development_seed() {
        assert_eq!(FIXTURE_DATA.len(), 3);

        let names: Vec<_> = FIXTURE_DATA
            .iter()
            .map(|f| (f.first_name, f.last_name))
            .collect();
        assert!(names.contains(&("Jim", "Jones")));
        assert!(names.contains(&("Winston", "Rogers")));
        assert!(names.contains(&("Diane", "Simmons")));
    }

    #[test]
    fn test_fixture_dates_parse_to_midnight_utc() {
        for fixture in FIXTURE_DATA {
            let doc = fixture.to_doc().unwrap();
            assert_eq!(doc.date_of_birth.to_chrono().time(), NaiveTime::MIN);
        }

        let jim = FIXTURE_DATA[0].to_doc().unwrap();
        let dob = jim.date_of_birth.to_chrono();
        assert_eq!((dob.year(), dob.month(), dob.day()), (1960, 10, 1));
    }

    #[test]
    fn test_fixture_docs_have_unique_ids_and_no_images() {
        let docs: Vec<_> = FIXTURE_DATA.iter().map(|f| f.to_doc().unwrap()).collect();

        let ids: std::collections::HashSet<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), docs.len());
        assert!(docs
            .iter()
            .all(|d| d.img_uri.is_none() && d.img_timestamp.is_none()));
    }
}
