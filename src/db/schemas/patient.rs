//! Patient document schema
//!
//! Mirrors the record shape the Ion backend serves: a system-generated
//! UUID id, name fields, and optional medical-image metadata.

use bson::{doc, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::mongo::IntoIndexes;

/// Collection name for patient records
pub const PATIENT_COLLECTION: &str = "patients";

/// Patient document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PatientDoc {
    /// Patient id generated by the system (UUIDv4, stored as the document id)
    #[serde(rename = "_id")]
    pub id: String,

    /// First name of the patient
    pub first_name: String,

    /// Last name of the patient
    pub last_name: String,

    /// Path suffix for the patient's medical image, if one was taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_uri: Option<String>,

    /// The patient's birth date
    pub date_of_birth: DateTime,

    /// When the medical image was taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_timestamp: Option<DateTime>,
}

impl PatientDoc {
    /// Create a new patient record with a generated id and no image
    pub fn new(first_name: String, last_name: String, date_of_birth: DateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name,
            last_name,
            img_uri: None,
            date_of_birth,
            img_timestamp: None,
        }
    }
}

impl IntoIndexes for PatientDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Listing index for the patient roster
            (
                doc! { "last_name": 1, "first_name": 1 },
                Some(
                    IndexOptions::builder()
                        .name("patient_name_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}
