//! Document schemas for the Ion database.

mod patient;

pub use patient::{PatientDoc, PATIENT_COLLECTION};
