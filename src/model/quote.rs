use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::machine::MachineSnapshot;

/// Contact fields of an accepted quote request, trimmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSubmission {
    pub name: String,
    pub email: String,
    /// Digits only, 10 or 11 of them
    pub phone: String,
    pub company: Option<String>,
    pub message: Option<String>,
}

/// Accepted submission plus the catalog snapshot of the requested machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteFormData {
    #[serde(flatten)]
    pub submission: QuoteSubmission,
    pub machine: MachineSnapshot,
}

/// Per-request identity, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionMeta {
    pub request_id: Uuid,
    pub received_at: DateTime<Local>,
}

impl SubmissionMeta {
    pub fn new() -> Self {
        SubmissionMeta {
            request_id: Uuid::new_v4(),
            received_at: Local::now(),
        }
    }
}

impl Default for SubmissionMeta {
    fn default() -> Self {
        Self::new()
    }
}
