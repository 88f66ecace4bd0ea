//! Interpreting per-record mutation results.
//!
//! Create, update and delete submit a batch and get back one result per
//! record. A batch can partly succeed; the failures become notices and the
//! successes are kept.

use crate::error::CatalogError;
use crate::notify::Notice;
use std::fmt;
use storefront_gateway::{MutationResponse, Record, RecordResult};

/// Which mutation produced a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation batch split into successes and failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Records the gateway accepted, in submission order.
    pub succeeded: Vec<Record>,
    /// Results the gateway rejected, in submission order.
    pub failed: Vec<RecordResult>,
}

impl BatchOutcome {
    /// Partition raw results.
    pub fn partition(results: Vec<RecordResult>) -> Self {
        let mut outcome = Self::default();
        for result in results {
            if result.success {
                outcome.succeeded.push(result.data.unwrap_or_default());
            } else {
                outcome.failed.push(result);
            }
        }
        outcome
    }

    /// Interpret a mutation response.
    ///
    /// A response the gateway marked unsuccessful is `Rejected`; one without
    /// a results array is `BatchFailed`.
    pub fn from_response(table: &str, response: MutationResponse) -> Result<Self, CatalogError> {
        if !response.success {
            return Err(CatalogError::Rejected {
                table: table.to_string(),
                message: response.message.unwrap_or_default(),
            });
        }
        response
            .results
            .map(Self::partition)
            .ok_or_else(|| CatalogError::BatchFailed {
                table: table.to_string(),
            })
    }

    /// First accepted record.
    pub fn first_success(&self) -> Option<&Record> {
        self.succeeded.first()
    }

    /// True when exactly one record was accepted.
    pub fn single_success(&self) -> bool {
        self.succeeded.len() == 1
    }

    /// Notices for the rejected records.
    ///
    /// Each field error reads `"<fieldLabel>: <message>"`, followed by the
    /// record-level message if any. Deletes carry no field errors, so only
    /// their record messages are reported.
    pub fn notices(&self, kind: MutationKind) -> Vec<Notice> {
        let mut notices = Vec::new();
        for result in &self.failed {
            if kind != MutationKind::Delete {
                notices.extend(result.errors.iter().map(|e| Notice::warning(e.to_string())));
            }
            if let Some(message) = result.message.as_deref().filter(|m| !m.is_empty()) {
                notices.push(Notice::warning(message));
            }
        }
        notices
    }
}
