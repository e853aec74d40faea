//! Per-record seeding outcomes shared by concrete plugins.

use std::collections::BTreeMap;

use serde_json::json;

/// Result of seeding one default record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The record was inserted.
    Created,
    /// A live record with the same natural key already exists.
    Skipped,
    /// The insert failed; seeding continued with the next record.
    Failed(String),
}

/// Outcome counts for one seeded category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedTally {
    pub created: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl SeedTally {
    pub fn record(&mut self, outcome: &SeedOutcome) {
        match outcome {
            SeedOutcome::Created => self.created += 1,
            SeedOutcome::Skipped => self.skipped += 1,
            SeedOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Writes `<category>_created`, `<category>_skipped` and
    /// `<category>_failed` into `metadata`.
    pub fn write_metadata(
        &self,
        category: &str,
        metadata: &mut BTreeMap<String, serde_json::Value>,
    ) {
        metadata.insert(format!("{category}_created"), json!(self.created));
        metadata.insert(format!("{category}_skipped"), json!(self.skipped));
        metadata.insert(format!("{category}_failed"), json!(self.failed));
    }
}

impl<'a> FromIterator<&'a SeedOutcome> for SeedTally {
    fn from_iter<I: IntoIterator<Item = &'a SeedOutcome>>(iter: I) -> Self {
        let mut tally = Self::default();
        for outcome in iter {
            tally.record(outcome);
        }
        tally
    }
}
