use crate::model::student::StudentRecord;

use super::roster::Roster;

/// Returns the first record whose name and email both equal the inputs.
///
/// Comparison is exact: case-sensitive and without trimming.
#[tracing::instrument(skip(roster))]
pub fn find<'a>(roster: &'a Roster, name: &str, email: &str) -> Option<&'a StudentRecord> {
    roster.iter().find(|record| record.matches(name, email))
}
