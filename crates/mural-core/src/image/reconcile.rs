use std::collections::BTreeSet;

use super::record::ImageRecord;
use super::selections::ActiveSelections;
use super::strips::ThumbnailStripsSnapshot;
use super::table::RecordTable;
use crate::ids::ImageId;

/// A backing file whose record was evicted; the caller deletes it as a
/// fire-and-forget task against the folder store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub image_id: ImageId,
    pub backing_file_name: String,
}

#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub table: RecordTable,
    pub strips: ThumbnailStripsSnapshot,
    pub selections: ActiveSelections,
    pub deletions: Vec<PendingDeletion>,
}

/// One referential-integrity sweep over the whole store.
///
/// Restores both directions of the integrity invariant:
/// every id in any strip or selection resolves to a table record, and
/// every non-environment record is referenced by at least one strip or
/// selection. Unrecoverable records (no payload, no backing file) are
/// evicted regardless of references.
///
/// Pure: no I/O. Runs after every mutation batch, not per mutation.
/// O(table size + total strip length).
pub fn reconcile(
    table: RecordTable,
    strips: ThumbnailStripsSnapshot,
    selections: ActiveSelections,
) -> ReconcileOutcome {
    // Ids the table can actually resolve; mutations are id-blind, so
    // strips and selections may carry strays.
    let known: BTreeSet<ImageId> = table
        .iter()
        .filter(|r| r.is_recoverable())
        .map(|r| r.id.clone())
        .collect();

    let strips = strips.retaining_ids(|id| known.contains(id));
    let selections = selections.retaining_ids(|id| known.contains(id));

    let mut referenced = strips.referenced_ids();
    referenced.extend(selections.referenced_ids());

    let mut kept = Vec::new();
    let mut deletions = Vec::new();
    for record in table.into_records() {
        let orphaned = !referenced.contains(&record.id) && !record.origin.is_environment();
        if record.is_recoverable() && !orphaned {
            kept.push(record);
            continue;
        }
        if let Some(file_name) = record.backing_file_name {
            deletions.push(PendingDeletion {
                image_id: record.id,
                backing_file_name: file_name,
            });
        }
    }

    ReconcileOutcome {
        table: RecordTable::from_records(kept),
        strips,
        selections,
        deletions,
    }
}
