//! Row-scoped rollback for optimistic writes.
//!
//! An optimistic transform touches exactly one row; its pre-image is
//! captured in the same store commit that applies the transform. On failure
//! only that row is restored, so a concurrent optimistic write to a
//! different entity survives a sibling's rollback.

use fuelmap_owner_api::Broadcast;
use fuelmap_owner_api::ClaimedStation;
use fuelmap_owner_api::DashboardSnapshot;

/// The single entity an optimistic transform is declared to touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationScope {
    /// A row of `stations`, by station id.
    Station(String),
    /// A row of `broadcasts`, by broadcast id.
    Broadcast(String),
}

/// Saved state of the scoped row, sufficient to undo any single-row edit:
/// a content change restores the content, a removal reinserts the row at
/// its original position (clamped to the current length).
#[derive(Debug, Clone)]
pub(crate) enum RowPreImage {
    Station {
        id: String,
        captured: Option<(usize, ClaimedStation)>,
    },
    Broadcast {
        id: String,
        captured: Option<(usize, Broadcast)>,
    },
}

impl RowPreImage {
    pub(crate) fn capture(snapshot: &DashboardSnapshot, scope: &MutationScope) -> Self {
        match scope {
            MutationScope::Station(id) => RowPreImage::Station {
                id: id.clone(),
                captured: indexed_row(&snapshot.stations, id, |s| &s.id),
            },
            MutationScope::Broadcast(id) => RowPreImage::Broadcast {
                id: id.clone(),
                captured: indexed_row(&snapshot.broadcasts, id, |b| &b.id),
            },
        }
    }

    pub(crate) fn restore(self, snapshot: &mut DashboardSnapshot) {
        match self {
            RowPreImage::Station { id, captured } => {
                restore_row(&mut snapshot.stations, &id, captured, |s| &s.id);
            }
            RowPreImage::Broadcast { id, captured } => {
                restore_row(&mut snapshot.broadcasts, &id, captured, |b| &b.id);
            }
        }
    }
}

fn indexed_row<T: Clone>(rows: &[T], id: &str, id_of: impl Fn(&T) -> &str) -> Option<(usize, T)> {
    rows.iter()
        .position(|row| id_of(row) == id)
        .map(|index| (index, rows[index].clone()))
}

fn restore_row<T>(
    rows: &mut Vec<T>,
    id: &str,
    captured: Option<(usize, T)>,
    id_of: impl Fn(&T) -> &str,
) {
    match captured {
        Some((index, row)) => match rows.iter().position(|r| id_of(r) == id) {
            Some(current) => rows[current] = row,
            None => rows.insert(index.min(rows.len()), row),
        },
        // The row did not exist at capture; drop whatever now claims its id.
        None => rows.retain(|row| id_of(row) != id),
    }
}
