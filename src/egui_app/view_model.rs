//! Pure projections from the roster to panel rows.

use crate::speakers::{SpeakerId, SpeakerRoster};

/// Number of placeholder rows offered while nothing is stored yet.
pub const DEFAULT_ROW_COUNT: u32 = 4;

/// A panel row: identifier plus the name it currently maps to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeakerRowView {
    /// Identifier the row edits.
    pub id: SpeakerId,
    /// Stored name, or empty for a placeholder row.
    pub name: String,
}

/// Rows shown in the panel: the stored entries in ascending identifier
/// order, or placeholder rows `1..=DEFAULT_ROW_COUNT` with empty names when
/// the cache is empty. Placeholders exist only in the view; they are never
/// written into the cache.
pub fn panel_rows(roster: &SpeakerRoster) -> Vec<SpeakerRowView> {
    if roster.is_empty() {
        return (1..=DEFAULT_ROW_COUNT)
            .filter_map(SpeakerId::new)
            .map(|id| SpeakerRowView {
                id,
                name: String::new(),
            })
            .collect();
    }
    roster
        .iter()
        .map(|(id, name)| SpeakerRowView {
            id,
            name: name.to_string(),
        })
        .collect()
}

/// Identifier for a freshly added row: one past the highest displayed
/// identifier, or the first identifier when nothing is displayed.
pub fn next_row_id(displayed: &[SpeakerId]) -> SpeakerId {
    let next = displayed
        .iter()
        .map(|id| id.get())
        .max()
        .map_or(1, |max| max.saturating_add(1));
    SpeakerId::new(next).unwrap_or(SpeakerId::FIRST)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> SpeakerId {
        SpeakerId::new(raw).expect("positive id")
    }

    #[test]
    fn empty_roster_yields_four_placeholder_rows() {
        let roster = SpeakerRoster::new();
        let rows = panel_rows(&roster);
        let ids: Vec<u32> = rows.iter().map(|row| row.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(rows.iter().all(|row| row.name.is_empty()));
        assert!(roster.is_empty(), "placeholders must not enter the cache");
    }

    #[test]
    fn stored_entries_render_in_ascending_order() {
        let mut roster = SpeakerRoster::new();
        roster.set_name(id(7), "Gus");
        roster.set_name(id(2), "Bea");
        let rows = panel_rows(&roster);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, id(2));
        assert_eq!(rows[0].name, "Bea");
        assert_eq!(rows[1].id, id(7));
        assert_eq!(rows[1].name, "Gus");
    }

    #[test]
    fn next_row_id_is_one_past_the_maximum() {
        let displayed = [id(1), id(3), id(5)];
        assert_eq!(next_row_id(&displayed), id(6));
        assert_eq!(next_row_id(&[]), id(1));
    }
}
