//! Win detection
//!
//! Tests a card against the fixed catalog of winning patterns. Only
//! satisfaction matters to the round engine; which pattern completed is
//! never reported.

use crate::game::card::{card_layout, FREE_INDEX};
use std::collections::HashSet;

/// The 13 winning patterns, as index sets over the 25 column-major cells:
/// the five columns, the five rows, both diagonals, and the four corners.
pub const WIN_PATTERNS: [&[usize]; 13] = [
    &[0, 1, 2, 3, 4],
    &[5, 6, 7, 8, 9],
    &[10, 11, 12, 13, 14],
    &[15, 16, 17, 18, 19],
    &[20, 21, 22, 23, 24],
    &[0, 5, 10, 15, 20],
    &[1, 6, 11, 16, 21],
    &[2, 7, 12, 17, 22],
    &[3, 8, 13, 18, 23],
    &[4, 9, 14, 19, 24],
    &[0, 6, 12, 18, 24],
    &[4, 8, 12, 16, 20],
    &[0, 4, 20, 24],
];

/// Whether the card identified by `card_id` has at least one completed
/// pattern given the set of drawn numbers. The free cell counts as
/// covered in every pattern that contains it.
pub fn has_bingo(card_id: u32, drawn: &HashSet<u8>) -> bool {
    let cells = card_layout(card_id);
    WIN_PATTERNS
        .iter()
        .any(|pattern| {
            pattern
                .iter()
                .all(|&idx| idx == FREE_INDEX || drawn.contains(&cells[idx]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn(numbers: &[u8]) -> HashSet<u8> {
        numbers.iter().copied().collect()
    }

    #[test]
    fn no_win_before_any_draw() {
        for id in [1, 7, 250, 500] {
            assert!(!has_bingo(id, &HashSet::new()));
        }
    }

    #[test]
    fn full_column_wins() {
        let cells = card_layout(7);
        let column: Vec<u8> = cells[0..5].to_vec();
        assert!(has_bingo(7, &drawn(&column)));
    }

    #[test]
    fn row_across_columns_wins() {
        let cells = card_layout(42);
        let row: Vec<u8> = [0, 5, 10, 15, 20].iter().map(|&i| cells[i]).collect();
        assert!(has_bingo(42, &drawn(&row)));
    }

    #[test]
    fn diagonal_through_free_cell_needs_four_numbers() {
        let cells = card_layout(7);
        let diagonal: Vec<u8> = [0, 6, 18, 24].iter().map(|&i| cells[i]).collect();
        assert_eq!(diagonal.len(), 4);
        assert!(has_bingo(7, &drawn(&diagonal)));
    }

    #[test]
    fn corners_win_without_center() {
        let cells = card_layout(7);
        let corners: Vec<u8> = [0, 4, 20, 24].iter().map(|&i| cells[i]).collect();
        assert!(has_bingo(7, &drawn(&corners)));
    }

    #[test]
    fn partial_pattern_does_not_win() {
        let cells = card_layout(7);
        // Four cells of the first column, missing the fifth.
        let partial: Vec<u8> = cells[0..4].to_vec();
        assert!(!has_bingo(7, &drawn(&partial)));
    }

    #[test]
    fn unrelated_numbers_do_not_win() {
        let cells = card_layout(250);
        let on_card: HashSet<u8> = cells.iter().copied().collect();
        let unrelated: Vec<u8> = (1..=75).filter(|n| !on_card.contains(n)).take(20).collect();
        assert!(!has_bingo(250, &drawn(&unrelated)));
    }
}
