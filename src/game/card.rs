//! Deterministic card layout generation
//!
//! Every card in the catalog is derived from its numeric identifier alone,
//! so the server and any client render identical cards without ever
//! transmitting cell contents. The generator below is a wire-format
//! contract: the recurrence, constants, and shuffle order must not change.

/// Free-cell marker, distinct from every drawable number (1..=75).
pub const FREE_CELL: u8 = 0;

/// Linear index of the free cell (row 2 of the N column, column-major).
pub const FREE_INDEX: usize = 12;

/// Size of the fixed card catalog. Identifiers outside 1..=TOTAL_CARDS
/// resolve to the fallback layout.
pub const TOTAL_CARDS: u32 = 500;

/// Inclusive number ranges for the B, I, N, G, O columns.
const COLUMN_RANGES: [(u8, u8); 5] = [(1, 15), (16, 30), (31, 45), (46, 60), (61, 75)];

/// Seeded linear-congruential generator shared with the client-side
/// card renderer. Outputs are normalized to [0, 1) via IEEE-754 double
/// division, matching the reference implementation bit for bit.
struct Lcg {
    seed: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn next(&mut self) -> f64 {
        self.seed = (self.seed * 9301 + 49297) % 233280;
        self.seed as f64 / 233280.0
    }
}

/// Compute the 25 cell values for a card identifier.
///
/// Cells are stored column-major (`index = column*5 + row`). Each column
/// draws its 5 numbers from that column's 15 candidates: a Fisher-Yates
/// shuffle seeded with `card_id*100 + column` (one generator draw per
/// swap), then the first 5 sorted ascending. Index 12 is always
/// [`FREE_CELL`].
///
/// Identifiers outside 1..=[`TOTAL_CARDS`] return the fixed fallback
/// layout `1..=25` instead of failing, so callers never branch on
/// validity.
pub fn card_layout(card_id: u32) -> [u8; 25] {
    if card_id < 1 || card_id > TOTAL_CARDS {
        return fallback_layout();
    }

    let mut cells = [0u8; 25];
    for (col, &(lo, hi)) in COLUMN_RANGES.iter().enumerate() {
        let mut rng = Lcg::new(card_id as u64 * 100 + col as u64);
        let mut avail: Vec<u8> = (lo..=hi).collect();
        for i in (1..avail.len()).rev() {
            let j = (rng.next() * (i + 1) as f64) as usize;
            avail.swap(i, j);
        }
        let column = &mut avail[..5];
        column.sort_unstable();
        cells[col * 5..col * 5 + 5].copy_from_slice(column);
    }
    cells[FREE_INDEX] = FREE_CELL;
    cells
}

/// Fallback layout for out-of-range identifiers.
fn fallback_layout() -> [u8; 25] {
    let mut cells = [0u8; 25];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = i as u8 + 1;
    }
    cells
}

/// Map a row-major display position to its column-major cell index.
///
/// Renderers iterate cards row by row; storage is column by column.
pub fn display_index(display: usize) -> usize {
    let row = display / 5;
    let col = display % 5;
    col * 5 + row
}
