//! Spell slot progressions. Row `n` is the table entry for level `n`; row 0 is empty.
//! Columns are slot levels 1st through 9th.

pub type SlotRow = [u8; 9];

const fn row(slots: &[u8]) -> SlotRow {
    let mut out = [0; 9];
    let mut i = 0;
    while i < slots.len() {
        out[i] = slots[i];
        i += 1;
    }
    out
}

/// Multiclass caster table, also the single-class table for full casters.
pub static FULL_CASTER: [SlotRow; 21] = [
    row(&[]),
    row(&[2]),
    row(&[3]),
    row(&[4, 2]),
    row(&[4, 3]),
    row(&[4, 3, 2]),
    row(&[4, 3, 3]),
    row(&[4, 3, 3, 1]),
    row(&[4, 3, 3, 2]),
    row(&[4, 3, 3, 3, 1]),
    row(&[4, 3, 3, 3, 2]),
    row(&[4, 3, 3, 3, 2, 1]),
    row(&[4, 3, 3, 3, 2, 1]),
    row(&[4, 3, 3, 3, 2, 1, 1]),
    row(&[4, 3, 3, 3, 2, 1, 1]),
    row(&[4, 3, 3, 3, 2, 1, 1, 1]),
    row(&[4, 3, 3, 3, 2, 1, 1, 1]),
    row(&[4, 3, 3, 3, 2, 1, 1, 1, 1]),
    row(&[4, 3, 3, 3, 3, 1, 1, 1, 1]),
    row(&[4, 3, 3, 3, 3, 2, 1, 1, 1]),
    row(&[4, 3, 3, 3, 3, 2, 2, 1, 1]),
];

pub static HALF_CASTER: [SlotRow; 21] = [
    row(&[]),
    row(&[]),
    row(&[2]),
    row(&[3]),
    row(&[3]),
    row(&[4, 2]),
    row(&[4, 2]),
    row(&[4, 3]),
    row(&[4, 3]),
    row(&[4, 3, 2]),
    row(&[4, 3, 2]),
    row(&[4, 3, 3]),
    row(&[4, 3, 3]),
    row(&[4, 3, 3, 1]),
    row(&[4, 3, 3, 1]),
    row(&[4, 3, 3, 2]),
    row(&[4, 3, 3, 2]),
    row(&[4, 3, 3, 3, 1]),
    row(&[4, 3, 3, 3, 1]),
    row(&[4, 3, 3, 3, 2]),
    row(&[4, 3, 3, 3, 2]),
];

pub static THIRD_CASTER: [SlotRow; 21] = [
    row(&[]),
    row(&[]),
    row(&[]),
    row(&[2]),
    row(&[3]),
    row(&[3]),
    row(&[3]),
    row(&[4, 2]),
    row(&[4, 2]),
    row(&[4, 2]),
    row(&[4, 3]),
    row(&[4, 3]),
    row(&[4, 3]),
    row(&[4, 3, 2]),
    row(&[4, 3, 2]),
    row(&[4, 3, 2]),
    row(&[4, 3, 3]),
    row(&[4, 3, 3]),
    row(&[4, 3, 3]),
    row(&[4, 3, 3, 1]),
    row(&[4, 3, 3, 1]),
];

/// Pact magic as `(slot count, slot level)` by warlock level.
pub static PACT_MAGIC: [(u8, u8); 21] = [
    (0, 0),
    (1, 1),
    (2, 1),
    (2, 2),
    (2, 2),
    (2, 3),
    (2, 3),
    (2, 4),
    (2, 4),
    (2, 5),
    (2, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (4, 5),
    (4, 5),
    (4, 5),
    (4, 5),
];

/// Feats/ASIs arrive at the same levels in every supported variant.
pub const ASI_LEVELS: &[u32] = &[4, 8, 12, 16, 19];

pub const STANDARD_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// Point-buy cost for scores 8 through 15.
pub const POINT_BUY_COSTS: [i32; 8] = [0, 1, 2, 3, 4, 5, 7, 9];
pub const POINT_BUY_BUDGET: i32 = 27;
