//! Level brick patterns
//!
//! A level's layout is a pure function of `(level, row, col)`. New levels are
//! added to [`LEVEL_PATTERNS`]; nothing else needs to change.

/// Brick placement rule for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPattern {
    /// Every cell holds a brick
    Full,
    /// Cells where `(row + col) % 2 == parity`
    Checkerboard { parity: usize },
}

impl LevelPattern {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match *self {
            LevelPattern::Full => true,
            LevelPattern::Checkerboard { parity } => (row + col) % 2 == parity,
        }
    }
}

/// Patterns for levels 1, 2, ...
pub const LEVEL_PATTERNS: &[LevelPattern] = &[
    LevelPattern::Full,
    LevelPattern::Checkerboard { parity: 0 },
];

/// Pattern for a 1-based level; levels past the table cycle through it
pub fn pattern_for(level: u32) -> LevelPattern {
    let index = (level.max(1) - 1) as usize % LEVEL_PATTERNS.len();
    LEVEL_PATTERNS[index]
}

/// Whether the cell at `(row, col)` holds a brick when `level` starts
#[inline]
pub fn brick_present(level: u32, row: usize, col: usize) -> bool {
    pattern_for(level).contains(row, col)
}
