//! Count → color bucket mapping.

use std::fmt::{Display, Formatter};

/// Five-step intensity scale used to color grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContributionLevel {
    /// No contributions.
    Empty,
    /// 1–2 contributions.
    Low,
    /// 3–4 contributions.
    Medium,
    /// 5–6 contributions.
    High,
    /// 7 or more contributions.
    Max,
}

const ALL_LEVELS: [ContributionLevel; 5] = [
    ContributionLevel::Empty,
    ContributionLevel::Low,
    ContributionLevel::Medium,
    ContributionLevel::High,
    ContributionLevel::Max,
];

impl ContributionLevel {
    /// Maps a day's count to its bucket.
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Self::Empty,
            1..=2 => Self::Low,
            3..=4 => Self::Medium,
            5..=6 => Self::High,
            _ => Self::Max,
        }
    }

    /// Every level, lowest first. Used for legends.
    pub fn all() -> &'static [ContributionLevel] {
        &ALL_LEVELS
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Max => "max",
        }
    }

    /// Hex fill color on the GitHub green scale.
    pub fn hex_color(self) -> &'static str {
        match self {
            Self::Empty => "#ebedf0",
            Self::Low => "#9be9a8",
            Self::Medium => "#40c463",
            Self::High => "#30a14e",
            Self::Max => "#216e39",
        }
    }

    /// ANSI 256-color index approximating [`Self::hex_color`].
    pub fn ansi_index(self) -> u8 {
        match self {
            Self::Empty => 236,
            Self::Low => 22,
            Self::Medium => 28,
            Self::High => 34,
            Self::Max => 40,
        }
    }

    /// Single-character glyph for plain terminals.
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '·',
            Self::Low => '░',
            Self::Medium => '▒',
            Self::High => '▓',
            Self::Max => '█',
        }
    }
}

impl Display for ContributionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ContributionLevel;

    #[test]
    fn bucket_boundaries() {
        let cases = [
            (0, ContributionLevel::Empty),
            (1, ContributionLevel::Low),
            (2, ContributionLevel::Low),
            (3, ContributionLevel::Medium),
            (4, ContributionLevel::Medium),
            (5, ContributionLevel::High),
            (6, ContributionLevel::High),
            (7, ContributionLevel::Max),
            (10, ContributionLevel::Max),
            (u32::MAX, ContributionLevel::Max),
        ];
        for (count, expected) in cases {
            assert_eq!(ContributionLevel::from_count(count), expected, "count={count}");
        }
    }

    #[test]
    fn levels_are_ordered_by_intensity() {
        let levels = ContributionLevel::all();
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
