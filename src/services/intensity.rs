//! Commit-count intensity buckets

use serde::Serialize;

/// Heatmap intensity level, ordered from no activity to peak activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum IntensityBucket {
    /// No commits
    None,
    /// 1-3 commits
    Low,
    /// 4-6 commits
    Medium,
    /// 7-9 commits
    High,
    /// 10+ commits
    Max,
}

impl IntensityBucket {
    /// All buckets in ascending order (legend order)
    pub const ALL: [IntensityBucket; 5] = [
        Self::None,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Max,
    ];

    /// Map a commit count to its bucket. Non-positive counts are `None`.
    pub fn classify(count: i64) -> Self {
        match count {
            i64::MIN..=0 => Self::None,
            1..=3 => Self::Low,
            4..=6 => Self::Medium,
            7..=9 => Self::High,
            _ => Self::Max,
        }
    }

    /// Ordinal level (0-4)
    pub fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Max => 4,
        }
    }

    /// Shade character for plain-text output
    pub fn to_char(self) -> char {
        match self {
            Self::None => '·',
            Self::Low => '░',
            Self::Medium => '▒',
            Self::High => '▓',
            Self::Max => '█',
        }
    }

    /// Legend label for the bucket's count range
    pub fn range_label(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Low => "1-3",
            Self::Medium => "4-6",
            Self::High => "7-9",
            Self::Max => "10+",
        }
    }
}

impl From<IntensityBucket> for u8 {
    fn from(bucket: IntensityBucket) -> Self {
        bucket.level()
    }
}
