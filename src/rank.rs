//! Player ranks by score

use serde::Serialize;

/// One tier of the rank ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub name: &'static str,
    /// Lowest score in this tier
    pub min: u64,
    /// Highest score in this tier, `None` for the top tier
    pub max: Option<u64>,
    /// CSS hex color
    pub color: &'static str,
    pub icon: &'static str,
}

/// Ladder in ascending order; tiers are contiguous
pub const RANKS: [Rank; 7] = [
    Rank {
        name: "Rookie",
        min: 0,
        max: Some(49),
        color: "#888888",
        icon: "🔰",
    },
    Rank {
        name: "Beginner",
        min: 50,
        max: Some(99),
        color: "#4CAF50",
        icon: "🌱",
    },
    Rank {
        name: "Amateur",
        min: 100,
        max: Some(199),
        color: "#2196F3",
        icon: "⭐",
    },
    Rank {
        name: "Pro",
        min: 200,
        max: Some(399),
        color: "#FF9800",
        icon: "🏆",
    },
    Rank {
        name: "Expert",
        min: 400,
        max: Some(699),
        color: "#F44336",
        icon: "🔥",
    },
    Rank {
        name: "Master",
        min: 700,
        max: Some(999),
        color: "#9C27B0",
        icon: "👑",
    },
    Rank {
        name: "Legend",
        min: 1000,
        max: None,
        color: "#FFD700",
        icon: "✨",
    },
];

fn tier_index(score: u64) -> usize {
    RANKS.iter().rposition(|r| score >= r.min).unwrap_or(0)
}

pub fn rank_for(score: u64) -> &'static Rank {
    &RANKS[tier_index(score)]
}

/// Tier after the one `score` sits in, if any
pub fn next_rank(score: u64) -> Option<&'static Rank> {
    RANKS.get(tier_index(score) + 1)
}

/// Percent of the way from the current tier to the next, in [0, 100]
pub fn rank_progress(score: u64) -> f32 {
    let current = rank_for(score);
    let Some(next) = next_rank(score) else {
        return 100.0;
    };
    let span = (next.min - current.min) as f32;
    ((score - current.min) as f32 / span * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(rank_for(0).name, "Rookie");
        assert_eq!(rank_for(49).name, "Rookie");
        assert_eq!(rank_for(50).name, "Beginner");
        assert_eq!(rank_for(399).name, "Pro");
        assert_eq!(rank_for(400).name, "Expert");
        assert_eq!(rank_for(999).name, "Master");
        assert_eq!(rank_for(1000).name, "Legend");
        assert_eq!(rank_for(u64::MAX).name, "Legend");
    }

    #[test]
    fn test_tiers_are_contiguous() {
        for pair in RANKS.windows(2) {
            assert_eq!(pair[0].max, Some(pair[1].min - 1));
        }
    }

    #[test]
    fn test_progress() {
        assert_eq!(rank_progress(0), 0.0);
        assert_eq!(rank_progress(25), 50.0);
        assert_eq!(rank_progress(150), 50.0);
        assert_eq!(rank_progress(1000), 100.0);
        assert_eq!(rank_progress(5000), 100.0);
        assert_eq!(next_rank(1200), None);
        assert_eq!(next_rank(10).map(|r| r.name), Some("Beginner"));
    }
}
