//! Elo rating math and the rank ladder derived from a rating.

use serde::{Deserialize, Serialize};

/// Starting rating for participants without a record.
pub const DEFAULT_RATING: f64 = 1200.0;

/// Default K-factor; higher values make ratings more volatile.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Elo calculator with a configurable K-factor.
#[derive(Clone, Copy, Debug)]
pub struct EloRater {
    pub k_factor: f64,
}

impl Default for EloRater {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
        }
    }
}

impl EloRater {
    pub fn new(k_factor: f64) -> Self {
        Self { k_factor }
    }

    /// Expected score of the winner against the loser.
    pub fn expected(&self, winner_rating: f64, loser_rating: f64) -> f64 {
        1.0 / (1.0 + 10.0_f64.powf((loser_rating - winner_rating) / 400.0))
    }

    /// New `(winner, loser)` ratings after a decisive result. The winner
    /// gains exactly what the loser drops.
    pub fn rate(&self, winner_rating: f64, loser_rating: f64) -> (f64, f64) {
        let gain = self.k_factor * (1.0 - self.expected(winner_rating, loser_rating));
        (winner_rating + gain, loser_rating - gain)
    }
}

/// Rank ladder, lowest tier first. Tiers sit on 200-point bands starting
/// below the default rating.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Rookie,
    Prodigy,
    Veteran,
    Legend,
    Superstar,
    Elite,
    Mvp,
    WorldClass,
}

impl Rank {
    pub fn for_rating(rating: f64) -> Self {
        if rating < 1200.0 {
            Rank::Rookie
        } else if rating < 1400.0 {
            Rank::Prodigy
        } else if rating < 1600.0 {
            Rank::Veteran
        } else if rating < 1800.0 {
            Rank::Legend
        } else if rating < 2000.0 {
            Rank::Superstar
        } else if rating < 2200.0 {
            Rank::Elite
        } else if rating < 2400.0 {
            Rank::Mvp
        } else {
            Rank::WorldClass
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Rank::Rookie => "Rookie",
            Rank::Prodigy => "Prodigy",
            Rank::Veteran => "Veteran",
            Rank::Legend => "Legend",
            Rank::Superstar => "Superstar",
            Rank::Elite => "Elite",
            Rank::Mvp => "MVP",
            Rank::WorldClass => "World Class",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ratings_split_the_k_factor() {
        let rater = EloRater::default();
        let (winner, loser) = rater.rate(1200.0, 1200.0);
        assert!((winner - 1216.0).abs() < 1e-9);
        assert!((loser - 1184.0).abs() < 1e-9);
    }

    #[test]
    fn upsets_move_more_points_than_expected_wins() {
        let rater = EloRater::default();
        let (underdog_win, _) = rater.rate(1200.0, 1400.0);
        let (favourite_win, _) = rater.rate(1400.0, 1200.0);
        let underdog_gain = underdog_win - 1200.0;
        let favourite_gain = favourite_win - 1400.0;
        assert!(underdog_gain > favourite_gain);
    }

    #[test]
    fn rating_is_conserved() {
        let rater = EloRater::new(24.0);
        let (winner, loser) = rater.rate(1532.0, 1381.0);
        assert!((winner + loser - (1532.0 + 1381.0)).abs() < 1e-9);
    }

    #[test]
    fn rank_ladder_boundaries() {
        assert_eq!(Rank::for_rating(1199.9), Rank::Rookie);
        assert_eq!(Rank::for_rating(1200.0), Rank::Prodigy);
        assert_eq!(Rank::for_rating(1599.9), Rank::Veteran);
        assert_eq!(Rank::for_rating(2200.0), Rank::Mvp);
        assert_eq!(Rank::for_rating(2400.0), Rank::WorldClass);
    }
}
