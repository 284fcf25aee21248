//! Game of Life rules implementation (B3/S23)

use super::Status;

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Neighbor counts that turn a dead cell alive
    pub const BIRTH: &'static [u8] = &[3];

    /// Neighbor counts that keep a live cell alive
    pub const SURVIVAL: &'static [u8] = &[2, 3];

    /// Status a cell takes in the next generation given its current status and
    /// the number of live neighbors it had in the current generation
    pub fn next_status(current: Status, alive_neighbors: u8) -> Status {
        let counts = match current {
            Status::Alive => Self::SURVIVAL,
            Status::Dead => Self::BIRTH,
        };
        if counts.contains(&alive_neighbors) {
            Status::Alive
        } else {
            Status::Dead
        }
    }

    /// Maximum number of neighbors a cell can have in a Moore neighborhood
    pub fn max_neighbor_count() -> u8 {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survival() {
        assert_eq!(LifeRules::next_status(Status::Alive, 2), Status::Alive);
        assert_eq!(LifeRules::next_status(Status::Alive, 3), Status::Alive);
        for count in [0, 1, 4, 5, 6, 7, 8] {
            assert_eq!(
                LifeRules::next_status(Status::Alive, count),
                Status::Dead,
                "count {}",
                count
            );
        }
    }

    #[test]
    fn test_birth() {
        assert_eq!(LifeRules::next_status(Status::Dead, 3), Status::Alive);
        for count in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert_eq!(
                LifeRules::next_status(Status::Dead, count),
                Status::Dead,
                "count {}",
                count
            );
        }
    }

    #[test]
    fn test_rule_tables() {
        assert_eq!(LifeRules::max_neighbor_count(), 8);
        assert_eq!(LifeRules::BIRTH, &[3]);
        assert_eq!(LifeRules::SURVIVAL, &[2, 3]);
    }
}
