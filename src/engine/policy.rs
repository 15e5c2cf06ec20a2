//! Residual policy: what happens to volume left after matching.
//!
//! Applied exactly once per submission, after the matching loop is done.

use crate::types::TimeInForce;

/// Final state of an incoming order once its submission completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Nothing left over
    Filled,
    /// Remainder joined the book (GFD)
    Rested { volume: u64 },
    /// Remainder was dropped (FAK)
    Discarded { volume: u64 },
}

impl Disposition {
    /// Volume that did not trade
    pub fn unfilled_volume(&self) -> u64 {
        match *self {
            Disposition::Filled => 0,
            Disposition::Rested { volume } | Disposition::Discarded { volume } => volume,
        }
    }
}

/// Decide the fate of `remaining` volume under `time_in_force`.
pub fn dispose(time_in_force: TimeInForce, remaining: u64) -> Disposition {
    match (remaining, time_in_force) {
        (0, _) => Disposition::Filled,
        (volume, TimeInForce::Gfd) => Disposition::Rested { volume },
        (volume, TimeInForce::Fak) => Disposition::Discarded { volume },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_left_is_filled() {
        assert_eq!(dispose(TimeInForce::Gfd, 0), Disposition::Filled);
        assert_eq!(dispose(TimeInForce::Fak, 0), Disposition::Filled);
    }

    #[test]
    fn test_gfd_rests_remainder() {
        assert_eq!(dispose(TimeInForce::Gfd, 6), Disposition::Rested { volume: 6 });
    }

    #[test]
    fn test_fak_discards_remainder() {
        let disposition = dispose(TimeInForce::Fak, 5);
        assert_eq!(disposition, Disposition::Discarded { volume: 5 });
        assert_eq!(disposition.unfilled_volume(), 5);
    }
}
