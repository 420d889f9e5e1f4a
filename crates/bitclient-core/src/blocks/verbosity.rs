use std::fmt;

use crate::error::ValidationError;

/// How much detail `getblock` returns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockVerbosity {
    /// Serialized, hex-encoded block.
    SerializedHex = 0,
    /// Object with basic block information.
    #[default]
    BasicInfo = 1,
    /// Object with block and per-transaction details.
    DetailedInfo = 2,
    /// Detailed info plus prevout data for every input.
    DetailedWithPrevout = 3,
}

impl BlockVerbosity {
    pub const MIN: i64 = Self::SerializedHex as i64;
    pub const MAX: i64 = Self::DetailedWithPrevout as i64;

    pub fn level(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for BlockVerbosity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::SerializedHex),
            1 => Ok(Self::BasicInfo),
            2 => Ok(Self::DetailedInfo),
            3 => Ok(Self::DetailedWithPrevout),
            other => Err(ValidationError::InvalidVerbosity(other)),
        }
    }
}

impl fmt::Display for BlockVerbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SerializedHex => "serialized hex",
            Self::BasicInfo => "basic info",
            Self::DetailedInfo => "detailed info",
            Self::DetailedWithPrevout => "detailed info with prevout",
        };
        write!(f, "{name} ({})", self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_zero_to_three() {
        for v in -3..=7 {
            let parsed = BlockVerbosity::try_from(v);
            assert_eq!(
                parsed.is_ok(),
                (BlockVerbosity::MIN..=BlockVerbosity::MAX).contains(&v),
                "verbosity {v}"
            );
        }
    }

    #[test]
    fn two_is_detailed_info() {
        assert_eq!(
            BlockVerbosity::try_from(2),
            Ok(BlockVerbosity::DetailedInfo)
        );
    }

    #[test]
    fn out_of_range_reports_value_and_range() {
        for v in [-1, 4] {
            let err = BlockVerbosity::try_from(v).expect_err("must reject");
            assert_eq!(err, ValidationError::InvalidVerbosity(v));
            let msg = err.to_string();
            assert!(msg.contains(&format!("({v})")), "{msg}");
            assert!(msg.contains("0-3"), "{msg}");
        }
    }

    #[test]
    fn level_round_trips_through_try_from() {
        for level in [
            BlockVerbosity::SerializedHex,
            BlockVerbosity::BasicInfo,
            BlockVerbosity::DetailedInfo,
            BlockVerbosity::DetailedWithPrevout,
        ] {
            assert_eq!(BlockVerbosity::try_from(i64::from(level.level())), Ok(level));
        }
    }
}
