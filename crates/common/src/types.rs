use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Defines a storage-assigned integer identifier.
///
/// Each identifier wraps an `i64` so that bag and cuboid ids cannot be
/// mixed up at compile time, while still serializing as a bare number.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from its raw value.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw value, as stored in the database.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

record_id!(
    /// Unique identifier of a bag.
    BagId
);

record_id!(
    /// Unique identifier of a cuboid.
    CuboidId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_id_parses_from_path_segment() {
        let id: BagId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn cuboid_id_rejects_non_numeric_input() {
        assert!("abc".parse::<CuboidId>().is_err());
        assert!("".parse::<CuboidId>().is_err());
        assert!("1.5".parse::<CuboidId>().is_err());
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&CuboidId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: BagId = serde_json::from_str("13").unwrap();
        assert_eq!(id, BagId::new(13));
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(BagId::new(999).to_string(), "999");
    }
}
