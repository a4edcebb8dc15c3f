//! Strongly typed identifiers for users and items.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the raw identifier.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Identifier of a user who supplies ratings and receives recommendations.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::UserId;
    ///
    /// let user = UserId::new(7);
    /// assert_eq!(user.get(), 7);
    /// assert_eq!(user.to_string(), "7");
    /// ```
    UserId
);

define_id!(
    /// Identifier of a rated or recommended item (a product in the catalogue).
    ItemId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_order_by_raw_value() {
        let mut users = vec![UserId::new(3), UserId::new(1), UserId::new(2)];
        users.sort();
        assert_eq!(users, vec![UserId::new(1), UserId::new(2), UserId::new(3)]);
    }

    #[rstest]
    fn ids_round_trip_through_u64() {
        let item = ItemId::from(42);
        assert_eq!(u64::from(item), 42);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn ids_serialise_transparently() {
        let json = serde_json::to_string(&ItemId::new(9)).expect("serialise id");
        assert_eq!(json, "9");
        let user: UserId = serde_json::from_str("12").expect("deserialise id");
        assert_eq!(user, UserId::new(12));
    }
}
