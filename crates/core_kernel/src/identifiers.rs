//! Strongly-typed identifiers for campaigns, assets and bookings
//!
//! Each identifier is a UUID newtype with a short display prefix
//! (`CMP-...`, `AST-...`) so ids from different tables cannot be swapped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Booking identifiers
define_id!(CampaignId, "CMP");
define_id!(AssetId, "AST");
define_id!(BookingId, "BKG");
define_id!(ClientId, "CLT");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_id_display() {
        let id = CampaignId::new();
        let display = id.to_string();
        assert!(display.starts_with("CMP-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = AssetId::new_v7();
        let parsed: AssetId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: AssetId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, bare);
    }

    #[test]
    fn test_id_parsing_rejects_garbage() {
        assert!("CMP-not-a-uuid".parse::<CampaignId>().is_err());
    }

    #[test]
    fn test_prefixes_are_distinct() {
        let prefixes = [
            CampaignId::prefix(),
            AssetId::prefix(),
            BookingId::prefix(),
            ClientId::prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let client_id = ClientId::from(uuid);
        let back: Uuid = client_id.into();
        assert_eq!(uuid, back);
    }
}
