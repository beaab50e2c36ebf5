//! Target-audience enum for catalog products.

use serde::{Deserialize, Serialize};

/// Intended audience for a product.
///
/// Maps to the backend's `gender` field on products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Unisex,
    Kids,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Men => write!(f, "men"),
            Self::Women => write!(f, "women"),
            Self::Unisex => write!(f, "unisex"),
            Self::Kids => write!(f, "kids"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "unisex" => Ok(Self::Unisex),
            "kids" => Ok(Self::Kids),
            _ => Err(format!("invalid gender: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_str() {
        for g in [Gender::Men, Gender::Women, Gender::Unisex, Gender::Kids] {
            assert_eq!(g.to_string().parse::<Gender>(), Ok(g));
        }
    }

    #[test]
    fn test_rejects_unknown_value() {
        assert!("boys".parse::<Gender>().is_err());
    }
}
