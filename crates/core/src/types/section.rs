//! Catalog sections.

use serde::{Deserialize, Serialize};

/// Error returned when a section name is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid section: {0}")]
pub struct SectionParseError(pub String);

/// Merchandising section a book can belong to.
///
/// A book may be in several sections at once (a new release on sale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Recently released.
    New,
    /// Best-selling titles.
    Bestseller,
    /// Discounted titles.
    Sale,
}

impl Section {
    /// All sections, in menu order.
    pub const ALL: [Self; 3] = [Self::New, Self::Bestseller, Self::Sale];

    /// The name used in URLs and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Bestseller => "bestseller",
            Self::Sale => "sale",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = SectionParseError;

    /// Case-insensitive: `?section=New` selects the same section as `new`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "bestseller" => Ok(Self::Bestseller),
            "sale" => Ok(Self::Sale),
            _ => Err(SectionParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("new".parse::<Section>().unwrap(), Section::New);
        assert_eq!("BestSeller".parse::<Section>().unwrap(), Section::Bestseller);
        assert_eq!(" SALE ".parse::<Section>().unwrap(), Section::Sale);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "clearance".parse::<Section>().unwrap_err();
        assert_eq!(err, SectionParseError("clearance".to_string()));
    }

    #[test]
    fn test_display_round_trips() {
        for section in Section::ALL {
            assert_eq!(section.to_string().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Section::Bestseller).unwrap(),
            "\"bestseller\""
        );
    }
}
