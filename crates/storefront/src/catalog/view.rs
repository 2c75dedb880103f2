//! Grid/list view preference.

use tracing::warn;

use crate::storage::{Storage, StorageError};

/// Storage key holding the view preference.
pub const VIEW_MODE_KEY: &str = "bookViewMode";

/// How the catalog is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// The stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }

    /// Read the saved preference. Missing, unreadable or unknown values give
    /// [`ViewMode::Grid`].
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get(VIEW_MODE_KEY) {
            Ok(Some(value)) if value.trim() == "list" => Self::List,
            Ok(_) => Self::Grid,
            Err(e) => {
                warn!(error = %e, "Failed to read view mode");
                Self::Grid
            }
        }
    }

    /// Save this mode as the preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    pub fn save(self, storage: &mut impl Storage) -> Result<(), StorageError> {
        storage.set(VIEW_MODE_KEY, self.as_str())
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            _ => Err(format!("invalid view mode: {s}")),
        }
    }
}
