//! Location labels
//!
//! Maps a raw location string to a display label. Unmapped locations fall
//! back to the configured default, or to the location itself when no
//! default is set.

use std::collections::HashMap;

/// Label shown for any location other than home in the standard preset
pub const ON_LOAN: &str = "On loan";

/// Location string that maps to itself in the standard preset
pub const HOME: &str = "Home";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationMapper {
    default: Option<String>,
    mapping: HashMap<String, String>,
}

impl LocationMapper {
    pub fn new<I, K, V>(default: Option<String>, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            default,
            mapping: mapping
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Empty mapping; every location gets `default`.
    pub fn with_default(default: impl Into<String>) -> Self {
        Self {
            default: Some(default.into()),
            mapping: HashMap::new(),
        }
    }

    /// "Home" stays "Home"; everything else is "On loan".
    pub fn default_mapper() -> Self {
        Self::new(Some(ON_LOAN.to_string()), [(HOME, HOME)])
    }

    pub fn insert(&mut self, location: impl Into<String>, label: impl Into<String>) {
        self.mapping.insert(location.into(), label.into());
    }

    pub fn default_label(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Label for `location`; never fails.
    pub fn label<'a>(&'a self, location: &'a str) -> &'a str {
        self.mapping
            .get(location)
            .map(String::as_str)
            .or(self.default.as_deref())
            .unwrap_or(location)
    }

    /// Whether `location` has an explicit mapping
    pub fn is_mapped(&self, location: &str) -> bool {
        self.mapping.contains_key(location)
    }
}
