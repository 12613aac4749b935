use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SORTABLE_CLASS: &str = "sortable";
pub const DEFAULT_FIXED_CLASSES: [&str; 2] = ["padding-row", "subhead"];
pub const DEFAULT_HIDABLE_CLASSES: [&str; 2] = ["hidable", "hidable2"];
pub const DEFAULT_HIDER_CLASS: &str = "hider";
pub const DEFAULT_HIDDEN_CLASS: &str = "hidden";
pub const DEFAULT_HIDING_CLASS: &str = "hiding";
pub const DEFAULT_ASCENDING_CLASS: &str = "asc";
pub const DEFAULT_DESCENDING_CLASS: &str = "desc";
pub const DEFAULT_VALUE_ATTRIBUTE: &str = "data-value";

/// Element id of the optional JSON block that overrides [`TableClasses`].
pub const CONFIG_ELEMENT_ID: &str = "trends-tables-config";

/// Class and attribute names the table markup is expected to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableClasses {
    pub sortable: String,
    pub fixed: Vec<String>,
    pub hidable: Vec<String>,
    pub hider: String,
    pub hidden: String,
    pub hiding: String,
    pub ascending: String,
    pub descending: String,
    pub value_attribute: String,
    /// BCP 47 tag used for collation. `None` means the host default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Default for TableClasses {
    fn default() -> Self {
        Self {
            sortable: DEFAULT_SORTABLE_CLASS.to_string(),
            fixed: DEFAULT_FIXED_CLASSES.iter().map(|c| c.to_string()).collect(),
            hidable: DEFAULT_HIDABLE_CLASSES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            hider: DEFAULT_HIDER_CLASS.to_string(),
            hidden: DEFAULT_HIDDEN_CLASS.to_string(),
            hiding: DEFAULT_HIDING_CLASS.to_string(),
            ascending: DEFAULT_ASCENDING_CLASS.to_string(),
            descending: DEFAULT_DESCENDING_CLASS.to_string(),
            value_attribute: DEFAULT_VALUE_ATTRIBUTE.to_string(),
            locale: None,
        }
    }
}

impl TableClasses {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let classes: Self = serde_json::from_str(json)?;
        classes.validate()?;
        Ok(classes)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("sortable", &self.sortable),
            ("hider", &self.hider),
            ("hidden", &self.hidden),
            ("hiding", &self.hiding),
            ("ascending", &self.ascending),
            ("descending", &self.descending),
            ("value_attribute", &self.value_attribute),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyName { field });
            }
        }
        Ok(())
    }

    pub fn is_fixed(&self, class: &str) -> bool {
        self.fixed.iter().any(|c| c == class)
    }

    pub fn is_hidable(&self, class: &str) -> bool {
        self.hidable.iter().any(|c| c == class)
    }
}
