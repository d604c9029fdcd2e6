//! Jewelry material.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Metal a piece of jewelry is made of.
///
/// Catalog markup carries the material as a free-form attribute. Anything
/// other than `gold` or `silver` (including a missing attribute) is
/// [`Material::None`], which is stored as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Material {
    Gold,
    Silver,
    #[default]
    None,
}

impl Material {
    /// Parse a material attribute value. Unknown values map to `None`.
    #[must_use]
    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "gold" => Self::Gold,
            "silver" => Self::Silver,
            _ => Self::None,
        }
    }

    /// Stable attribute value used in markup and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::None => "",
        }
    }

    /// Customer-facing label including the hallmark, empty for `None`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "Золото 585",
            Self::Silver => "Серебро 925",
            Self::None => "",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Material {
    fn from(value: String) -> Self {
        Self::from_attr(&value)
    }
}

impl From<Material> for String {
    fn from(material: Material) -> Self {
        material.as_str().to_owned()
    }
}
