//! Todo category rules.
//!
//! `category` is the only server-enforced enum constraint on the todos
//! table. It is stored as TEXT; this module owns parsing and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two allowed todo categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Work" => Ok(Category::Work),
            "Personal" => Ok(Category::Personal),
            other => Err(CoreError::Validation(format!(
                "Category must be either \"Work\" or \"Personal\", got \"{other}\""
            ))),
        }
    }
}

/// Validate a category string, returning a [`CoreError::Validation`] for
/// anything outside {Work, Personal}.
pub fn validate_category(category: &str) -> Result<Category, CoreError> {
    category.parse()
}
