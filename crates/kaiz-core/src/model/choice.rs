//! Enum-constrained column values
//!
//! Both enums accept case-insensitive input and always store the uppercase
//! literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::VisitError;

/// Customer classification used for equipment-category reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerCategory {
    #[serde(rename = "TPE")]
    Tpe,
    #[serde(rename = "NON-TPE")]
    NonTpe,
}

impl CustomerCategory {
    pub const ALLOWED: [&'static str; 2] = ["TPE", "NON-TPE"];

    /// The literal stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerCategory::Tpe => "TPE",
            CustomerCategory::NonTpe => "NON-TPE",
        }
    }

    /// Parse user input, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "TPE" => Some(CustomerCategory::Tpe),
            "NON-TPE" => Some(CustomerCategory::NonTpe),
            _ => None,
        }
    }
}

impl FromStr for CustomerCategory {
    type Err = VisitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| VisitError::InvalidEnumValue {
            field: "tpe_or_non_tpe".to_string(),
            value: s.to_string(),
            allowed: Self::ALLOWED.iter().map(|a| a.to_string()).collect(),
        })
    }
}

impl fmt::Display for CustomerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// YES/NO flag used by the opportunity and load-status columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const ALLOWED: [&'static str; 2] = ["YES", "NO"];

    /// The literal stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "YES",
            YesNo::No => "NO",
        }
    }

    /// Parse user input, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "YES" => Some(YesNo::Yes),
            "NO" => Some(YesNo::No),
            _ => None,
        }
    }

    /// Parse input for a specific column, naming it in the error
    pub fn parse_for(field: &str, input: &str) -> Result<Self, VisitError> {
        Self::parse(input).ok_or_else(|| VisitError::InvalidEnumValue {
            field: field.to_string(),
            value: input.to_string(),
            allowed: Self::ALLOWED.iter().map(|a| a.to_string()).collect(),
        })
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
