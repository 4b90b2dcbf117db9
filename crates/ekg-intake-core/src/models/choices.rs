//! Fixed-choice form fields.
//!
//! Each choice has a canonical lowercase value (what the store keeps) and a
//! Turkmen label (what the form shows). Parsing accepts either.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A choice value that matched neither a canonical value nor a label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {field} value: {value:?}")]
pub struct ParseChoiceError {
    pub field: &'static str,
    pub value: String,
}

fn matches_choice(input: &str, canonical: &str, label: &str) -> bool {
    let lower = input.trim().to_lowercase();
    lower == canonical || lower == label.to_lowercase()
}

/// Patient gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Canonical stored value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Erkek",
            Gender::Female => "Aýal",
        }
    }
}

impl FromStr for Gender {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| matches_choice(s, g.as_str(), g.label()))
            .ok_or_else(|| ParseChoiceError {
                field: "gender",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of locality the patient lives in. Leads the composed address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum LocalityType {
    #[default]
    City,
    District,
}

impl LocalityType {
    pub const ALL: [LocalityType; 2] = [LocalityType::City, LocalityType::District];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocalityType::City => "city",
            LocalityType::District => "district",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocalityType::City => "Şäher",
            LocalityType::District => "Etrap",
        }
    }
}

impl FromStr for LocalityType {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| matches_choice(s, l.as_str(), l.label()))
            .ok_or_else(|| ParseChoiceError {
                field: "locality type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for LocalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health insurance status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Insurance {
    #[default]
    Present,
    Absent,
}

impl Insurance {
    pub const ALL: [Insurance; 2] = [Insurance::Present, Insurance::Absent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Insurance::Present => "present",
            Insurance::Absent => "absent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Insurance::Present => "Bar",
            Insurance::Absent => "Ýok",
        }
    }
}

impl FromStr for Insurance {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| matches_choice(s, i.as_str(), i.label()))
            .ok_or_else(|| ParseChoiceError {
                field: "insurance",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Insurance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
