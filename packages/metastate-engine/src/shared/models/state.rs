//! State lattice
//!
//! `FileRequirement` is the policy a modality assigns to a section.
//! `MetaState` is the classification result for one (record, field) pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requirement a modality places on a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRequirement {
    Required,
    Optional,
    Excluded,
}

impl FileRequirement {
    pub const ALL: [FileRequirement; 3] = [
        FileRequirement::Required,
        FileRequirement::Optional,
        FileRequirement::Excluded,
    ];

    /// Combine the requirements of two modalities for the same field.
    ///
    /// `Required` beats everything, `Optional` beats `Excluded`.
    pub fn merge(self, other: FileRequirement) -> FileRequirement {
        self.max(other)
    }

    /// Merge an arbitrary number of requirements.
    ///
    /// Returns `None` for an empty iterator; callers decide the fallback.
    pub fn merge_all<I>(requirements: I) -> Option<FileRequirement>
    where
        I: IntoIterator<Item = FileRequirement>,
    {
        requirements.into_iter().reduce(FileRequirement::merge)
    }

    fn rank(self) -> u8 {
        match self {
            FileRequirement::Excluded => 0,
            FileRequirement::Optional => 1,
            FileRequirement::Required => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileRequirement::Required => "required",
            FileRequirement::Optional => "optional",
            FileRequirement::Excluded => "excluded",
        }
    }
}

impl PartialOrd for FileRequirement {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FileRequirement {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for FileRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "required" => Ok(FileRequirement::Required),
            "optional" => Ok(FileRequirement::Optional),
            "excluded" => Ok(FileRequirement::Excluded),
            _ => Err(format!(
                "Unknown requirement '{}'. Valid values: required, optional, excluded",
                s
            )),
        }
    }
}

/// Classification of a single field of a single record
///
/// Display order by "goodness": valid > present > optional > missing,
/// with excluded neutral. The engine itself never compares states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaState {
    Excluded,
    Missing,
    Optional,
    Present,
    Valid,
}

impl MetaState {
    pub const ALL: [MetaState; 5] = [
        MetaState::Valid,
        MetaState::Present,
        MetaState::Optional,
        MetaState::Missing,
        MetaState::Excluded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaState::Excluded => "excluded",
            MetaState::Missing => "missing",
            MetaState::Optional => "optional",
            MetaState::Present => "present",
            MetaState::Valid => "valid",
        }
    }

    /// Integer code used by status tables
    pub fn code(&self) -> i8 {
        match self {
            MetaState::Valid => 2,
            MetaState::Present => 1,
            MetaState::Optional => 0,
            MetaState::Missing => -1,
            MetaState::Excluded => -2,
        }
    }

    pub fn from_code(code: i8) -> Option<MetaState> {
        match code {
            2 => Some(MetaState::Valid),
            1 => Some(MetaState::Present),
            0 => Some(MetaState::Optional),
            -1 => Some(MetaState::Missing),
            -2 => Some(MetaState::Excluded),
            _ => None,
        }
    }

    /// The state an empty or absent value takes under `requirement`.
    pub fn for_absent(requirement: FileRequirement) -> MetaState {
        match requirement {
            FileRequirement::Optional => MetaState::Optional,
            _ => MetaState::Missing,
        }
    }
}

impl fmt::Display for MetaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetaState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetaState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown metadata state '{}'", s))
    }
}
