//! Core metadata sections
//!
//! The fixed set of top-level sections every requirement table covers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreField {
    Acquisition,
    DataDescription,
    Instrument,
    Procedures,
    Processing,
    QualityControl,
    Rig,
    Session,
    Subject,
}

impl CoreField {
    /// All core fields in display order (alphabetical by name)
    pub const ALL: [CoreField; 9] = [
        CoreField::Acquisition,
        CoreField::DataDescription,
        CoreField::Instrument,
        CoreField::Procedures,
        CoreField::Processing,
        CoreField::QualityControl,
        CoreField::Rig,
        CoreField::Session,
        CoreField::Subject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoreField::Acquisition => "acquisition",
            CoreField::DataDescription => "data_description",
            CoreField::Instrument => "instrument",
            CoreField::Procedures => "procedures",
            CoreField::Processing => "processing",
            CoreField::QualityControl => "quality_control",
            CoreField::Rig => "rig",
            CoreField::Session => "session",
            CoreField::Subject => "subject",
        }
    }

    /// Field names of every core section, in display order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(CoreField::as_str).collect()
    }
}

impl fmt::Display for CoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoreField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoreField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("'{}' is not a core metadata section", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_by_name() {
        let names = CoreField::names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_parse_roundtrip() {
        for field in CoreField::ALL {
            assert_eq!(field.as_str().parse::<CoreField>().unwrap(), field);
        }
        assert!("name".parse::<CoreField>().is_err());
    }
}
