use serde::Serialize;
use std::fmt;

use crate::shared::models::{CoreField, FileRequirement, MetaState};

/// Section a nested field lives in, with the requirement that section
/// resolved to at the top level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParentSection {
    pub section: CoreField,
    pub requirement: FileRequirement,
}

impl ParentSection {
    pub fn new(section: CoreField, requirement: FileRequirement) -> Self {
        Self {
            section,
            requirement,
        }
    }
}

/// Classification of one field, with the inputs that decided it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    pub field: String,
    pub state: MetaState,
    pub requirement: FileRequirement,
    /// Validation failure text, when the value was present but rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FieldOutcome {
    pub fn new(field: impl Into<String>, state: MetaState, requirement: FileRequirement) -> Self {
        Self {
            field: field.into(),
            state,
            requirement,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}

impl fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<28} {:<9} ({})", self.field, self.state, self.requirement)?;
        if let Some(reason) = &self.reason {
            write!(f, "\n    {}", reason)?;
        }
        Ok(())
    }
}
