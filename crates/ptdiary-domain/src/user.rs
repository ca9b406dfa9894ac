//! User domain types.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Wire format: `u8` (0 = Trainee, 1 = Trainer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Trainee = 0,
    Trainer = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Trainee),
            1 => Some(Self::Trainer),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_trainer(self) -> bool {
        self == Self::Trainer
    }
}
