//! Access-control role attached to every user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user account.
///
/// Stored as a `SMALLINT` (`1` = user, `2` = admin) and exchanged over the
/// API as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Database representation.
    pub fn as_i16(self) -> i16 {
        match self {
            Role::User => 1,
            Role::Admin => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl TryFrom<i16> for Role {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::User),
            2 => Ok(Role::Admin),
            other => Err(other),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
