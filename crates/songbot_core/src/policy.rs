//! Role gate for commands that change the song list.

use std::collections::HashSet;
use std::fmt;

/// Chat-platform role identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub u64);

impl From<u64> for RoleId {
    fn from(id: u64) -> Self {
        RoleId(id)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// No required role means everyone is allowed.
pub fn is_authorized(caller_roles: &HashSet<RoleId>, required: Option<RoleId>) -> bool {
    match required {
        None => true,
        Some(role) => caller_roles.contains(&role),
    }
}

/// The configured gate, kept alongside the store in the bot's shared data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleGate {
    required: Option<RoleId>,
}

impl RoleGate {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn requiring(role: impl Into<RoleId>) -> Self {
        Self {
            required: Some(role.into()),
        }
    }

    /// Role id 0 is treated as unset.
    pub fn from_config(required_role_id: Option<u64>) -> Self {
        Self {
            required: required_role_id.filter(|&id| id != 0).map(RoleId),
        }
    }

    pub fn required(&self) -> Option<RoleId> {
        self.required
    }

    pub fn allows(&self, caller_roles: &HashSet<RoleId>) -> bool {
        is_authorized(caller_roles, self.required)
    }
}
