//! Operator roles.
//!
//! A role is resolved once from the authenticated identity and is
//! immutable for the rest of the session. Unknown role strings are not
//! an error; they simply carry no permissions.

use serde::{Deserialize, Serialize};

/// The fixed set of operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    General,
    Privilege,
    Support,
}

/// All roles, in display order.
pub const ALL_ROLES: [Role; 4] = [Role::Admin, Role::General, Role::Privilege, Role::Support];

impl Role {
    /// Parse a role string case-insensitively. Returns `None` for
    /// anything outside the fixed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "general" => Some(Self::General),
            "privilege" => Some(Self::Privilege),
            "support" => Some(Self::Support),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::General => "general",
            Self::Privilege => "privilege",
            Self::Support => "support",
        }
    }

    /// User-friendly display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::General => "General User",
            Self::Privilege => "Privileged User",
            Self::Support => "Support User",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("privilege"), Some(Role::Privilege));
    }

    #[test]
    fn parse_rejects_unknown_roles() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn as_str_roundtrip() {
        for role in ALL_ROLES {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn display_names_are_nonempty() {
        for role in ALL_ROLES {
            assert!(!role.display_name().is_empty());
        }
    }
}
