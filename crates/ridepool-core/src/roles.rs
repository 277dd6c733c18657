//! Account roles and the role dispatch table.
//!
//! A single account entity carries one [`Role`] tag. Behaviour that differs
//! between roles is looked up here instead of living on per-role types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the fixed set of roles determining authorization scope.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Employee,
    Admin,
}

/// How accounts of a given role come into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationChannel {
    /// Public self-service sign-up
    SelfService,
    /// Created by an administrator through the API
    AdminConsole,
    /// Created by an operator with the CLI only
    Cli,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Employee, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }

    /// Identifier stored in the `role_id` column.
    pub fn id(self) -> i16 {
        match self {
            Role::User => 1,
            Role::Employee => 2,
            Role::Admin => 3,
        }
    }

    pub fn from_id(id: i16) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.id() == id)
    }

    pub fn registration_channel(self) -> RegistrationChannel {
        match self {
            Role::User => RegistrationChannel::SelfService,
            Role::Employee => RegistrationChannel::AdminConsole,
            Role::Admin => RegistrationChannel::Cli,
        }
    }

    /// Whether accounts of this role may act on other accounts (list, suspend,
    /// log out on their behalf).
    pub fn manages_accounts(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(4), None);
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!("employee".parse::<Role>(), Ok(Role::Employee));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert!("Admin".parse::<Role>().is_err());
        assert!("system_admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_registration_channels() {
        assert_eq!(
            Role::User.registration_channel(),
            RegistrationChannel::SelfService
        );
        assert_eq!(
            Role::Employee.registration_channel(),
            RegistrationChannel::AdminConsole
        );
        assert_eq!(Role::Admin.registration_channel(), RegistrationChannel::Cli);
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), r#""employee""#);
        let role: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, Role::Admin);
    }
}
