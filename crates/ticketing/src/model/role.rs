use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

string_enum! {
    Role {
        Attendee => "attendee",
        Organizer => "organizer",
        Admin => "admin",
    }
}

/// The roles a user holds. Roles are not exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().collect())
    }

    pub fn attendee() -> Self {
        Self::new([Role::Attendee])
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Role> {
        self.iter().collect()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|r| r.as_str().to_string()).collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl TryFrom<Vec<String>> for RoleSet {
    type Error = super::ParseEnumError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        value
            .iter()
            .map(|s| s.parse::<Role>())
            .collect::<Result<RoleSet, _>>()
    }
}

pub fn has_role(roles: &RoleSet, role: Role) -> bool {
    roles.contains(role)
}

pub fn has_any_role(roles: &RoleSet, wanted: &[Role]) -> bool {
    wanted.iter().any(|role| roles.contains(*role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_lists_from_storage() {
        let roles = RoleSet::try_from(vec!["organizer".to_string(), "admin".to_string()]).unwrap();
        assert!(has_role(&roles, Role::Organizer));
        assert!(has_role(&roles, Role::Admin));
        assert!(!has_role(&roles, Role::Attendee));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(RoleSet::try_from(vec!["superuser".to_string()]).is_err());
    }

    #[test]
    fn duplicates_collapse() {
        let roles = RoleSet::new([Role::Admin, Role::Admin]);
        assert_eq!(roles.to_vec(), vec![Role::Admin]);
    }

    #[test]
    fn any_role_matches() {
        let roles = RoleSet::attendee();
        assert!(has_any_role(&roles, &[Role::Organizer, Role::Attendee]));
        assert!(!has_any_role(&roles, &[Role::Organizer, Role::Admin]));
    }
}
