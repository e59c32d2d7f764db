//! Role-based access policy.
//!
//! The policy is a constant table mapping each role to the intent names it
//! may trigger. Anything not in a role's set is denied. The dispatcher
//! consults this table on every request; the instructions embedded in the
//! AI prompt are advisory only and never replace this check.

use crate::intent::names;
use crate::role::Role;
use std::collections::{BTreeMap, BTreeSet};

/// Static role -> allowed intent names table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    grants: BTreeMap<Role, BTreeSet<String>>,
}

impl Policy {
    /// The supply chain policy.
    ///
    /// Producers may create, advance, delete and read assets. Consumers may
    /// only read. Unknown roles are granted nothing.
    pub fn standard() -> Self {
        Self::from_grants([
            (
                Role::Producer,
                vec![
                    names::CREATE_ASSET,
                    names::UPDATE_STAGE,
                    names::DELETE_ASSET,
                    names::QUERY_ASSET,
                ],
            ),
            (Role::Consumer, vec![names::QUERY_ASSET]),
        ])
    }

    /// Build a policy from explicit grants. Roles not listed get an empty set.
    pub fn from_grants<I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, Vec<S>)>,
        S: Into<String>,
    {
        let grants = grants
            .into_iter()
            .map(|(role, names)| (role, names.into_iter().map(Into::into).collect()))
            .collect();
        Self { grants }
    }

    /// Intent names permitted for `role` (empty if unmapped).
    pub fn allowed(&self, role: Role) -> BTreeSet<&str> {
        self.grants
            .get(&role)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `role` may trigger `intent_name`.
    pub fn allows(&self, role: Role, intent_name: &str) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|names| names.contains(intent_name))
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::standard()
    }
}
