// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Turning a session token into a [`Profile`].
//!
//! A session token has the form `user.isolated-entity.role`, where every
//! segment is optional from the right. Resolution always produces a profile:
//! identifiers that fail to parse are replaced with freshly generated ones and
//! unknown role tags are ignored.

use log::debug;
use serde::Serialize;

use crate::id::{Id, IdGenerator};

/// Role flags granted to a user. The flags are independent of one another.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub is_user: bool,
    pub is_admin: bool,
    pub is_manager: bool,
}

impl Authorization {
    #[must_use]
    pub const fn user() -> Self {
        Self {
            is_user: true,
            is_admin: false,
            is_manager: false,
        }
    }

    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        match role {
            Role::Admin => self.is_admin = true,
            Role::Manager => self.is_manager = true,
        }
        self
    }
}

/// An elevated role that the last segment of a session token can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
}

impl Role {
    /// Maps a role tag to a role. Tags are case-sensitive; anything other than
    /// `admin` or `manager` grants nothing.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }
}

/// The identity and permissions of the user behind a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    user_id: Id,
    authenticated: bool,
    authorization: Authorization,
    isolated_entity_id: Id,
    department_id: i64,
    department_name: String,
}

impl Profile {
    pub(crate) const fn new_unauthenticated(user_id: Id, isolated_entity_id: Id) -> Self {
        Self {
            user_id,
            authenticated: false,
            authorization: Authorization {
                is_user: false,
                is_admin: false,
                is_manager: false,
            },
            isolated_entity_id,
            department_id: 0,
            department_name: String::new(),
        }
    }

    pub(crate) const fn new_authenticated(
        user_id: Id,
        isolated_entity_id: Id,
        authorization: Authorization,
    ) -> Self {
        Self {
            user_id,
            authenticated: true,
            authorization,
            isolated_entity_id,
            department_id: 0,
            department_name: String::new(),
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> Id {
        self.user_id
    }

    #[must_use]
    pub const fn authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub const fn authorization(&self) -> &Authorization {
        &self.authorization
    }

    #[must_use]
    pub const fn isolated_entity_id(&self) -> Id {
        self.isolated_entity_id
    }

    #[must_use]
    pub const fn department_id(&self) -> i64 {
        self.department_id
    }

    #[must_use]
    pub fn department_name(&self) -> &str {
        &self.department_name
    }
}

/// How an identifier segment was turned into an [`Id`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// The segment was a valid identifier.
    Parsed(Id),
    /// The segment did not parse, so a fresh identifier stands in for it.
    Defaulted(Id),
}

impl Resolved {
    #[must_use]
    pub const fn id(self) -> Id {
        match self {
            Self::Parsed(id) | Self::Defaulted(id) => id,
        }
    }

    #[must_use]
    pub const fn is_defaulted(self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Parses one identifier segment, substituting a generated identifier if it
/// is malformed.
pub fn resolve_id(text: &str, ids: &impl IdGenerator) -> Resolved {
    match ids.parse(text) {
        Ok(id) => Resolved::Parsed(id),
        Err(e) => {
            let id = ids.generate();
            debug!(
                "Substituting identifier {} for malformed segment {:?}: {}",
                id, text, e
            );
            Resolved::Defaulted(id)
        }
    }
}

/// Builds a profile from a session token. This never fails.
pub fn resolve_profile(session_value: &str, ids: &impl IdGenerator) -> Profile {
    if session_value.is_empty() {
        return Profile::new_unauthenticated(ids.generate(), ids.generate());
    }

    let mut segments = session_value.splitn(3, '.');
    let user_id = segments
        .next()
        .map_or_else(|| ids.generate(), |text| resolve_id(text, ids).id());
    let isolated_entity_id = segments
        .next()
        .map_or_else(|| ids.generate(), |text| resolve_id(text, ids).id());

    let authorization = match segments.next() {
        Some(tag) => match Role::from_tag(tag) {
            Some(role) => Authorization::user().with_role(role),
            None => {
                debug!("Ignoring unknown role tag {:?}", tag);
                Authorization::user()
            }
        },
        None => Authorization::user(),
    };

    Profile::new_authenticated(user_id, isolated_entity_id, authorization)
}
