//! User registry.
//!
//! Tasks never own users. They hold `UserId` values that are resolved
//! through this registry when an intent introduces a new reference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for a user.
pub type UserId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    ProjectManager,
    Developer,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Inactive users stay resolvable for history but cannot be assigned.
    pub is_active: bool,
}

impl User {
    /// Creates an active user with a generated id.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role,
            is_active: true,
        }
    }
}

/// Id-keyed user lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    users: BTreeMap<UserId, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one user. Returns the previous entry, if any.
    pub fn upsert(&mut self, user: User) -> Option<User> {
        self.users.insert(user.id, user)
    }

    pub fn remove(&mut self, id: UserId) -> Option<User> {
        self.users.remove(&id)
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Active users in id order, as offered by assignee pickers.
    pub fn active(&self) -> impl Iterator<Item = &User> {
        self.users.values().filter(|user| user.is_active)
    }
}

impl FromIterator<User> for UserRegistry {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().map(|user| (user.id, user)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserRegistry, UserRole};

    #[test]
    fn active_skips_deactivated_users() {
        let alice = User::new("Alice", "alice@example.com", UserRole::Developer);
        let mut bob = User::new("Bob", "bob@example.com", UserRole::Viewer);
        bob.is_active = false;
        let registry: UserRegistry = [alice.clone(), bob.clone()].into_iter().collect();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(bob.id));
        let active = registry.active().map(|user| user.id).collect::<Vec<_>>();
        assert_eq!(active, vec![alice.id]);
    }
}
