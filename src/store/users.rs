use thiserror::Error;

use crate::store::schema::{DEFAULT_USER, UserRegistryData};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("user name is empty")]
    EmptyName,
    #[error("that name is reserved")]
    ReservedName,
    #[error("user name contains invalid characters")]
    InvalidName,
}

/// In-memory view of the user registry. Mutations return whether the
/// registry changed so the caller knows to persist; the active-record
/// hand-off itself (persist outgoing, load incoming) lives in the app.
pub struct UserRegistry {
    pub data: UserRegistryData,
}

impl UserRegistry {
    pub fn new(data: UserRegistryData) -> Self {
        Self { data }
    }

    pub fn active(&self) -> &str {
        &self.data.active
    }

    /// All selectable identities, reserved default first.
    pub fn all_names(&self) -> Vec<String> {
        let mut names = vec![DEFAULT_USER.to_string()];
        names.extend(self.data.users.iter().cloned());
        names
    }

    pub fn exists(&self, name: &str) -> bool {
        name == DEFAULT_USER || self.data.users.iter().any(|u| u == name)
    }

    /// Trim and validate a candidate name. The reserved identity cannot
    /// be created explicitly, and names that would break the per-user
    /// file naming are rejected.
    pub fn validate_name(name: &str) -> Result<String, UserError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }
        if name == DEFAULT_USER {
            return Err(UserError::ReservedName);
        }
        if name.contains(['/', '\\', '\0', '.']) {
            return Err(UserError::InvalidName);
        }
        Ok(name.to_string())
    }

    /// Register a name (deduplicating) and return the normalized form.
    pub fn create(&mut self, name: &str) -> Result<String, UserError> {
        let name = Self::validate_name(name)?;
        if !self.data.users.contains(&name) {
            self.data.users.push(name.clone());
        }
        Ok(name)
    }

    /// Point the registry at a known user. Unknown names are ignored.
    pub fn set_active(&mut self, name: &str) -> bool {
        if !self.exists(name) || self.data.active == name {
            return false;
        }
        self.data.active = name.to_string();
        true
    }

    /// Drop a user from the registry. The reserved default cannot be
    /// deleted. Returns true when the registry changed; if the deleted
    /// user was active, the active pointer falls back to default.
    pub fn remove(&mut self, name: &str) -> bool {
        if name == DEFAULT_USER {
            return false;
        }
        let before = self.data.users.len();
        self.data.users.retain(|u| u != name);
        let removed = self.data.users.len() != before;
        if removed && self.data.active == name {
            self.data.active = DEFAULT_USER.to_string();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_always_present_and_first() {
        let registry = UserRegistry::new(UserRegistryData::default());
        assert_eq!(registry.all_names(), vec!["default".to_string()]);
        assert!(registry.exists("default"));
    }

    #[test]
    fn create_trims_validates_and_dedups() {
        let mut registry = UserRegistry::new(UserRegistryData::default());

        assert_eq!(registry.create("  alice  ").unwrap(), "alice");
        assert_eq!(registry.create("alice").unwrap(), "alice");
        assert_eq!(registry.data.users, vec!["alice".to_string()]);

        assert_eq!(registry.create("   "), Err(UserError::EmptyName));
        assert_eq!(registry.create("default"), Err(UserError::ReservedName));
        assert_eq!(registry.create("a/b"), Err(UserError::InvalidName));
        assert_eq!(registry.create("..name"), Err(UserError::InvalidName));
    }

    #[test]
    fn set_active_requires_known_name() {
        let mut registry = UserRegistry::new(UserRegistryData::default());
        assert!(!registry.set_active("ghost"));
        assert_eq!(registry.active(), "default");

        registry.create("alice").unwrap();
        assert!(registry.set_active("alice"));
        assert_eq!(registry.active(), "alice");

        // Re-selecting the active user is not a change
        assert!(!registry.set_active("alice"));
    }

    #[test]
    fn removing_active_user_falls_back_to_default() {
        let mut registry = UserRegistry::new(UserRegistryData::default());
        registry.create("alice").unwrap();
        registry.create("bob").unwrap();
        registry.set_active("alice");

        assert!(registry.remove("alice"));
        assert_eq!(registry.active(), "default");
        assert_eq!(registry.data.users, vec!["bob".to_string()]);
    }

    #[test]
    fn removing_inactive_user_keeps_active_pointer() {
        let mut registry = UserRegistry::new(UserRegistryData::default());
        registry.create("alice").unwrap();
        registry.create("bob").unwrap();
        registry.set_active("alice");

        assert!(registry.remove("bob"));
        assert_eq!(registry.active(), "alice");
    }

    #[test]
    fn default_cannot_be_removed() {
        let mut registry = UserRegistry::new(UserRegistryData::default());
        assert!(!registry.remove("default"));
        assert!(registry.exists("default"));
    }
}
