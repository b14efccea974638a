//! User registration, login and search.
//!
//! Passwords are stored verbatim and compared by equality. That matches
//! the application this core was built for; treat the store as untrusted
//! for anything beyond study bookkeeping.

use serde::{Deserialize, Serialize};

use crate::error::{AccountError, StoreError};
use crate::ledger::{User, UserStats};
use crate::storage::{keys, Store};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Public view of a user, safe to hand to other users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub display_name: String,
    pub stats: UserStats,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            stats: user.stats.clone(),
        }
    }
}

/// Account management over a [`Store`].
pub struct Accounts<'a> {
    store: &'a Store,
}

impl<'a> Accounts<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn users(&self) -> Result<Vec<User>, StoreError> {
        self.store.read_collection(keys::USERS)
    }

    /// Register a new user with zeroed stats.
    pub fn register(
        &self,
        username: &str,
        display_name: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        let username = username.trim();
        let display_name = display_name.trim();

        if username.len() < MIN_USERNAME_LEN {
            return Err(AccountError::InvalidField {
                field: "username".to_string(),
                message: format!("must be at least {MIN_USERNAME_LEN} characters"),
            });
        }
        if display_name.is_empty() {
            return Err(AccountError::InvalidField {
                field: "display_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AccountError::InvalidField {
                field: "password".to_string(),
                message: format!("must be at least {MIN_PASSWORD_LEN} characters"),
            });
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.username == username) {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }

        let user = User::new(username, display_name, password);
        users.push(user.clone());
        self.store.write_collection(keys::USERS, &users)?;
        Ok(user)
    }

    /// Verify credentials. Returns `None` for an unknown username or a
    /// wrong password; the two cases are indistinguishable on purpose.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users()?;
        Ok(users
            .into_iter()
            .find(|u| u.username == username && u.password == password))
    }

    /// Case-insensitive substring search over usernames and display names.
    pub fn search(&self, query: &str) -> Result<Vec<UserSummary>, StoreError> {
        let needle = query.to_lowercase();
        let users = self.users()?;
        Ok(users
            .iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .map(UserSummary::from)
            .collect())
    }

    /// Make `follower` follow `followee`. Returns `false` (and changes
    /// nothing) if either user is missing, they are the same user, or the
    /// relation already exists.
    pub fn follow(&self, follower: &str, followee: &str) -> Result<bool, StoreError> {
        if follower == followee {
            return Ok(false);
        }
        let mut users = self.users()?;
        let both_exist = users.iter().any(|u| u.username == follower)
            && users.iter().any(|u| u.username == followee);
        if !both_exist {
            return Ok(false);
        }

        let already = users
            .iter()
            .find(|u| u.username == follower)
            .map(|u| u.following.iter().any(|f| f == followee))
            .unwrap_or(true);
        if already {
            return Ok(false);
        }

        for user in users.iter_mut() {
            if user.username == follower {
                user.following.push(followee.to_string());
            } else if user.username == followee {
                user.followers.push(follower.to_string());
            }
        }
        self.store.write_collection(keys::USERS, &users)?;
        Ok(true)
    }

    /// Remove a follow relation. Returns `false` if it did not exist.
    pub fn unfollow(&self, follower: &str, followee: &str) -> Result<bool, StoreError> {
        let mut users = self.users()?;
        let mut removed = false;
        for user in users.iter_mut() {
            if user.username == follower {
                let before = user.following.len();
                user.following.retain(|f| f != followee);
                removed = user.following.len() != before;
            } else if user.username == followee {
                user.followers.retain(|f| f != follower);
            }
        }
        if removed {
            self.store.write_collection(keys::USERS, &users)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_authenticate() {
        let store = Store::open_memory().unwrap();
        let accounts = Accounts::new(&store);
        accounts.register("ada", "Ada L.", "hunter22").unwrap();

        assert!(accounts.authenticate("ada", "hunter22").unwrap().is_some());
        assert!(accounts.authenticate("ada", "wrong").unwrap().is_none());
        assert!(accounts.authenticate("bob", "hunter22").unwrap().is_none());
    }

    #[test]
    fn register_validates_fields() {
        let store = Store::open_memory().unwrap();
        let accounts = Accounts::new(&store);

        let err = accounts.register("ab", "Ada", "hunter22").unwrap_err();
        assert!(matches!(err, AccountError::InvalidField { ref field, .. } if field == "username"));

        let err = accounts.register("ada", "", "hunter22").unwrap_err();
        assert!(
            matches!(err, AccountError::InvalidField { ref field, .. } if field == "display_name")
        );

        let err = accounts.register("ada", "Ada", "short").unwrap_err();
        assert!(matches!(err, AccountError::InvalidField { ref field, .. } if field == "password"));
    }

    #[test]
    fn register_rejects_duplicate_username() {
        let store = Store::open_memory().unwrap();
        let accounts = Accounts::new(&store);
        accounts.register("ada", "Ada L.", "hunter22").unwrap();
        let err = accounts.register("ada", "Other Ada", "hunter23").unwrap_err();
        assert!(matches!(err, AccountError::UsernameTaken(_)));
    }

    #[test]
    fn search_is_case_insensitive() {
        let store = Store::open_memory().unwrap();
        let accounts = Accounts::new(&store);
        accounts.register("ada", "Ada Lovelace", "hunter22").unwrap();
        accounts.register("grace", "Grace H.", "hunter22").unwrap();

        let found = accounts.search("LOVE").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "ada");
        assert!(accounts.search("nobody").unwrap().is_empty());
    }

    #[test]
    fn follow_and_unfollow() {
        let store = Store::open_memory().unwrap();
        let accounts = Accounts::new(&store);
        accounts.register("ada", "Ada", "hunter22").unwrap();
        accounts.register("grace", "Grace", "hunter22").unwrap();

        assert!(accounts.follow("ada", "grace").unwrap());
        assert!(!accounts.follow("ada", "grace").unwrap()); // already
        assert!(!accounts.follow("ada", "ada").unwrap()); // self
        assert!(!accounts.follow("ada", "ghost").unwrap()); // missing

        let grace = Accounts::new(&store)
            .authenticate("grace", "hunter22")
            .unwrap()
            .unwrap();
        assert_eq!(grace.followers, vec!["ada".to_string()]);

        assert!(accounts.unfollow("ada", "grace").unwrap());
        assert!(!accounts.unfollow("ada", "grace").unwrap());
    }
}
