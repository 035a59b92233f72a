use crate::domain::User;

/// Read-only lookup over the accounts allowed to log in.
pub trait UserStore: Send + Sync {
    /// Returns the user whose username and password both match exactly.
    fn find_by_credentials(&self, username: &str, password: &str) -> Option<User>;

    fn all(&self) -> Vec<User>;
}

/// A fixed set of users supplied at start-up.
#[derive(Debug, Clone, Default)]
pub struct StaticUserStore {
    users: Vec<User>,
}

impl StaticUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl UserStore for StaticUserStore {
    fn find_by_credentials(&self, username: &str, password: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
    }

    fn all(&self) -> Vec<User> {
        self.users.clone()
    }
}
