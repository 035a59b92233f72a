use serde::{Deserialize, Serialize};

/// A configured account that may log in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

/// The outward view of a user: no password, and a token only right after login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl User {
    pub fn new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Strips the password, optionally attaching a freshly issued token.
    pub fn to_public(&self, token: Option<String>) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_never_carries_password() {
        let user = User::new(1, "Test", "User", "test", "secret");
        let json = serde_json::to_value(user.to_public(Some("abc".into()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "username": "test",
                "firstName": "Test",
                "lastName": "User",
                "token": "abc"
            })
        );
        let listed = serde_json::to_value(user.to_public(None)).unwrap();
        assert!(listed.get("token").is_none());
    }
}
