use chrono::{DateTime, Utc};

/// User account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// Login identifier, unique across all accounts
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    /// Media-root relative path to the avatar image, if one was uploaded
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

impl User {
    /// Minimal well-formedness check for login emails
    pub fn validate_email(email: &str) -> bool {
        match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        }
    }

    /// Usernames must be non-empty and free of whitespace
    pub fn validate_username(username: &str) -> bool {
        !username.is_empty() && !username.chars().any(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(User::validate_email("chef@example.com"));
        assert!(!User::validate_email("chef@nodot"));
        assert!(!User::validate_email("@example.com"));
        assert!(!User::validate_email("no-at-sign"));
        assert!(!User::validate_email(""));
    }

    #[test]
    fn test_validate_username() {
        assert!(User::validate_username("chef_anna"));
        assert!(!User::validate_username(""));
        assert!(!User::validate_username("chef anna"));
    }
}
