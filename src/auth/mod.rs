/// Admin authentication
///
/// A single configured username/password pair guards the admin area. Successful
/// logins open a session in the [`SessionStore`]; the API layer checks it on every
/// mutating request.

pub mod session;

pub use session::{Session, SessionStore, SESSION_COOKIE};

use crate::config::AuthConfig;
use subtle::ConstantTimeEq;

/// The configured admin credential
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    /// Exact match on both fields
    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run.
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_pair_verifies() {
        let creds = AdminCredentials::new("admin", "Messi@876910");

        assert!(creds.verify("admin", "Messi@876910"));
        assert!(!creds.verify("admin", "messi@876910"));
        assert!(!creds.verify("Admin", "Messi@876910"));
        assert!(!creds.verify("admin", ""));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn debug_output_omits_password() {
        let creds = AdminCredentials::new("admin", "secret-value");
        assert!(!format!("{:?}", creds).contains("secret-value"));
    }
}
