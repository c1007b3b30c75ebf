//! Admin session store
//!
//! Opaque in-memory session tokens for the dashboard. Tokens live for the
//! lifetime of the process; this is a placeholder gate behind a shared
//! password, not a trust boundary.

use dashmap::DashMap;

use crate::utils::time::now_millis;

#[derive(Debug, Default)]
pub struct AdminSessions {
    /// token → issue time (Unix millis)
    tokens: DashMap<String, i64>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }

    /// Issue a fresh session token
    pub fn issue(&self) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), now_millis());
        token
    }

    /// Check whether a token belongs to a live session
    pub fn validate(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    /// Drop a session; returns whether it existed
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_validate_until_revoked() {
        let sessions = AdminSessions::new();
        let token = sessions.issue();

        assert!(sessions.validate(&token));
        assert!(sessions.revoke(&token));
        assert!(!sessions.validate(&token));
        assert!(!sessions.revoke(&token));
    }

    #[test]
    fn unknown_tokens_never_validate() {
        let sessions = AdminSessions::new();
        assert!(!sessions.validate("not-a-token"));
    }
}
