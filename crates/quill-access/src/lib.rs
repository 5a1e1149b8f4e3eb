//! Mutation access policy for Quill.
//!
//! Every mutating endpoint (create, delete, upload) runs the authenticated
//! principal's email through an [`AccessPolicy`] before touching storage.
//! The policy is built once from configuration at process startup and is a
//! pure value type: [`AccessPolicy::evaluate`] has no I/O and no hidden
//! state, which keeps the decision unit-testable.
//!
//! Semantics: deny when there is no principal; otherwise allow when the
//! email appears in the email allow-list, or its domain appears in the
//! domain allow-list, or when neither list is configured at all. Setting
//! any allow-list flips the default from permissive to restrictive.

use serde::{Deserialize, Serialize};

/// Outcome of a policy evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Allow-lists governing who may mutate content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessPolicy {
    allowed_emails: Vec<String>,
    allowed_domains: Vec<String>,
}

impl AccessPolicy {
    /// An unrestricted policy: every authenticated principal is allowed.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn new(allowed_emails: Vec<String>, allowed_domains: Vec<String>) -> Self {
        Self {
            allowed_emails,
            allowed_domains,
        }
    }

    /// Build a policy from comma-separated configuration strings.
    ///
    /// Items are trimmed and empty entries dropped, so `"a@x.com, ,b@y.org"`
    /// yields two entries and an entirely blank string yields none.
    pub fn from_config(allowed_emails: &str, allowed_domains: &str) -> Self {
        Self {
            allowed_emails: split_list(allowed_emails),
            allowed_domains: split_list(allowed_domains),
        }
    }

    /// Returns `true` when no allow-list is configured (fail-open mode).
    pub fn is_open(&self) -> bool {
        self.allowed_emails.is_empty() && self.allowed_domains.is_empty()
    }

    /// Decide whether the principal identified by `email` may mutate.
    pub fn evaluate(&self, email: Option<&str>) -> Decision {
        let email = match email {
            Some(e) if !e.is_empty() => e,
            _ => return Decision::Deny,
        };
        if self.allowed_emails.iter().any(|allowed| allowed == email) {
            return Decision::Allow;
        }
        if !self.allowed_domains.is_empty() {
            let domain = email.split_once('@').map(|(_, d)| d).unwrap_or("");
            if self.allowed_domains.iter().any(|allowed| allowed == domain) {
                return Decision::Allow;
            }
        }
        if self.is_open() {
            return Decision::Allow;
        }
        tracing::debug!(email, "mutation denied by access policy");
        Decision::Deny
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_policy_allows_any_principal() {
        let policy = AccessPolicy::open();
        assert_eq!(policy.evaluate(Some("a@x.com")), Decision::Allow);
    }

    #[test]
    fn no_principal_is_always_denied() {
        let open = AccessPolicy::open();
        assert_eq!(open.evaluate(None), Decision::Deny);
        assert_eq!(open.evaluate(Some("")), Decision::Deny);

        let restricted = AccessPolicy::from_config("b@x.com", "");
        assert_eq!(restricted.evaluate(None), Decision::Deny);
    }

    #[test]
    fn email_allow_list_is_exact() {
        let policy = AccessPolicy::from_config("b@x.com", "");
        assert_eq!(policy.evaluate(Some("b@x.com")), Decision::Allow);
        assert_eq!(policy.evaluate(Some("a@x.com")), Decision::Deny);
    }

    #[test]
    fn domain_allow_list_matches_any_local_part() {
        let policy = AccessPolicy::from_config("", "x.com");
        assert_eq!(policy.evaluate(Some("a@x.com")), Decision::Allow);
        assert_eq!(policy.evaluate(Some("b@x.com")), Decision::Allow);
        assert_eq!(policy.evaluate(Some("a@y.com")), Decision::Deny);
    }

    #[test]
    fn email_list_wins_over_missing_domain_match() {
        let policy = AccessPolicy::from_config("a@y.com", "x.com");
        assert_eq!(policy.evaluate(Some("a@y.com")), Decision::Allow);
        assert_eq!(policy.evaluate(Some("c@x.com")), Decision::Allow);
        assert_eq!(policy.evaluate(Some("c@z.com")), Decision::Deny);
    }

    #[test]
    fn email_without_at_sign_has_no_domain() {
        let policy = AccessPolicy::from_config("", "x.com");
        assert_eq!(policy.evaluate(Some("not-an-email")), Decision::Deny);
    }

    #[test]
    fn config_strings_are_trimmed_and_filtered() {
        let policy = AccessPolicy::from_config(" a@x.com , , b@y.org ", "  ,  ");
        assert!(!policy.is_open());
        assert_eq!(policy.evaluate(Some("a@x.com")), Decision::Allow);
        assert_eq!(policy.evaluate(Some("b@y.org")), Decision::Allow);
    }

    #[test]
    fn blank_config_is_open() {
        let policy = AccessPolicy::from_config("", "");
        assert!(policy.is_open());
        assert_eq!(policy.evaluate(Some("anyone@anywhere")), Decision::Allow);
    }
}
