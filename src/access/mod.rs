//! Role gating for protected console views.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Role names granted to the current session.
pub type RoleSet = HashSet<String>;

/// Session state consumed by the guard.
///
/// Owned by the auth layer; the guard reads it and never mutates it.
#[derive(Debug, Clone, Default)]
pub struct AccessContext {
    pub roles: RoleSet,
    pub token: Option<String>,
}

impl AccessContext {
    pub fn new(roles: RoleSet, token: Option<String>) -> Self {
        Self { roles, token }
    }

    /// Context for an authenticated session holding the given roles.
    pub fn with_roles<I, R>(roles: I, token: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            token: Some(token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// True iff the caller may see a view restricted to `allowed`.
///
/// An empty `allowed` list means the view carries no role restriction and is
/// open to any caller. (The shipped console evaluated that case to "no
/// access" and then never acted on the result; the open reading is the one
/// its call sites actually relied on.)
pub fn is_authorized<S: AsRef<str>>(caller: &RoleSet, allowed: &[S]) -> bool {
    allowed.is_empty() || allowed.iter().any(|role| caller.contains(role.as_ref()))
}

/// Outcome of an access check for a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the protected subtree unchanged.
    Grant,
    /// Send the caller to this path instead.
    Redirect(String),
}

/// Render-or-redirect gate placed in front of protected views.
///
/// Purely a decision: the host view performs the actual navigation. No
/// network or storage side effects.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    login_path: String,
    fallback_path: String,
}

impl AccessGuard {
    pub fn new(login_path: impl Into<String>, fallback_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            fallback_path: fallback_path.into(),
        }
    }

    pub fn from_config(config: &crate::config::ConsoleConfig) -> Self {
        Self::new(config.login_path.clone(), config.fallback_path.clone())
    }

    /// Decide whether a view restricted to `allowed` renders for this
    /// session. An unauthenticated caller goes to the login page; an
    /// authenticated caller lacking every allowed role goes to the fallback.
    pub fn check<S: AsRef<str>>(&self, ctx: &AccessContext, allowed: &[S]) -> AccessDecision {
        if !ctx.is_authenticated() {
            return AccessDecision::Redirect(self.login_path.clone());
        }
        if is_authorized(&ctx.roles, allowed) {
            AccessDecision::Grant
        } else {
            tracing::debug!(path = %self.fallback_path, "role check failed, redirecting");
            AccessDecision::Redirect(self.fallback_path.clone())
        }
    }
}

/// Which tenant surface the console is being served as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Admin,
    Company,
}

impl Platform {
    /// Detect the tenant from the host the console was loaded on. Hosts
    /// starting with `admin_prefix` serve the platform-admin surface; every
    /// other host serves a company tenant.
    pub fn from_host(host: &str, admin_prefix: &str) -> Self {
        if host
            .trim()
            .to_ascii_lowercase()
            .starts_with(&admin_prefix.to_ascii_lowercase())
        {
            Platform::Admin
        } else {
            Platform::Company
        }
    }

    /// Role implied by serving this surface.
    pub fn role(self) -> &'static str {
        match self {
            Platform::Admin => "admin",
            Platform::Company => "company",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> RoleSet {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn authorized_iff_roles_intersect() {
        let caller = roles(&["company", "support"]);
        assert!(is_authorized(&caller, &["admin", "company"]));
        assert!(!is_authorized(&caller, &["admin"]));
    }

    #[test]
    fn empty_allowed_list_means_no_restriction() {
        let caller = roles(&["company"]);
        assert!(is_authorized::<&str>(&caller, &[]));
        assert!(is_authorized::<&str>(&roles(&[]), &[]));
    }

    #[test]
    fn empty_caller_roles_fail_any_restriction() {
        assert!(!is_authorized(&roles(&[]), &["admin"]));
    }

    #[test]
    fn missing_token_redirects_to_login() {
        let guard = AccessGuard::new("/login", "/");
        let ctx = AccessContext::new(roles(&["admin"]), None);
        assert_eq!(
            guard.check(&ctx, &["admin"]),
            AccessDecision::Redirect("/login".to_string())
        );

        let blank = AccessContext::new(roles(&["admin"]), Some(String::new()));
        assert_eq!(
            guard.check(&blank, &["admin"]),
            AccessDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn role_denial_redirects_to_fallback() {
        let guard = AccessGuard::new("/login", "/");
        let ctx = AccessContext::with_roles(["company"], "tok");
        assert_eq!(
            guard.check(&ctx, &["admin"]),
            AccessDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn matching_role_grants() {
        let guard = AccessGuard::new("/login", "/");
        let ctx = AccessContext::with_roles(["admin"], "tok");
        assert_eq!(guard.check(&ctx, &["admin", "support"]), AccessDecision::Grant);
        // Unrestricted views render for any authenticated session.
        assert_eq!(guard.check(&ctx, &[] as &[&str]), AccessDecision::Grant);
    }

    #[test]
    fn platform_detection_from_host() {
        assert_eq!(
            Platform::from_host("admin.fleetdesk.io", "admin."),
            Platform::Admin
        );
        assert_eq!(
            Platform::from_host("ADMIN.fleetdesk.io", "admin."),
            Platform::Admin
        );
        assert_eq!(
            Platform::from_host("acme.fleetdesk.io", "admin."),
            Platform::Company
        );
        assert_eq!(Platform::Admin.role(), "admin");
        assert_eq!(Platform::Company.role(), "company");
    }
}
