//! Operator session context.
//!
//! The single place identity is read from. The role is resolved once
//! at login and immutable for the session; invalidation (credential
//! rejected server-side) flows through the one hook registered here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use maskadmin_core::permissions::{can_perform_action, user_permissions};
use maskadmin_core::roles::Role;

/// Callback invoked once when the session is invalidated.
pub type InvalidationHook = Arc<dyn Fn() + Send + Sync>;

/// Identity and permission context for one operator session.
#[derive(Clone)]
pub struct SessionContext {
    role: Option<Role>,
    invalidated: Arc<AtomicBool>,
    on_invalidated: Option<InvalidationHook>,
}

impl SessionContext {
    /// A session for a resolved role. `role` is `None` when the
    /// identity carried no recognized role; such a session can view
    /// nothing gated and perform nothing.
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            invalidated: Arc::new(AtomicBool::new(false)),
            on_invalidated: None,
        }
    }

    /// Register the teardown hook. At most one; fired at most once.
    pub fn with_invalidation_hook(mut self, hook: InvalidationHook) -> Self {
        self.on_invalidated = Some(hook);
        self
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Whether this session may perform `action`. Fail closed.
    pub fn can(&self, action: &str) -> bool {
        !self.is_invalidated()
            && self.role.is_some_and(|role| can_perform_action(role, action))
    }

    /// Full permission list for display.
    pub fn permissions(&self) -> &'static [&'static str] {
        self.role.map(user_permissions).unwrap_or(&[])
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::SeqCst)
    }

    /// Mark the session invalid and fire the hook. Idempotent; the
    /// hook runs only on the first call.
    pub fn invalidate(&self) {
        if !self.invalidated.swap(true, Ordering::SeqCst) {
            tracing::warn!(role = ?self.role, "Session invalidated");
            if let Some(hook) = &self.on_invalidated {
                hook();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
