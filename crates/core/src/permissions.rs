//! Role-based permission table.
//!
//! Static configuration mapping each role to the set of
//! `"<resource>.<verb>"` actions it may perform. Loaded at compile time
//! and never mutated. Lookups fail closed: an unknown role or an action
//! missing from its set is simply "not permitted", never an error.
//!
//! Every state-mutating affordance in the console (create/update/delete
//! workflow, execute/pause/resume/stop an execution, create connection)
//! must consult this table before rendering or dispatching.

use crate::roles::Role;

/// Permissions granted to the `admin` role.
const ADMIN_PERMISSIONS: &[&str] = &[
    "connection.view",
    "connection.create",
    "connection.update",
    "connection.delete",
    "connection.test",
    "workflow.view",
    "workflow.create",
    "workflow.update",
    "workflow.delete",
    "workflow.execute",
    "execution.start",
    "execution.view",
    "execution.stop",
    "execution.pause",
    "execution.resume",
    "preview.view",
    "masking.view",
    "columnMapping.view",
    "constraint.view",
];

/// Permissions granted to the `general` role (read-only plus connection
/// test).
const GENERAL_PERMISSIONS: &[&str] = &[
    "connection.view",
    "connection.test",
    "workflow.view",
    "execution.view",
    "preview.view",
    "columnMapping.view",
    "constraint.view",
];

/// Permissions granted to the `privilege` role (read plus full
/// execution control).
const PRIVILEGE_PERMISSIONS: &[&str] = &[
    "connection.view",
    "connection.test",
    "workflow.view",
    "workflow.execute",
    "execution.start",
    "execution.view",
    "execution.stop",
    "execution.pause",
    "execution.resume",
    "preview.view",
    "columnMapping.view",
    "constraint.view",
];

/// Permissions granted to the `support` role (read-only plus connection
/// test).
const SUPPORT_PERMISSIONS: &[&str] = &[
    "connection.view",
    "connection.test",
    "workflow.view",
    "execution.view",
    "preview.view",
    "columnMapping.view",
    "constraint.view",
];

/// Full permission set for a role, for display purposes.
pub fn user_permissions(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::General => GENERAL_PERMISSIONS,
        Role::Privilege => PRIVILEGE_PERMISSIONS,
        Role::Support => SUPPORT_PERMISSIONS,
    }
}

/// Whether `role` is allowed to perform `action`.
///
/// Fails closed: an empty action or an action outside the role's set
/// returns `false`.
pub fn can_perform_action(role: Role, action: &str) -> bool {
    if action.is_empty() {
        return false;
    }
    user_permissions(role).contains(&action)
}

/// Like [`can_perform_action`] but for a possibly-unresolved role.
/// `None` (no authenticated role) is never permitted anything.
pub fn can_perform_action_opt(role: Option<Role>, action: &str) -> bool {
    role.is_some_and(|r| can_perform_action(r, action))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
