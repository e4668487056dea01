pub mod jwt;
pub mod middleware;
pub mod password;

use crate::models::admin::AdminRole;

/// Static authorization predicate. Protected handlers call this explicitly
/// instead of relying on per-route middleware closures.
pub fn allowed(role: AdminRole, required: &[AdminRole]) -> bool {
    required.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superadmin_only_rejects_other_roles() {
        let required = [AdminRole::Superadmin];
        assert!(allowed(AdminRole::Superadmin, &required));
        assert!(!allowed(AdminRole::Moderator, &required));
        assert!(!allowed(AdminRole::Editor, &required));
    }

    #[test]
    fn multiple_roles_accepted() {
        let required = [AdminRole::Superadmin, AdminRole::Moderator];
        assert!(allowed(AdminRole::Moderator, &required));
        assert!(!allowed(AdminRole::Editor, &required));
    }
}
