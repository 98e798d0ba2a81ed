//! Ownership and role rules.
//!
//! Pure decision functions; services consult these before any mutation so
//! every resource applies the same rules. Keep them free of I/O.

/// May the actor mutate a resource owned by `owner_id`?
/// Admins may mutate anything; everyone else only their own resources.
pub fn can_mutate(actor_id: i64, actor_is_admin: bool, owner_id: i64) -> bool {
    actor_is_admin || actor_id == owner_id
}

/// May the actor delete the account `target_id`?
/// Admin-only, and self-deletion is forbidden regardless of role.
pub fn can_delete_user(actor_id: i64, actor_is_admin: bool, target_id: i64) -> bool {
    actor_is_admin && actor_id != target_id
}

/// May the actor enumerate accounts or read arbitrary profiles?
pub fn can_list_users(actor_is_admin: bool) -> bool {
    actor_is_admin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_mutate_own_resource() {
        assert!(can_mutate(1, false, 1));
    }

    #[test]
    fn non_owner_cannot_mutate() {
        assert!(!can_mutate(2, false, 1));
    }

    #[test]
    fn admin_can_mutate_any_resource() {
        assert!(can_mutate(2, true, 1));
        assert!(can_mutate(2, true, 2));
    }

    #[test]
    fn only_admins_delete_users() {
        assert!(!can_delete_user(1, false, 2));
        assert!(can_delete_user(1, true, 2));
    }

    #[test]
    fn admin_cannot_delete_self() {
        assert!(!can_delete_user(1, true, 1));
    }

    #[test]
    fn listing_is_admin_only() {
        assert!(can_list_users(true));
        assert!(!can_list_users(false));
    }
}
