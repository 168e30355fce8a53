//! Authenticated identity attached to a request

use kernel::id::UserId;

use crate::domain::value_object::user_role::UserRole;

/// Who is making the request
///
/// Produced by the session gate. Handlers use `user_id` for creator and
/// updater columns and `role` to decide what may be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Session {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
