//! Read Scope
//!
//! Which rows a session may see on read endpoints.

use crate::domain::entity::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadScope {
    /// Admins see private rows too
    All,
    /// Students see only `isPublic = true` rows
    PublicOnly,
}

impl ReadScope {
    pub fn for_session(session: &Session) -> Self {
        if session.is_admin() {
            ReadScope::All
        } else {
            ReadScope::PublicOnly
        }
    }

    /// Whether a row with the given visibility is readable
    #[inline]
    pub fn allows(&self, is_public: bool) -> bool {
        match self {
            ReadScope::All => true,
            ReadScope::PublicOnly => is_public,
        }
    }

    #[inline]
    pub fn public_only(&self) -> bool {
        matches!(self, ReadScope::PublicOnly)
    }
}
