//! # Tenant Context Gate
//!
//! Enforces `(company_id, app_id, user_id)` isolation on every read and write.
//!
//! A reserved `user_id = "system"` is readable across all users within the
//! same `(company_id, app_id)`. A small legacy allow-list exists for
//! backward-compatible reads only (see [`TenantGate::legacy_company_ids`]).

mod gate;

pub use gate::{TenantFilter, TenantGate};

use serde::{Deserialize, Serialize};

/// The reserved user id that is broadcast within a `(company_id, app_id)` pair.
pub const SYSTEM_USER: &str = "system";

/// Legacy system lane honored by recall's `should` filter (§4.10).
pub const LEGACY_SYSTEM_LANE: &str = "unified-memory";

/// Tuple identifying the caller of every Storage API operation.
///
/// Every persisted record carries one of these; every query filters by it.
/// Invariant: no record may be read outside its tenant, except
/// `user_id = "system"` which is broadcast within its `(company_id, app_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantContext {
    /// Owning company / organization identifier.
    pub company_id: String,
    /// Application identifier within the company.
    pub app_id: String,
    /// The acting user, or [`SYSTEM_USER`] for broadcast records.
    pub user_id: String,
    /// Optional session identifier for scoping session-bounded state.
    pub session_id: Option<String>,
}

impl TenantContext {
    /// Create a tenant context scoped to a single user.
    #[must_use]
    pub fn new(company_id: impl Into<String>, app_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            app_id: app_id.into(),
            user_id: user_id.into(),
            session_id: None,
        }
    }

    /// Create a system-scoped tenant context, broadcast within `(company_id, app_id)`.
    #[must_use]
    pub fn system(company_id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self::new(company_id, app_id, SYSTEM_USER)
    }

    /// Attach a session id.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Whether this context is the reserved system user.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.user_id == SYSTEM_USER
    }

    /// Whether `other`'s records are visible to a reader using `self`.
    ///
    /// True when the company/app match and either the user matches, or the
    /// record's owner is the system user (broadcast within the company/app).
    #[must_use]
    pub fn can_read(&self, other: &TenantContext) -> bool {
        self.company_id == other.company_id
            && self.app_id == other.app_id
            && (self.user_id == other.user_id || other.user_id == SYSTEM_USER)
    }
}
