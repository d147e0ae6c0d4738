//! Gate logic applying tenant isolation to reads and writes.

use super::{TenantContext, LEGACY_SYSTEM_LANE, SYSTEM_USER};

/// The filter shape injected into every tenant-scoped read (§4.12, §4.10).
///
/// Mirrors both a relational `WHERE` clause and a vector-store payload
/// filter: `must` terms are required, `should` terms are an OR-group of
/// acceptable `user_id` values.
#[derive(Debug, Clone)]
pub struct TenantFilter {
    /// Required equality match.
    pub must_company_id: String,
    /// Required equality match.
    pub must_app_id: String,
    /// Acceptable `user_id` values (OR'd together).
    pub should_user_ids: Vec<String>,
}

impl TenantFilter {
    /// Does `record_user_id` pass this filter for `record_company_id`/`record_app_id`?
    #[must_use]
    pub fn matches(&self, company_id: &str, app_id: &str, user_id: &str) -> bool {
        self.must_company_id == company_id
            && self.must_app_id == app_id
            && self.should_user_ids.iter().any(|u| u == user_id)
    }
}

/// Enforces `(company_id, app_id, user_id)` isolation across the core.
///
/// This is a stateless policy object: it does not hold a connection to any
/// backing store, it only builds the filters and validations that the
/// storage traits (§6) apply.
#[derive(Debug, Clone, Default)]
pub struct TenantGate {
    /// Legacy company ids grandfathered in for backward-compatible reads
    /// only (open question (a) in §9 — retained behind this allow-list,
    /// never generalized).
    legacy_company_allow_list: Vec<String>,
}

impl TenantGate {
    /// Construct a gate with the standard legacy allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            legacy_company_allow_list: vec![
                "nexus-default".to_string(),
                "system".to_string(),
                "adverant".to_string(),
            ],
        }
    }

    /// Construct a gate with no legacy allowances (strict isolation only).
    #[must_use]
    pub fn strict() -> Self {
        Self {
            legacy_company_allow_list: Vec::new(),
        }
    }

    /// The legacy company ids this gate grandfathers in for recall.
    #[must_use]
    pub fn legacy_company_ids(&self) -> &[String] {
        &self.legacy_company_allow_list
    }

    /// Build the read filter for a recall/list/get operation under `tenant`.
    ///
    /// Includes the system user and, for recall, the legacy system lane
    /// (`"unified-memory"`).
    #[must_use]
    pub fn read_filter(&self, tenant: &TenantContext, include_legacy_lane: bool) -> TenantFilter {
        let mut should_user_ids = vec![tenant.user_id.clone(), SYSTEM_USER.to_string()];
        if include_legacy_lane {
            should_user_ids.push(LEGACY_SYSTEM_LANE.to_string());
        }
        should_user_ids.dedup();
        TenantFilter {
            must_company_id: tenant.company_id.clone(),
            must_app_id: tenant.app_id.clone(),
            should_user_ids,
        }
    }

    /// Whether `company_id` is on the legacy backward-compat allow-list.
    #[must_use]
    pub fn is_legacy_company(&self, company_id: &str) -> bool {
        self.legacy_company_allow_list.iter().any(|c| c == company_id)
    }

    /// Validate that every tenant in `tenants` shares the same
    /// `(company_id, app_id, user_id)` — required for merges and
    /// consolidation (§4.12).
    #[must_use]
    pub fn same_tenant(tenants: &[&TenantContext]) -> bool {
        match tenants.split_first() {
            None => true,
            Some((first, rest)) => rest.iter().all(|t| {
                t.company_id == first.company_id
                    && t.app_id == first.app_id
                    && t.user_id == first.user_id
            }),
        }
    }
}
