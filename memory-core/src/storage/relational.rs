//! Relational store trait for the unified storage engine (C8, §6).

use crate::entity::ExtractedEntity;
use crate::episode_record::{EpisodeRecord, MemoryItem};
use crate::fact::Fact;
use crate::tenant::TenantContext;
use crate::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Durable row-oriented storage for episodes/memory items.
///
/// `insert_episode` must be idempotent on `content_hash` within a tenant —
/// callers upsert via `ON CONFLICT` semantics rather than pre-checking.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Write a plain (non-episodic) memory or document-chunk row (§6
    /// `unified_content` table).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn insert_memory_item(&self, item: &MemoryItem) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn get_memory_item(&self, tenant: &TenantContext, id: Uuid) -> Result<Option<MemoryItem>>;

    /// Overwrite an existing memory item's mutable fields by id (§6
    /// `updateEpisodeImportance` and administrative metadata edits).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn update_memory_item(&self, item: &MemoryItem) -> Result<()>;

    /// List memory items newest-first, for `listMemories` (§6).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn list_memory_items(&self, tenant: &TenantContext, limit: usize, offset: usize) -> Result<Vec<MemoryItem>>;

    /// Strict lookup of document chunks tagged `content_type=document_chunk`
    /// with a matching `page_number` metadata entry, for the page-anchor
    /// recall override (§4.10 step 9).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn find_by_page(&self, tenant: &TenantContext, page_number: u64) -> Result<Vec<MemoryItem>>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn count_memory_items(&self, tenant: &TenantContext) -> Result<usize>;

    /// Insert or no-op (if `content_hash` already exists for the tenant).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn insert_episode(&self, episode: &EpisodeRecord) -> Result<()>;

    /// Overwrite an existing episode's mutable fields (importance, facts,
    /// consolidation state) by id. Unlike [`Self::insert_episode`], this
    /// always applies the update.
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn update_episode(&self, episode: &EpisodeRecord) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn get_episode(&self, tenant: &TenantContext, id: Uuid) -> Result<Option<EpisodeRecord>>;

    /// Lookup by content hash, scoped to tenant, for dedup pre-checks (§4.9).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn find_by_content_hash(&self, tenant: &TenantContext, content_hash: &str) -> Result<Option<EpisodeRecord>>;

    /// Idempotent delete of any `unified_content` row (memory item, chunk,
    /// or episode) by id. Missing rows are success, not an error (§4.8).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure (not on "not found").
    async fn delete_content_row(&self, tenant: &TenantContext, id: Uuid) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn list_recent(&self, tenant: &TenantContext, limit: usize) -> Result<Vec<EpisodeRecord>>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn count_episodes(&self, tenant: &TenantContext) -> Result<usize>;

    /// Insert or overwrite an entity row by id (§4.7 resolver persistence, §6 `mergeEntities`).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn upsert_entity(&self, entity: &ExtractedEntity) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn get_entity(&self, tenant: &TenantContext, id: Uuid) -> Result<Option<ExtractedEntity>>;

    /// List a tenant's entities, most-mentioned first, capped to `limit` —
    /// the resolution candidate window (§4.7).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn list_entities(&self, tenant: &TenantContext, limit: usize) -> Result<Vec<ExtractedEntity>>;

    /// Idempotent delete: missing entities are success, not an error (§6 `mergeEntities`).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure (not on "not found").
    async fn delete_entity(&self, id: Uuid) -> Result<()>;

    /// Insert or overwrite a fact row by id (§6 `validateFact`).
    ///
    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn upsert_fact(&self, fact: &Fact) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error on backing-store failure.
    async fn get_fact(&self, tenant: &TenantContext, id: Uuid) -> Result<Option<Fact>>;
}
