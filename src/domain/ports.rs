use crate::domain::model::{EntityKind, EntityRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Boolean attribute selectors for flag-filtered counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    Approved,
    Open24x7,
}

/// Attribute selectors for grouped counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Location,
    ServiceType,
}

/// The persistence boundary. The importer is the only writer and goes
/// through `commit`, which is all-or-nothing: either every record of the
/// batch becomes visible or none does, and a failed commit leaves the
/// store exactly as it was.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Lookup by normalized email within one kind (the dedup query).
    async fn find_by_email(&self, kind: EntityKind, email: &str) -> Result<Option<EntityRecord>>;

    /// All records of one kind, in insertion order.
    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<EntityRecord>>;

    async fn count(&self, kind: EntityKind) -> Result<u64>;

    /// Count of records whose given boolean attribute is set. Kinds
    /// without the attribute count as zero.
    async fn count_flagged(&self, kind: EntityKind, flag: FlagField) -> Result<u64>;

    /// Grouped count over a string attribute, including empty values
    /// (callers decide whether to drop them).
    async fn group_count(&self, kind: EntityKind, group: GroupField) -> Result<Vec<(String, u64)>>;

    /// Atomically persist one staged batch, assigning identities and
    /// timestamps. Returns the number of records committed.
    async fn commit(&self, batch: Vec<EntityRecord>) -> Result<u64>;

    /// Delete every record of one kind, returning how many were removed.
    async fn clear(&self, kind: EntityKind) -> Result<u64>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn store_path(&self) -> &str;
    fn output_path(&self) -> &str;
}
