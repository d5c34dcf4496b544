use crate::domain::model::{AuditStamp, Package, PackageDraft, WriteAck};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable table of package records keyed by `id`.
///
/// Every method maps to a single statement. Updates and deletes against an
/// id that does not exist affect zero rows and still succeed.
#[async_trait]
pub trait PackageStore: Send + Sync {
    async fn select_all(&self) -> Result<Vec<Package>>;
    async fn insert(&self, draft: PackageDraft, stamp: AuditStamp) -> Result<WriteAck>;
    async fn update(&self, id: i64, draft: PackageDraft, stamp: AuditStamp) -> Result<WriteAck>;
    async fn delete(&self, id: i64) -> Result<WriteAck>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Placeholder identity recorded on every write.
pub trait AuditProvider: Send + Sync {
    fn hub_id(&self) -> i64;
    fn user_id(&self) -> &str;
}
