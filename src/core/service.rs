use crate::core::{AuditProvider, Clock, PackageStore, SystemClock};
use crate::domain::model::{AuditStamp, Package, PackageDraft, WriteAck};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde_json::Value;

/// Validates write payloads and delegates to a [`PackageStore`].
///
/// Calls are independent of each other. Updates and deletes do not check
/// that the id exists; a missing id is reported as zero rows affected.
pub struct PackageService<S: PackageStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    hub_id: i64,
    user_id: String,
}

impl<S: PackageStore> PackageService<S, SystemClock> {
    pub fn new(store: S, audit: &impl AuditProvider) -> Self {
        Self::with_clock(store, SystemClock, audit)
    }
}

impl<S: PackageStore, C: Clock> PackageService<S, C> {
    pub fn with_clock(store: S, clock: C, audit: &impl AuditProvider) -> Self {
        Self {
            store,
            clock,
            hub_id: audit.hub_id(),
            user_id: audit.user_id().to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn stamp(&self) -> AuditStamp {
        AuditStamp {
            at: self.clock.now(),
            user_id: self.user_id.clone(),
            hub_id: self.hub_id,
        }
    }

    fn check(&self, operation: &str, draft: &PackageDraft) -> Result<()> {
        draft.validate().map_err(|e| {
            tracing::warn!("⚠️ {} rejected: {}", operation, e);
            e
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Package>> {
        let packages = self.store.select_all().await?;
        tracing::debug!("Listed {} packages", packages.len());
        Ok(packages)
    }

    pub async fn create(&self, draft: PackageDraft) -> Result<WriteAck> {
        self.check("create", &draft)?;
        let ack = self.store.insert(draft, self.stamp()).await?;
        tracing::info!("✅ Created package {:?}", ack.inserted_id);
        Ok(ack)
    }

    pub async fn update_by_id(&self, id: i64, draft: PackageDraft) -> Result<WriteAck> {
        self.check("update", &draft)?;
        let ack = self.store.update(id, draft, self.stamp()).await?;
        if ack.rows_affected == 0 {
            tracing::debug!("Update of package {} matched no rows", id);
        }
        tracing::info!("✅ Updated package {} ({} rows)", id, ack.rows_affected);
        Ok(ack)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<WriteAck> {
        let ack = self.store.delete(id).await?;
        if ack.rows_affected == 0 {
            tracing::debug!("Delete of package {} matched no rows", id);
        }
        tracing::info!("🗑️ Deleted package {} ({} rows)", id, ack.rows_affected);
        Ok(ack)
    }

    /// Parses an untyped payload and creates it.
    pub async fn create_from_json(&self, payload: &Value) -> Result<WriteAck> {
        let draft = PackageDraft::from_json(payload).map_err(|e| {
            tracing::warn!("⚠️ create rejected: {}", e);
            e
        })?;
        self.create(draft).await
    }

    pub async fn update_from_json(&self, id: i64, payload: &Value) -> Result<WriteAck> {
        let draft = PackageDraft::from_json(payload).map_err(|e| {
            tracing::warn!("⚠️ update rejected: {}", e);
            e
        })?;
        self.update_by_id(id, draft).await
    }
}
