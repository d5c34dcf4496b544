pub mod service;

pub use crate::domain::model::{AuditStamp, Package, PackageDraft, WriteAck};
pub use crate::domain::ports::{AuditProvider, Clock, PackageStore, SystemClock};
pub use crate::utils::error::Result;
