pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::sqlite::SqliteStore;
pub use crate::config::AppConfig;
pub use crate::core::service::PackageService;
pub use crate::domain::model::{
    Package, PackageDraft, ReceiverAddress, ReceptionMode, SenderAddress, ShippingMode,
    ShippingParty, ShippingType, WriteAck,
};
pub use crate::utils::error::{IntakeError, Result};
