//! Commands module - service layer for platform sync operations

mod inspect;
mod resolve;
pub(crate) mod service;
mod sync;
mod update;

pub use service::PlatformSyncService;
