pub mod catalog;
pub mod config;
pub mod deps;
pub mod engine;
pub mod kpiset;
pub mod metrics_server;
pub mod observability;
pub mod registry;
pub mod store;

pub use engine::{
    EngineError, KpiEngine, ManualKpiEntry, OffsetEntry, Principal, ReadingSubmission,
    SubmitOutcome,
};
pub use registry::Period;
pub use store::{MemoryStore, PgStore, Store, StoreError};
