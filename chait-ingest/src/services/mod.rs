//! Services for chait-ingest

pub mod batch_orchestrator;
pub mod persistence_gateway;

pub use batch_orchestrator::{BatchOrchestrator, PROGRESS_INTERVAL};
pub use persistence_gateway::{normalize, GatewayError, PersistenceGateway};
