//! DESKGRAPH CONNECTOR - Sync and Provisioning Engine
//!
//! Maps upstream helpdesk records into the canonical resource graph, derives
//! entitlements and grants per resource kind, and translates grant/revoke
//! intents into upstream membership mutations. The upstream API is consumed
//! through the [`deskgraph_client::UpstreamApi`] trait; no code here touches
//! the network directly.

pub mod config;
pub mod connector;
pub mod mapper;
pub mod sync;

pub use config::ConnectorConfig;
pub use connector::{Connector, ConnectorMetadata};
pub use sync::{ResourceProvisioner, ResourceSyncer};
