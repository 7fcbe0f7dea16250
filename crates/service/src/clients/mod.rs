//! Client registry: validation, persistence gateway and the use-case service.

pub mod domain;
pub mod gateway;
pub mod memory;
pub mod service;

pub use domain::{ClientKey, NewClient};
pub use gateway::{ClientGateway, SeaOrmClientGateway};
pub use memory::{InMemoryClientGateway, KeyCasing};
pub use service::ClientRegistryService;
