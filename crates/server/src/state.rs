use std::sync::Arc;

use service::clients::ClientRegistryService;

/// Shared handler state. Holds the registry service (and through it the one
/// connection pool); nothing request-specific lives here.
#[derive(Clone)]
pub struct ServerState {
    pub clients: Arc<ClientRegistryService>,
}

impl ServerState {
    pub fn new(clients: ClientRegistryService) -> Self {
        Self { clients: Arc::new(clients) }
    }
}
