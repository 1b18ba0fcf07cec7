//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use bloglist::outbound::persistence::DbPool;
use bloglist::outbound::security::DEFAULT_BCRYPT_COST;
use chrono::TimeDelta;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) token_secret: Zeroizing<String>,
    pub(crate) token_ttl: TimeDelta,
    pub(crate) bcrypt_cost: u32,
}

impl ServerConfig {
    /// Construct a server configuration with a one hour token lifetime and
    /// the default bcrypt cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, token_secret: &str) -> Self {
        Self {
            bind_addr,
            db_pool,
            token_secret: Zeroizing::new(token_secret.to_owned()),
            token_ttl: TimeDelta::hours(1),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    #[must_use]
    pub fn with_token_ttl(mut self, ttl: TimeDelta) -> Self {
        self.token_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
