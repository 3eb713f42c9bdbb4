use std::net::SocketAddr;

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

impl ServerConfig {
    pub const DEFAULT_LISTEN_ADDRESS: SocketAddr =
        SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 5000);

    /// Configured address, or `0.0.0.0:5000`
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address.unwrap_or(Self::DEFAULT_LISTEN_ADDRESS)
    }
}
