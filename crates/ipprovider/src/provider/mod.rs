use std::fmt::{Debug, Display};

use async_trait::async_trait;

use crate::ProviderError;

mod http;
mod service;
#[cfg(test)]
mod testserver;

pub use http::HttpProvider;
pub use service::Service;

/// A Provider resolves the public IP address of the machine it runs on
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Returns the current public IP address as reported by the backend, verbatim.
    async fn get_ip(&self) -> Result<String, ProviderError>;

    /// Use IPv6 for all subsequent lookups. Calling this more than once has no further effect.
    fn force_ipv6(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    IPv4,
    IPv6,
}

impl Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressFamily::IPv4 => write!(f, "IPv4"),
            AddressFamily::IPv6 => write!(f, "IPv6"),
        }
    }
}
