use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::{AddressFamily, Provider, Service};
use crate::ProviderError;

/// A [`Provider`] that asks a plain text web service for the callers address.
///
/// The HTTP client is supplied by the caller and only ever used for sending requests.
/// Timeouts, TLS and proxy settings are taken from the client as-is.
/// Lookups are not cached and failed requests are not retried.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    service: Service,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider for [`Service::Icanhazip`] that resolves over IPv4
    pub fn new(client: Client) -> HttpProvider {
        HttpProvider::for_service(Service::Icanhazip, client)
    }

    pub fn for_service(service: Service, client: Client) -> HttpProvider {
        HttpProvider {
            client,
            service,
            endpoint: service.url(AddressFamily::IPv4).to_string(),
        }
    }

    #[cfg(test)]
    fn with_endpoint(client: Client, endpoint: String) -> HttpProvider {
        HttpProvider {
            client,
            service: Service::Icanhazip,
            endpoint,
        }
    }

    /// The URL that will be queried by the next lookup
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn address_family(&self) -> AddressFamily {
        if self.endpoint == self.service.url(AddressFamily::IPv6) {
            AddressFamily::IPv6
        } else {
            AddressFamily::IPv4
        }
    }
}

#[async_trait]
impl Provider for HttpProvider {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn get_ip(&self) -> Result<String, ProviderError> {
        let label = self.service.label();
        let res = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ProviderError::request(label, &e))?;
        let status = res.status();
        if !status.is_success() {
            debug!(msg = "IP service responded with error status", status = status.as_u16());
            return Err(ProviderError::status(label, status));
        }
        // no charset sniffing, the body is handed back as received
        let body = res.bytes().await.map_err(|e| ProviderError::read(label, &e))?;
        let ip = String::from_utf8(body.to_vec()).map_err(|e| ProviderError::Read {
            label,
            msg: format!("response body is not valid UTF-8: {}", e),
        })?;
        debug!(msg = "Resolved address through IP service", ip = %ip);
        Ok(ip)
    }

    fn force_ipv6(&mut self) {
        self.endpoint = self.service.url(AddressFamily::IPv6).to_string();
    }
}
