use reqwest::Client;

use super::{AddressFamily, HttpProvider};

const ICANHAZIP_URL_V4: &str = "https://ipv4.icanhazip.com";
const ICANHAZIP_URL_V6: &str = "https://ipv6.icanhazip.com";
const IPIFY_URL_V4: &str = "https://api.ipify.org";
const IPIFY_URL_V6: &str = "https://api6.ipify.org";

/// Remote "what is my IP" services that answer with the address as plain text
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    #[default]
    Icanhazip,
    Ipify,
}

impl Service {
    /// Short name of the service, used as the prefix of every error it produces
    pub fn label(&self) -> &'static str {
        match self {
            Service::Icanhazip => "icanhazip",
            Service::Ipify => "ipify",
        }
    }

    pub fn url(&self, family: AddressFamily) -> &'static str {
        match (self, family) {
            (Service::Icanhazip, AddressFamily::IPv4) => ICANHAZIP_URL_V4,
            (Service::Icanhazip, AddressFamily::IPv6) => ICANHAZIP_URL_V6,
            (Service::Ipify, AddressFamily::IPv4) => IPIFY_URL_V4,
            (Service::Ipify, AddressFamily::IPv6) => IPIFY_URL_V6,
        }
    }

    /// Create a provider for this service, see [`HttpProvider::for_service`]
    pub fn provider(self, client: Client) -> HttpProvider {
        HttpProvider::for_service(self, client)
    }
}
