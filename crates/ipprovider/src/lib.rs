//! Resolve the public IP address of this machine through external "what is my IP" services.
//!
//! Every backend implements the [`Provider`] trait.
//! The only backend right now is [`HttpProvider`], which queries one of the plain text services listed in [`Service`]:
//!
//! ```no_run
//! # async fn run() -> Result<(), ipprovider::ProviderError> {
//! use ipprovider::{HttpProvider, Provider};
//!
//! let mut provider = HttpProvider::new(reqwest::Client::new());
//! provider.force_ipv6();
//! let ip = provider.get_ip().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod provider;

pub use error::ProviderError;
pub use provider::{AddressFamily, HttpProvider, Provider, Service};
