use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ipprovider::{HttpProvider, Provider, Service};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Web service to ask for the public IP address
    #[arg(
        value_enum,
        short,
        long,
        env = "IPPROVIDER_SERVICE",
        default_value_t = ServiceArg::Icanhazip
    )]
    service: ServiceArg,
    /// Resolve the IPv6 address instead of the IPv4 one
    #[arg(short = '6', long, env = "IPPROVIDER_IPV6", default_value_t = false)]
    ipv6: bool,
    /// Request timeout, in seconds
    #[arg(short, long, env = "IPPROVIDER_TIMEOUT", default_value_t = 10)]
    timeout: u64,
    /// Keep running and look up the address every INTERVAL seconds instead of printing it once
    #[arg(
        short,
        long,
        env = "IPPROVIDER_INTERVAL",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    interval: Option<u32>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ServiceArg {
    Icanhazip,
    Ipify,
}
impl From<ServiceArg> for Service {
    fn from(value: ServiceArg) -> Self {
        match value {
            ServiceArg::Icanhazip => Service::Icanhazip,
            ServiceArg::Ipify => Service::Ipify,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout is reserved for the address itself
    let fmt_layer = fmt::layer()
        .json()
        .with_level(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(true)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .context("failed to create HTTP client")?;
    let provider = build_provider(&args, client);
    info!(
        msg = "Created IP provider",
        service = provider.service().label(),
        family = %provider.address_family()
    );

    match args.interval {
        None => {
            let ip = provider.get_ip().await?;
            println!("{}", ip.trim());
            Ok(())
        }
        Some(interval) => {
            watch(&provider, Duration::from_secs(interval.into())).await;
            Ok(())
        }
    }
}

fn build_provider(args: &Args, client: Client) -> HttpProvider {
    let mut provider = HttpProvider::for_service(args.service.into(), client);
    if args.ipv6 {
        provider.force_ipv6();
    }
    provider
}

async fn watch(provider: &dyn Provider, interval: Duration) {
    let mut current: Option<String> = None;
    loop {
        match provider.get_ip().await {
            Ok(ip) => {
                let ip = ip.trim().to_string();
                if current.as_deref() != Some(ip.as_str()) {
                    info!(msg = "Public IP address changed", previous = ?current, ip = %ip);
                    current = Some(ip);
                } else {
                    info!(msg = "Public IP address unchanged", ip = %ip);
                }
            }
            Err(e) if e.status_code() == Some(StatusCode::TOO_MANY_REQUESTS.as_u16()) => {
                warn!(msg = "Rate limited by IP service, trying again next interval", err = %e);
            }
            Err(e) => {
                error!(msg = "Failed to resolve public IP address", err = %e);
            }
        };
        tokio::time::sleep(interval).await;
    }
}
