//! Demo ECU.
//!
//! Periodically samples simulated vehicle sensors and sends each reading to
//! the gateway as a fixed-layout record, one independent task per sensor
//! kind.
//!
//! Usage: `ecu [local-address] [gateway-address]`

use sensorlink::{link::udp, producer, sensor::SensorKind, Result};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOCAL: &str = "127.0.0.1:30501";
const DEFAULT_GATEWAY: &str = "127.0.0.1:30509";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let local = args.next().unwrap_or_else(|| DEFAULT_LOCAL.into()).parse()?;
    let gateway = args
        .next()
        .unwrap_or_else(|| DEFAULT_GATEWAY.into())
        .parse()?;

    let sender = udp::connect(local, gateway).await?;
    tracing::info!(%local, %gateway, "ecu started");

    let token = CancellationToken::new();
    let config = producer::Config::default();
    let mut tasks = tokio::task::JoinSet::new();
    for kind in SensorKind::ALL {
        tasks.spawn(producer::run(
            kind,
            config.period(kind),
            sender.clone(),
            token.child_token(),
        ));
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    token.cancel();
    while tasks.join_next().await.is_some() {}
    Ok(())
}
