//! Demo gateway.
//!
//! Offers the vehicle sensor service, dispatches each inbound record by its
//! method id, and logs the classified readings. Alerting conditions (high
//! speed, overheat, freezing) are logged at warn level.
//!
//! Usage: `gateway [local-address]`

use sensorlink::{consumer::Consumer, link::udp, someip, Result};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOCAL: &str = "127.0.0.1:30509";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let local = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LOCAL.into())
        .parse()?;

    let receiver = udp::offer(local).await?;
    tracing::info!(
        %local,
        service = someip::SERVICE_ID,
        instance = someip::INSTANCE_ID,
        "offering vehicle sensor service"
    );

    let mut consumer = Consumer::new();
    let token = CancellationToken::new();
    tokio::select! {
        () = consumer.run(receiver, token.child_token()) => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            token.cancel();
        }
    }
    tracing::info!(received = consumer.received(), "gateway stopped");
    Ok(())
}
