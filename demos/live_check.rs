//! Read-only smoke test against the live exchange.
//!
//! ```text
//! REVOLUTX_API_KEY=... REVOLUTX_PRIVATE_KEY=... RUST_LOG=revolutx=debug \
//!     cargo run --example live_check
//! ```

use revolutx::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("revolutx=info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let client = RevolutXClient::from_config(&config)?;

    println!("Revolut X live check against {}", client.base_url());
    println!("Public key: {}", hex::encode(client.credentials().verifying_key().as_bytes()));

    report("currency pairs", client.get_currency_pairs().await);
    report("balances", client.get_balances().await);
    report("active orders", client.get_active_orders().await);
    report(
        "candles BTC-EUR",
        client
            .get_public_candles(&CandlesParams::new("BTC-EUR", "GRANULARITY_ONE_HOUR"))
            .await,
    );

    Ok(())
}

fn report(label: &str, outcome: Outcome) {
    match outcome {
        Ok(value) => {
            let text = value.to_string();
            let preview: String = text.chars().take(200).collect();
            println!("[ok]   {}: {}", label, preview);
        }
        Err(e) => {
            println!("[fail] {}: {}", label, e);
            if let Some(raw) = e.raw_body() {
                println!("       raw body: {}", raw);
            }
        }
    }
}
