use cipherkit::keys::shared_random;
use cipherkit::{Aes, Blowfish, Config, KeyGenerator, Rsa};
use tracing_subscriber::EnvFilter;

mod usage;

use usage::{aes_usage, blowfish_usage, rsa_usage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // One random source for the whole process
    let keys = KeyGenerator::new(shared_random());
    let aes = Aes::new(keys.clone());
    let rsa = Rsa::with_max_concurrency(config.rsa.max_concurrency);

    let mode = std::env::args().nth(1).unwrap_or_else(|| "all".to_string());
    match mode.as_str() {
        "aes" => aes_usage(&aes, &keys, config.aes.key_size).await?,
        "blowfish" => blowfish_usage(&Blowfish, &keys, config.blowfish.key_size)?,
        "rsa" => rsa_usage(&rsa, config.rsa.key_size).await?,
        "all" => {
            aes_usage(&aes, &keys, config.aes.key_size).await?;
            blowfish_usage(&Blowfish, &keys, config.blowfish.key_size)?;
            rsa_usage(&rsa, config.rsa.key_size).await?;
        }
        other => {
            eprintln!("unknown mode {other:?}\n\nUsage: cipherkit [aes|blowfish|rsa|all]");
            std::process::exit(2);
        }
    }

    Ok(())
}
