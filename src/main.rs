use anyhow::Result;
use site_lang::cli::Command;
use site_lang::config::Config;
use site_lang::storage::FileStore;
use tracing::debug;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_lang=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let store = FileStore::new(&config.store_dir, &config.origin);
    debug!("Using preference store {}", store.path().display());

    let output = command.run(store, &config)?;
    println!("{}", output);
    Ok(())
}
