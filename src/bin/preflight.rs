use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use rental_platform_api::infra::ethereum::parse_address;
use rental_platform_api::{AppConfig, ContractGateway};
use url::Url;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           RPC_URL, CONTRACT_ADDRESS\n\
         (DATABASE_URL is not needed; this checks the chain side only.)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = AppConfig::from_env();
    println!("> Preflight:");
    println!("  RPC_URL={}", config.rpc_url);
    println!("  CONTRACT_ADDRESS={}", config.contract_address);

    let url = Url::parse(config.rpc_url.trim())
        .map_err(|e| anyhow::anyhow!("RPC_URL is not a valid URL: {}", e))?;
    let contract = parse_address(&config.contract_address)
        .map_err(|e| anyhow::anyhow!("CONTRACT_ADDRESS is invalid: {}", e))?;

    let provider: RootProvider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(url);

    // Basic RPC connectivity
    let chain_id = provider.get_chain_id().await?;
    println!("  Chain id: {}", chain_id);

    // Contract deployment check
    let code = provider.get_code_at(contract).await?;
    if code.is_empty() {
        anyhow::bail!("no contract code at {} on chain {}", contract, chain_id);
    }
    println!("  Contract code present ({} bytes).", code.len());

    // Full gateway round trip
    let gateway = ContractGateway::from_config(&config);
    let count = gateway
        .property_count()
        .await
        .map_err(|e| anyhow::anyhow!("propertyCount read failed: {}", e))?;
    println!("  propertyCount() = {}", count);

    println!("> Preflight OK.");
    Ok(())
}
