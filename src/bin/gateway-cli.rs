use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the service gateway", long_about = None)]
struct Cli {
    /// Public API base URL.
    #[arg(short, long, default_value = "http://localhost:8080")]
    public_url: String,

    /// Internal API base URL.
    #[arg(short, long, default_value = "http://localhost:9090")]
    internal_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered instances and their liveness
    Status,
    /// Fetch /data through the gateway
    Data,
    /// Register a backend address
    Register { address: String },
    /// Send a heartbeat for a backend address
    Heartbeat { address: String },
    /// Check the gateway's own health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/status", cli.public_url)).send().await?,
        Commands::Data => client.get(format!("{}/data", cli.public_url)).send().await?,
        Commands::Register { address } => {
            client
                .post(format!("{}/register", cli.internal_url))
                .body(address)
                .send()
                .await?
        }
        Commands::Heartbeat { address } => {
            client
                .post(format!("{}/heartbeat", cli.internal_url))
                .body(address)
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/healthz", cli.internal_url)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if text.is_empty() => println!("{}", status),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
