use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "drctl")]
#[command(about = "Operator CLI for the DR failover controller admin API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, env = "DRCTL_API_KEY")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which site is serving, from both groups' desired capacity
    Status,
    /// Drain the primary group (manual kill switch, DNS untouched)
    Failover,
    /// Restore the primary group, drain the standby and repoint DNS
    Failback,
    /// Check that the controller is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Status => {
            client.get(format!("{}/dr/status", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Failover => post_action(&client, &cli.url, headers, "failover").await?,
        Commands::Failback => post_action(&client, &cli.url, headers, "failback").await?,
        Commands::Health => {
            client.get(format!("{}/healthz", cli.url))
                .send()
                .await?
        }
    };

    let succeeded = print_response(res).await?;
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

async fn post_action(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    draction: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    client.post(format!("{}/dr/action", url))
        .headers(headers)
        .json(&json!({ "draction": draction }))
        .send()
        .await
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        eprintln!("Error: admin API returned status {}", status);
    }
    Ok(status.is_success())
}
