use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use tile_gateway::http::response::error_body;
use tile_gateway::routing::{TileMatcher, TileRouter};
use tile_gateway::tile::{CoordinateValidator, DEFAULT_MAX_ZOOM};

#[derive(Parser)]
#[command(name = "tilectl")]
#[command(about = "Management CLI for the tile gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "TILE_GATEWAY_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Status,
    /// Show the gateway's service description
    Info,
    /// Validate and route a tile locally, without contacting any server
    Route {
        z: String,
        x: String,
        y: String,
        /// Tile extension (pbf, png, jpg, jpeg)
        ext: String,
        #[arg(long, default_value_t = DEFAULT_MAX_ZOOM)]
        max_zoom: u8,
        #[arg(long, default_value = "v3")]
        vector_source: String,
        #[arg(long, default_value = "basic")]
        style: String,
        #[arg(long, default_value_t = 86_400)]
        cache_ttl: u64,
    },
    /// Fetch a tile through the gateway and print status and headers
    Fetch {
        z: String,
        x: String,
        y: String,
        ext: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/healthz", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Info => {
            let res = client.get(format!("{}/", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Route {
            z,
            x,
            y,
            ext,
            max_zoom,
            vector_source,
            style,
            cache_ttl,
        } => {
            let matcher = TileMatcher::new(CoordinateValidator::new(max_zoom));
            let router = TileRouter::new(vector_source, style, cache_ttl, "*");
            let file = format!("{}.{}", y, ext);

            let output = match matcher.match_segments(&z, &x, &file) {
                Some(Ok(tile)) => json!({
                    "tile": tile.coordinate,
                    "format": tile.format,
                    "route": router.route(&tile.coordinate, tile.format),
                }),
                Some(Err(e)) => json!({
                    "status": e.http_status_code(),
                    "body": error_body(&e),
                }),
                None => json!({ "status": 404, "body": { "error": "Not found" } }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Fetch { z, x, y, ext } => {
            let res = client
                .get(format!("{}/tiles/{}/{}/{}.{}", base, z, x, y, ext))
                .send()
                .await?;

            println!("{}", res.status());
            for (name, value) in res.headers() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
            let body = res.bytes().await?;
            println!("\n{} bytes", body.len());
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
