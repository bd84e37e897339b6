use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use YTAnalytics::config;
use YTAnalytics::{relay, telemetry};
use YTAnalytics::yt::{YtClient, channels, search, videos};

#[derive(Parser, Debug)]
#[command(about = "Run relay lookups from the terminal")]
struct Args {
    /// YouTube Data API key (falls back to the same sources as the server)
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Data API root
    #[arg(long, env = "YOUTUBE_API_BASE_URL", default_value = YTAnalytics::yt::DEFAULT_BASE_URL)]
    upstream_base_url: String,

    /// Print the upstream request but skip the API call
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    lookup: Lookup,
}

#[derive(Subcommand, Debug)]
enum Lookup {
    /// Search channels by free text
    Search { query: String },
    /// Statistics and details for one channel
    Channel { channel_id: String },
    /// One page of a channel's videos, newest first
    Videos {
        channel_id: String,
        #[arg(long)]
        page_token: Option<String>,
    },
    /// Statistics and details for one video
    Video { video_id: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_request(client: &YtClient, lookup: &Lookup) {
    let (endpoint, params) = match lookup {
        Lookup::Search { query } => ("search", search::channel_search_params(query)),
        Lookup::Channel { channel_id } => ("channels", channels::channel_params(channel_id)),
        Lookup::Videos {
            channel_id,
            page_token,
        } => (
            "search",
            search::channel_videos_params(channel_id, page_token.as_deref()),
        ),
        Lookup::Video { video_id } => ("videos", videos::single_video_params(video_id)),
    };
    println!("GET {}", client.endpoint_url(endpoint, &params));
    if matches!(lookup, Lookup::Videos { .. }) {
        println!("then GET {} with the returned ids", client.endpoint_url("videos", &[]));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing("warn", false)?;

    if args.dry_run {
        let client = YtClient::with_base_url("", &args.upstream_base_url);
        print_request(&client, &args.lookup);
        return Ok(());
    }

    let api_key = config::resolve_api_key(args.api_key.as_deref())?;
    let client = YtClient::with_base_url(&api_key, &args.upstream_base_url);

    match &args.lookup {
        Lookup::Search { query } => print_json(&relay::search_channels(&client, query).await?),
        Lookup::Channel { channel_id } => {
            print_json(&relay::channel_statistics(&client, channel_id).await?)
        }
        Lookup::Videos {
            channel_id,
            page_token,
        } => print_json(&relay::channel_videos(&client, channel_id, page_token.as_deref()).await?),
        Lookup::Video { video_id } => {
            print_json(&relay::video_statistics(&client, video_id).await?)
        }
    }
}
