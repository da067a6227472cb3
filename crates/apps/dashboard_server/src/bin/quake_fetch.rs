use std::env;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_FDSN_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

#[derive(Parser, Debug)]
#[command(author, version, about = "USGS earthquake catalog downloader")]
struct Args {
    /// FDSN event query endpoint (default: USGS)
    #[arg(long)]
    fdsn_url: Option<String>,

    /// First day to include (YYYY-MM-DD); defaults to 30 days before --end
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Minimum magnitude to request
    #[arg(long, default_value_t = 4.5)]
    min_magnitude: f64,

    /// Directory for the raw CSV export
    #[arg(long, default_value = "data/raw")]
    out: String,

    /// Also write a cleaned copy (rows without lat/lon/mag dropped)
    #[arg(long)]
    clean: bool,

    /// Cleaned CSV path, used with --clean
    #[arg(long, default_value = "data/cleaned/earthquakes.csv")]
    cleaned: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let fdsn_url = args.fdsn_url.unwrap_or_else(|| {
        env::var("FDSN_URL").unwrap_or_else(|_| DEFAULT_FDSN_URL.to_string())
    });

    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    let start = args.start.unwrap_or(end - Duration::days(30));
    if start > end {
        return Err(format!("--start {start} is after --end {end}").into());
    }
    if !args.min_magnitude.is_finite() {
        return Err("--min-magnitude must be a number".into());
    }

    let out_dir = PathBuf::from(&args.out);
    tokio::fs::create_dir_all(&out_dir).await?;
    let raw_path = out_dir.join(raw_file_name(start, end, args.min_magnitude));

    let client = Client::new();
    let query = query_params(start, end, args.min_magnitude);
    info!("querying {fdsn_url} for M{} events {start}..{end}", args.min_magnitude);
    download_csv(&client, &fdsn_url, &query, &raw_path).await?;
    info!("wrote {}", raw_path.display());

    if args.clean {
        let report = formats::clean_earthquake_file(&raw_path, &args.cleaned)?;
        info!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            rows_dropped = report.rows_dropped,
            "cleaned catalog written to {}",
            args.cleaned
        );
    }

    Ok(())
}

fn raw_file_name(start: NaiveDate, end: NaiveDate, min_magnitude: f64) -> String {
    format!("earthquakes_{start}_{end}_m{min_magnitude}.csv")
}

fn query_params(
    start: NaiveDate,
    end: NaiveDate,
    min_magnitude: f64,
) -> Vec<(&'static str, String)> {
    // FDSN endtime is exclusive at midnight; ask for the day after to include `end`.
    let end_exclusive = end + Duration::days(1);
    vec![
        ("format", "csv".to_string()),
        ("starttime", start.to_string()),
        ("endtime", end_exclusive.to_string()),
        ("minmagnitude", min_magnitude.to_string()),
        ("orderby", "time".to_string()),
    ]
}

async fn download_csv(
    client: &Client,
    url: &str,
    query: &[(&'static str, String)],
    out_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let resp = client.get(url).query(query).send().await?;
    if !resp.status().is_success() {
        error!("download failed: {url} -> {}", resp.status());
        return Err("download failed".into());
    }

    let mut file = tokio::fs::File::create(out_path).await?;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}
