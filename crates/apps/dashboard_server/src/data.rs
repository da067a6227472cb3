use std::error::Error;

use formats::FaultLines;
use reqwest::Client;
use tracing::info;

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetches plate-boundary GeoJSON from a URL, or reads it from a local path.
pub async fn load_faults(client: &Client, source: &str) -> Result<FaultLines, Box<dyn Error>> {
    let payload = if is_remote(source) {
        info!("fetching tectonic boundaries from {source}");
        let resp = client.get(source).send().await?;
        if !resp.status().is_success() {
            return Err(format!("tectonic fetch failed: {source} -> {}", resp.status()).into());
        }
        resp.text().await?
    } else {
        tokio::fs::read_to_string(source).await?
    };
    Ok(FaultLines::from_geojson_str(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::{is_remote, load_faults};
    use std::io::Write;

    #[test]
    fn classifies_sources() {
        assert!(is_remote("https://example.org/plates.json"));
        assert!(!is_remote("data/plates.json"));
    }

    #[tokio::test]
    async fn reads_local_geojson() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","properties":{{"Name":"AF-AN"}},"geometry":{{"type":"LineString","coordinates":[[-0.4,-54.8],[0.1,-54.7]]}}}}]}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();
        let faults = load_faults(&reqwest::Client::new(), &path).await.unwrap();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults.vertex_count(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let result = load_faults(&reqwest::Client::new(), "/nonexistent/plates.json").await;
        assert!(result.is_err());
    }
}
