//! Pipeline configuration.

use std::time::Duration;

use mblog_models::RenditionSpec;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Worker sleep between polls of an empty queue.
    pub poll_interval: Duration,
    /// Target rendition widths and naming.
    pub renditions: RenditionSpec,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            renditions: RenditionSpec::default(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let poll_interval = Duration::from_millis(
            std::env::var("PIPELINE_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500),
        );

        let renditions = std::env::var("PIPELINE_WIDTHS")
            .ok()
            .map(|s| {
                RenditionSpec::new(
                    s.split(',')
                        .filter_map(|w| w.trim().parse().ok())
                        .collect(),
                )
            })
            .filter(|spec| !spec.widths().is_empty())
            .unwrap_or_default();

        Self {
            poll_interval,
            renditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_contract() {
        let config = PipelineConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.renditions.widths(), &[400, 800, 1200]);
    }
}
