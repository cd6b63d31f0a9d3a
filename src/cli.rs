//! Command line flags. Every flag overrides the matching config file value.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Browse a public photo feed in the terminal")]
pub struct Cli {
    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the feed endpoint URL
    #[arg(long, value_name = "URL")]
    pub feed_url: Option<String>,

    /// Override the poll interval in seconds
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Render placeholders instead of downloading thumbnails
    #[arg(long)]
    pub no_thumbnails: bool,

    /// Override the log level or filter directive (RUST_LOG still wins)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.feed_url {
            config.feed.url = url.clone();
        }
        if let Some(interval) = self.interval {
            config.feed.poll_interval_seconds = interval;
        }
        if self.no_thumbnails {
            config.thumbnails.enabled = false;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "photofeed",
            "--feed-url",
            "http://127.0.0.1:9/feed",
            "--interval",
            "5",
            "--no-thumbnails",
            "--log-level",
            "debug",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.feed.url, "http://127.0.0.1:9/feed");
        assert_eq!(config.feed.poll_interval_seconds, 5);
        assert!(!config.thumbnails.enabled);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::parse_from(["photofeed"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
