//! Command-line options shared by the demo binaries.
use clap::Args;

use crate::config::{AppConfig, LoggingConfig};

#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Present frames as fast as possible
    #[arg(long = "no-vsync", default_value = "false")]
    pub no_vsync: bool,

    /// Hide the FPS overlay
    #[arg(long = "hide-stats", default_value = "false")]
    pub hide_stats: bool,

    /// Log filter, e.g. `debug` or `vignette=trace`. Falls back to RUST_LOG.
    #[arg(long = "log")]
    pub log: Option<String>,
}

impl WindowArgs {
    pub fn app_config(&self, title: &str) -> AppConfig {
        AppConfig::new(title)
            .with_size(self.width, self.height)
            .with_vsync(!self.no_vsync)
            .with_stats(!self.hide_stats)
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig::with_filter(self.log.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        window: WindowArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["demo"]);
        let config = cli.window.app_config("demo");
        assert_eq!((config.width, config.height), (1280, 800));
        assert!(config.vsync);
        assert!(config.show_stats);
        assert!(cli.window.logging().env_filter.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = TestCli::parse_from([
            "demo",
            "--width",
            "640",
            "--height",
            "480",
            "--no-vsync",
            "--hide-stats",
            "--log",
            "debug",
        ]);
        let config = cli.window.app_config("demo");
        assert_eq!((config.width, config.height), (640, 480));
        assert!(!config.vsync);
        assert!(!config.show_stats);
        assert_eq!(cli.window.logging().env_filter.as_deref(), Some("debug"));
    }
}
