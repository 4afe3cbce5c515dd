use std::path::PathBuf;

use clap::Parser;

use crate::app::omd::DEFAULT_API_URL;
use crate::app::watched;

/// Look up movies on OMDb and keep a list of the ones you've watched.
#[derive(Debug, Parser)]
#[command(name = "filmbuff", version, about)]
pub struct Cli {
    /// Movie title to look up on startup
    pub title: Option<String>,

    /// OMDb API key (get one at http://www.omdbapi.com/apikey.aspx)
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OMDb endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Where the watched list is stored
    #[arg(long, value_name = "PATH")]
    pub watched_file: Option<PathBuf>,

    /// Never download or draw poster images
    #[arg(long)]
    pub no_posters: bool,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub watched_path: PathBuf,
    pub posters: bool,
    pub initial_title: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            api_key: self.api_key.filter(|key| !key.trim().is_empty()),
            api_url: self.api_url,
            watched_path: self.watched_file.unwrap_or_else(watched::default_path),
            posters: !self.no_posters,
            initial_title: self.title.filter(|title| !title.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_resolve_into_config() {
        let cli = Cli::try_parse_from([
            "filmbuff",
            "--api-key",
            "k3y",
            "--watched-file",
            "/tmp/w.json",
            "--no-posters",
            "Blade Runner",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(config.api_key.as_deref(), Some("k3y"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.watched_path, PathBuf::from("/tmp/w.json"));
        assert!(!config.posters);
        assert_eq!(config.initial_title.as_deref(), Some("Blade Runner"));
    }

    #[test]
    fn blank_values_are_dropped() {
        let cli = Cli::try_parse_from(["filmbuff", "--api-key", " ", "  "]).unwrap();
        let config = cli.into_config();
        assert!(config.api_key.is_none());
        assert!(config.initial_title.is_none());
        assert!(config.posters);
    }
}
