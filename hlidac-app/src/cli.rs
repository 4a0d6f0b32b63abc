use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

/// Watch court cases published in the InfoSoud registry.
#[derive(Debug, Parser)]
#[command(name = "hlidac", version, about)]
pub struct Cli {
    /// Configuration file. Without it `hlidac.yaml` is read when present.
    #[arg(long, global = true, env = "HLIDAC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a case page, show what was found and start tracking it.
    Add {
        /// Case page URL (search result for one case reference).
        url: Url,
        /// Save without asking for a second run.
        #[arg(long)]
        yes: bool,
    },
    /// Print a parsed case without saving it.
    Show {
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        url: Option<Url>,
        /// Read a page saved to disk instead of fetching one.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List tracked cases.
    List {
        #[arg(long, conflicts_with = "open")]
        concluded: bool,
        #[arg(long)]
        open: bool,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        court: Option<String>,
    },
    /// Fetch every tracked case again and store its current state.
    Refresh,
}

impl Command {
    /// `--concluded` / `--open` as a tri-state filter.
    pub fn concluded_filter(concluded: bool, open: bool) -> Option<bool> {
        match (concluded, open) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_takes_a_url() {
        let cli = Cli::try_parse_from([
            "hlidac",
            "add",
            "https://infosoud.justice.cz/InfoSoud/public/search.do?type=spzn",
            "--yes",
        ])
        .unwrap();
        match cli.command {
            Command::Add { url, yes } => {
                assert_eq!(url.path(), "/InfoSoud/public/search.do");
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_rejects_garbage() {
        assert!(Cli::try_parse_from(["hlidac", "add", "not a url"]).is_err());
    }

    #[test]
    fn show_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["hlidac", "show"]).is_err());
        assert!(Cli::try_parse_from(["hlidac", "show", "https://x/", "--file", "a.html"]).is_err());
        assert!(Cli::try_parse_from(["hlidac", "show", "--file", "a.html"]).is_ok());
    }

    #[test]
    fn list_flags() {
        assert!(Cli::try_parse_from(["hlidac", "list", "--concluded", "--open"]).is_err());
        let cli =
            Cli::try_parse_from(["hlidac", "--config", "x.yaml", "list", "--open", "--court", "OS"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        match cli.command {
            Command::List {
                concluded,
                open,
                court,
                ..
            } => {
                assert_eq!(Command::concluded_filter(concluded, open), Some(false));
                assert_eq!(court.as_deref(), Some("OS"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
