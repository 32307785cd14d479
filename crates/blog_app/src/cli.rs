use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blog", version, about = "Static blog built from a Notion database")]
pub struct Cli {
    /// Site configuration (RON). Missing file means defaults.
    #[arg(long, global = true, default_value = "blog.ron")]
    pub config: PathBuf,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pull posts from Notion into the posts document.
    Fetch {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Render the static site from the posts document.
    Build {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        #[arg(long, default_value = "site")]
        out_dir: PathBuf,
    },
    /// Print the post listing, newest first.
    List {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Print one post rendered as HTML.
    Show {
        id: String,
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Search published posts by title, body or tag.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_with_defaults() {
        let cli = Cli::parse_from(["blog", "build"]);
        assert_eq!(cli.config, PathBuf::from("blog.ron"));
        match cli.command {
            Command::Build { data_dir, out_dir } => {
                assert_eq!(data_dir, PathBuf::from("data"));
                assert_eq!(out_dir, PathBuf::from("site"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["blog", "show", "abc", "-v", "--config", "x.ron"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("x.ron"));
        assert!(matches!(cli.command, Command::Show { ref id, .. } if id == "abc"));
    }
}
