use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pardaz_api::{Animation, Container, PageId, Padding, WrapperPatch};
use pardaz_kernel::{ConfigOverrides, SiteConfig};

#[derive(Parser, Debug)]
#[command(name = "pardaz", version, about = "Manage the page layouts of the site")]
pub struct Args {
    /// Database file (overrides PARDAZ_DB and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep changes in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Increase log verbosity (-v, -vv, -vvv) when RUST_LOG is unset
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the pages and their section counts
    Pages,

    /// Show the sections of a page
    List {
        page: String,
        /// Print the raw section list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or hide a section
    Toggle { page: PageId, id: String },

    /// Append a new content block
    Add {
        page: PageId,
        /// Initial markup of the block
        #[arg(long, default_value = "")]
        content: String,
    },

    /// Delete a section
    Remove { page: PageId, id: String },

    /// Move a section to a new position
    Move {
        page: PageId,
        id: String,
        index: usize,
    },

    /// Set one prop of a section (VALUE is JSON, or a plain string)
    SetProp {
        page: PageId,
        id: String,
        key: String,
        value: String,
    },

    /// Change the wrapper of a section
    Wrapper {
        page: PageId,
        id: String,
        #[arg(long)]
        container: Option<Container>,
        #[arg(long)]
        padding: Option<Padding>,
        #[arg(long)]
        animation: Option<Animation>,
        /// Background token, e.g. bg-secondary
        #[arg(long, conflicts_with = "clear_bg")]
        bg: Option<String>,
        /// Remove the background token
        #[arg(long)]
        clear_bg: bool,
    },

    /// Render a page
    Render {
        page: String,
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },

    /// Restore the default layout of one page, or of every page
    Reset { page: Option<PageId> },

    /// Print every layout as JSON
    Export,

    /// Replace layouts from a JSON file written by `export`
    Import { file: PathBuf },

    /// Print the resolved configuration
    Config,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

impl Args {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Flags layered over the config file and environment.
    pub fn site_config(&self) -> anyhow::Result<SiteConfig> {
        let mut config = SiteConfig::load(self.config.as_deref())?;
        config.apply(&self.overrides());
        Ok(config)
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            db_path: self.db.clone(),
            persist: self.ephemeral.then_some(false),
            event_capacity: None,
        }
    }
}

impl Command {
    /// Whether the command changes any layout.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Toggle { .. }
                | Command::Add { .. }
                | Command::Remove { .. }
                | Command::Move { .. }
                | Command::SetProp { .. }
                | Command::Wrapper { .. }
                | Command::Reset { .. }
                | Command::Import { .. }
        )
    }

    /// The wrapper change requested by a `wrapper` command.
    pub fn wrapper_patch(&self) -> Option<WrapperPatch> {
        match self {
            Command::Wrapper {
                container,
                padding,
                animation,
                bg,
                clear_bg,
                ..
            } => Some(WrapperPatch {
                container: *container,
                padding: *padding,
                animation: *animation,
                bg_color: if *clear_bg {
                    Some(None)
                } else {
                    bg.clone().map(Some)
                },
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_toggle() {
        let args = parse(&["pardaz", "toggle", "home", "h5"]);
        assert_eq!(
            args.command,
            Command::Toggle {
                page: PageId::Home,
                id: "h5".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_page_is_rejected() {
        assert!(Args::try_parse_from(["pardaz", "toggle", "careers", "x"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["pardaz", "render", "blog", "--ephemeral", "-vv"]);
        assert!(args.ephemeral);
        assert_eq!(args.verbose, 2);
        assert_eq!(
            args.command,
            Command::Render {
                page: "blog".to_string(),
                format: Format::Html
            }
        );
    }

    #[test]
    fn test_wrapper_patch() {
        let args = parse(&[
            "pardaz", "wrapper", "home", "h2", "--padding", "sm", "--animation", "zoom",
        ]);
        let patch = args.command.wrapper_patch().unwrap();
        assert_eq!(patch.padding, Some(Padding::Sm));
        assert_eq!(patch.animation, Some(Animation::Zoom));
        assert_eq!(patch.container, None);
        assert_eq!(patch.bg_color, None);

        let args = parse(&["pardaz", "wrapper", "home", "h2", "--clear-bg"]);
        assert_eq!(args.command.wrapper_patch().unwrap().bg_color, Some(None));

        assert!(Args::try_parse_from([
            "pardaz", "wrapper", "home", "h2", "--bg", "x", "--clear-bg"
        ])
        .is_err());
        assert!(Args::try_parse_from(["pardaz", "wrapper", "home", "h2", "--padding", "xl"]).is_err());
    }

    #[test]
    fn test_mutating_commands() {
        assert!(parse(&["pardaz", "toggle", "home", "h5"]).command.mutates());
        assert!(parse(&["pardaz", "reset"]).command.mutates());
        assert!(!parse(&["pardaz", "render", "home"]).command.mutates());
        assert!(!parse(&["pardaz", "export"]).command.mutates());
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&["pardaz", "--db", "/tmp/x.db", "--ephemeral", "pages"]);
        let overrides = args.overrides();
        assert_eq!(overrides.db_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(overrides.persist, Some(false));

        let args = parse(&["pardaz", "pages"]);
        assert_eq!(args.overrides(), ConfigOverrides::default());
    }
}
