//! Command-line parsing and command handlers.

use crate::error::UsageError;
use crate::state::AppState;
use anyhow::Result;
use lookout_indicator::NormalizeOptions;
use lookout_selector::{Menu, Outcome, Selector};
use std::path::PathBuf;
use tracing::debug;

/// Help text, also attached to usage error reports.
pub const USAGE: &str = "\
usage: lookout [--config <path>] <command> [args...]

commands:
  menu <text...>    print the analyzer menu for the selected text as JSON
  open <menu-id>    dispatch a menu id and print the outcome as JSON
  defang <text...>  print the text with indicators defanged
  help              print this message
  version           print the version";

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Build the menu for a selection
    Menu(String),
    /// Dispatch a menu id
    Open(String),
    /// Defang text for display
    Defang(String),
    /// Print usage
    Help,
    /// Print version
    Version,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Explicit config file, instead of the XDG location
    pub config: Option<PathBuf>,
    /// What to do
    pub invocation: Invocation,
}

impl Cli {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> std::result::Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into).peekable();
        let mut config = None;

        while let Some(flag) = args.next_if(|a| a.starts_with("--")) {
            match flag.as_str() {
                "--config" => {
                    let path = args.next().ok_or(UsageError::MissingArgument {
                        command: "--config",
                        argument: "a path",
                    })?;
                    config = Some(PathBuf::from(path));
                }
                "--help" => {
                    return Ok(Self {
                        config,
                        invocation: Invocation::Help,
                    })
                }
                "--version" => {
                    return Ok(Self {
                        config,
                        invocation: Invocation::Version,
                    })
                }
                _ => return Err(UsageError::UnknownCommand(flag)),
            }
        }

        let command = args.next().ok_or(UsageError::MissingCommand)?;
        let rest: Vec<String> = args.collect();
        let invocation = match command.as_str() {
            "menu" => Invocation::Menu(joined(&rest, "menu", "selected text")?),
            "defang" => Invocation::Defang(joined(&rest, "defang", "text")?),
            "open" => match rest.as_slice() {
                [id] => Invocation::Open(id.clone()),
                _ => {
                    return Err(UsageError::MissingArgument {
                        command: "open",
                        argument: "exactly one menu id",
                    })
                }
            },
            "help" => Invocation::Help,
            "version" => Invocation::Version,
            _ => return Err(UsageError::UnknownCommand(command)),
        };

        Ok(Self { config, invocation })
    }
}

fn joined(
    rest: &[String],
    command: &'static str,
    argument: &'static str,
) -> std::result::Result<String, UsageError> {
    if rest.is_empty() {
        return Err(UsageError::MissingArgument { command, argument });
    }
    Ok(rest.join(" "))
}

/// Build the menu for `text` from the state's configuration snapshot.
pub fn menu(state: &AppState, text: &str) -> Result<Menu> {
    let options = NormalizeOptions::from(&state.config.general);
    let selector = Selector::new(&state.registry, text, &options);
    let menu = Menu::build(&selector, &state.config.searchers)?;
    debug!(items = menu.items.len(), "built menu");
    Ok(menu)
}

/// Dispatch a menu id; failures come back as a notice, never as `Err`.
pub async fn open(state: &AppState, menu_id: &str) -> Outcome {
    state
        .dispatcher()
        .run(menu_id, &state.config.searchers, &state.config.api_keys)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_joins_words() {
        let cli = Cli::parse(["menu", "evil[.]example", "and", "1.2.3.4"]).expect("parse");
        assert_eq!(cli.config, None);
        assert_eq!(
            cli.invocation,
            Invocation::Menu("evil[.]example and 1.2.3.4".to_string())
        );
    }

    #[test]
    fn test_parse_config_flag() {
        let cli = Cli::parse(["--config", "/tmp/lookout.toml", "open", "{}"]).expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lookout.toml")));
        assert_eq!(cli.invocation, Invocation::Open("{}".to_string()));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Cli::parse(Vec::<String>::new()),
            Err(UsageError::MissingCommand)
        );
        assert_eq!(
            Cli::parse(["frob"]),
            Err(UsageError::UnknownCommand("frob".to_string()))
        );
        assert!(matches!(
            Cli::parse(["open"]),
            Err(UsageError::MissingArgument { command: "open", .. })
        ));
        assert!(matches!(
            Cli::parse(["menu"]),
            Err(UsageError::MissingArgument { command: "menu", .. })
        ));
        assert!(Cli::parse(["--config"]).is_err());
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(
            Cli::parse(["help"]).expect("parse").invocation,
            Invocation::Help
        );
        assert_eq!(
            Cli::parse(["--version"]).expect("parse").invocation,
            Invocation::Version
        );
    }
}
