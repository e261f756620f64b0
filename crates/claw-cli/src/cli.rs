//! CLI argument and command definitions.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "claw", version, about = "Agent configuration wizard for the agent controller")]
pub struct Cli {
    /// Controller base URL (defaults to the configured one).
    #[arg(long, env = "CLAW_URL", global = true)]
    pub url: Option<String>,

    /// API key sent with every request.
    #[arg(long, env = "CLAW_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new agent interactively.
    New,

    /// Create the orchestrator agent from its template.
    Init,

    /// Generate and create an agent without the interactive wizard.
    Create {
        /// What the agent should do.
        #[arg(short, long, required_unless_present = "example", conflicts_with = "example")]
        description: Option<String>,

        /// Use a built-in example description (Backend Dev, Sales Agent,
        /// Researcher).
        #[arg(long)]
        example: Option<String>,

        /// Override the generated agent ID.
        #[arg(long)]
        id: Option<String>,

        /// Override the generated name.
        #[arg(long)]
        name: Option<String>,

        /// Override the generated emoji.
        #[arg(long)]
        emoji: Option<String>,

        /// Model ID from the catalog.
        #[arg(long)]
        model: Option<String>,

        /// Print the generated draft without creating the agent.
        #[arg(long)]
        dry_run: bool,

        /// Print the draft as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the models agents can be assigned.
    Models,

    /// Store an API key in the config file.
    Login {
        /// The key to store. Falls back to --api-key.
        key: Option<String>,
    },
}

impl Commands {
    /// Whether the command takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::New | Self::Init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "claw",
            "create",
            "--description",
            "A researcher",
            "--id",
            "res",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create {
                description,
                id,
                dry_run,
                json,
                ..
            }) => {
                assert_eq!(description.as_deref(), Some("A researcher"));
                assert_eq!(id.as_deref(), Some("res"));
                assert!(dry_run);
                assert!(!json);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_create_needs_description_or_example() {
        assert!(Cli::try_parse_from(["claw", "create"]).is_err());
        assert!(Cli::try_parse_from([
            "claw",
            "create",
            "--description",
            "x",
            "--example",
            "Researcher",
        ])
        .is_err());

        let cli = Cli::try_parse_from(["claw", "create", "--example", "Researcher"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Create { description: None, example: Some(ref label), .. })
                if label == "Researcher"
        ));
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["claw", "--url", "http://controller:9000"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.url.as_deref(), Some("http://controller:9000"));
    }

    #[test]
    fn test_login_accepts_global_key() {
        let cli = Cli::try_parse_from(["claw", "login", "--api-key", "secret"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Login { key: None })));
        assert_eq!(cli.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_interactive_commands() {
        assert!(Commands::New.is_interactive());
        assert!(Commands::Init.is_interactive());
        assert!(!Commands::Models.is_interactive());
    }
}
