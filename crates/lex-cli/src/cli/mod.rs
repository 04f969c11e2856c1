use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `lex` binary.
#[derive(Debug, Parser)]
#[command(name = "lex", version, about = "Lex - petition drafting client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Server URL (overrides client.server_url)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            server: self.server.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    use super::subcommands::{AuthCommands, DocxCommands, PetitionCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["lex", "--format", "raw", "petitions", "list", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Petitions {
                action: PetitionCommands::List(_)
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["lex", "--format", "table", "auth", "status"]).is_err());
    }

    #[test]
    fn server_override_is_copied_to_flags() {
        let cli = Cli::try_parse_from(["lex", "--server", "http://lex.local:8080", "auth", "status"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
        assert_eq!(cli.global_flags().server.as_deref(), Some("http://lex.local:8080"));
    }

    #[test]
    fn generate_takes_file_and_no_wait() {
        let cli = Cli::try_parse_from(["lex", "generate", "--file", "input.json", "--no-wait"])
            .expect("cli should parse");
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.file, PathBuf::from("input.json"));
        assert!(args.no_wait);

        assert!(Cli::try_parse_from(["lex", "generate"]).is_err());
    }

    #[test]
    fn docx_inspect_takes_a_path() {
        let cli = Cli::try_parse_from(["lex", "docx", "inspect", "modelo.docx"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Docx {
                action: DocxCommands::Inspect(ref args)
            } if args.file == PathBuf::from("modelo.docx")
        ));
    }
}
