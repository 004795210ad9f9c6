//! Command-line interface for the jobfile tool.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use jobfile_codec::{Document, RenderOptions};

use crate::error::{CliError, Result};
use crate::io::{read_jobfile, write_jobfile};

/// Jobfile - check, format and merge PAS5500 stepper jobfiles.
#[derive(Parser)]
#[command(name = "jobfile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a jobfile and report whether it is complete.
    Check {
        /// Jobfile to check
        file: PathBuf,
    },

    /// Re-render a jobfile in canonical layout.
    Format {
        /// Jobfile to format
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep angle brackets around instance ids
        #[arg(long)]
        keep_delimiters: bool,
    },

    /// Merge two jobfiles; sections of BASE win on conflict.
    Merge {
        /// Jobfile whose sections take precedence
        base: PathBuf,

        /// Jobfile contributing non-conflicting sections
        incoming: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print section and image counts.
    Summary {
        /// Jobfile to summarise
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the jobfile as JSON.
    Export {
        /// Jobfile to export
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { file } => check_command(&file),
        Commands::Format {
            file,
            output,
            keep_delimiters,
        } => {
            let options = RenderOptions {
                fix_delimiter_bug: !keep_delimiters,
            };
            let document = read_jobfile(&file)?;
            emit(&document, output.as_deref(), options)
        }
        Commands::Merge {
            base,
            incoming,
            output,
        } => {
            let merged = Document::merge(&read_jobfile(&base)?, &read_jobfile(&incoming)?);
            emit(&merged, output.as_deref(), RenderOptions::default())
        }
        Commands::Summary { file, json } => {
            let summary = read_jobfile(&file)?.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{summary}");
            }
            Ok(())
        }
        Commands::Export { file } => {
            let document = read_jobfile(&file)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
    }
}

/// Execute the check command.
fn check_command(file: &Path) -> Result<()> {
    println!(
        "{} {}",
        style("Checking").bold(),
        style(file.display()).cyan()
    );

    let document = read_jobfile(file)?;
    println!("  Sections: {}", document.len());

    let dangling = document.dangling_references();
    for reference in &dangling {
        let values: Vec<String> = reference.value.iter().map(ToString::to_string).collect();
        println!(
            "  {} {}.{} = {} is not defined in {}",
            style("Warning:").yellow().bold(),
            reference.section,
            reference.element,
            values.join(" "),
            reference.defined_in
        );
    }

    if !document.is_adequately_specified()? {
        return Err(CliError::Inadequate(file.to_path_buf()));
    }

    println!();
    println!("{} {}", style("OK").green().bold(), file.display());
    Ok(())
}

/// Write a document to `output`, or print it when no output is given.
fn emit(document: &Document, output: Option<&Path>, options: RenderOptions) -> Result<()> {
    match output {
        Some(path) => {
            write_jobfile(path, document, options)?;
            println!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => println!("{}", document.render_with(&options)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["jobfile", "check", "job.txt"]);
        let Commands::Check { file } = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(file, PathBuf::from("job.txt"));
    }

    #[test]
    fn test_cli_parse_format_defaults() {
        let cli = Cli::parse_from(["jobfile", "format", "job.txt"]);
        let Commands::Format {
            output,
            keep_delimiters,
            ..
        } = cli.command
        else {
            panic!("expected format command");
        };
        assert!(output.is_none());
        assert!(!keep_delimiters);
    }

    #[test]
    fn test_cli_parse_format_with_options() {
        let cli = Cli::parse_from([
            "jobfile",
            "format",
            "job.txt",
            "-o",
            "out.txt",
            "--keep-delimiters",
        ]);
        let Commands::Format {
            output,
            keep_delimiters,
            ..
        } = cli.command
        else {
            panic!("expected format command");
        };
        assert_eq!(output, Some(PathBuf::from("out.txt")));
        assert!(keep_delimiters);
    }

    #[test]
    fn test_cli_parse_merge() {
        let cli = Cli::parse_from(["jobfile", "merge", "a.txt", "b.txt", "--output", "c.txt"]);
        let Commands::Merge {
            base,
            incoming,
            output,
        } = cli.command
        else {
            panic!("expected merge command");
        };
        assert_eq!(base, PathBuf::from("a.txt"));
        assert_eq!(incoming, PathBuf::from("b.txt"));
        assert_eq!(output, Some(PathBuf::from("c.txt")));
    }

    #[test]
    fn test_cli_parse_summary_json() {
        let cli = Cli::parse_from(["jobfile", "summary", "job.txt", "--json"]);
        assert!(matches!(cli.command, Commands::Summary { json: true, .. }));
    }

    #[test]
    fn test_cli_merge_requires_two_files() {
        assert!(Cli::try_parse_from(["jobfile", "merge", "a.txt"]).is_err());
    }
}
