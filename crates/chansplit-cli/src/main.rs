use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use chansplit_core::config::Config;
use chansplit_core::splitter::{SectionReport, SplitReport, Splitter};
use chansplit_core::Result;

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let base_dir = resolve_base_dir(cli.base_dir);
    let output = Output {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Some(Commands::Split {
            data_dir,
            no_filter,
            others,
            keep_stale,
        }) => handle_split(
            &base_dir,
            data_dir.as_deref(),
            no_filter,
            others,
            keep_stale,
            &output,
        ),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        // Bare invocation runs a split with configured values
        None => handle_split(&base_dir, None, false, false, false, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

struct Output {
    verbose: bool,
    quiet: bool,
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("CHANSPLIT_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".chansplit"))
        .unwrap_or_else(|| PathBuf::from(".chansplit"))
}

#[allow(clippy::fn_params_excessive_bools)]
fn handle_split(
    base_dir: &Path,
    data_dir: Option<&Path>,
    no_filter: bool,
    others: bool,
    keep_stale: bool,
    output: &Output,
) -> Result<()> {
    let config = Config::load(base_dir)?;

    let data_dir = data_dir.unwrap_or(&config.split.data_dir);
    let mut options = config.to_split_options();
    if no_filter {
        options.filter_public = false;
    }
    if others {
        options.include_others = true;
    }
    if keep_stale {
        options.clean_output = false;
    }

    let report = Splitter::new(data_dir, options).run()?;
    print_report(&report, output);
    Ok(())
}

fn print_report(report: &SplitReport, output: &Output) {
    if output.quiet {
        return;
    }

    println!(
        "{} {}",
        "Backup:".cyan().bold(),
        report.backup_file.display()
    );
    print_section("categories", &report.categories, output);
    if let Some(others) = &report.others {
        print_section("other channels", others, output);
    }
}

fn print_section(name: &str, section: &SectionReport, output: &Output) {
    println!(
        "  {}: {} written, {} skipped",
        name.cyan(),
        section.written.len().to_string().green().bold(),
        section.skipped.to_string().yellow()
    );

    if output.verbose {
        for path in &section.written {
            println!("    {}", path.display());
        }
    }
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Config:".green().bold(), path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path(base_dir).display());
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => println!("{}", value),
                None => {
                    return Err(chansplit_core::ChansplitError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set".green().bold(), key.cyan(), value);
        }
    }
    Ok(())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "chansplit", &mut io::stdout());
}
