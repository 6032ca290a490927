use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use snap::cli::{Cli, Command};
use snap::diff::ExternalDiff;
use snap::report;
use snap::{Result, SnapshotService};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "snap=debug" } else { "snap=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, verbose: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    let mut service = SnapshotService::open(root)?;

    match command {
        Command::Init => {
            service.init()?;
            println!("✓ store initialized at {}", service.store().dir().display());
        }
        Command::Save(args) => {
            let saved = service.save(args.message().as_deref())?;
            report::print_saved(&saved, verbose);
        }
        Command::List(args) => {
            let snapshots = service.list()?;
            report::print_list(&snapshots, args.json);
        }
        Command::Restore(args) => {
            let restored = service.restore(args.id)?;
            println!("✓ restored snapshot #{}", args.id);
            if !restored.not_erased.is_empty() {
                eprintln!(
                    "warning: {} entries could not be erased before restoring",
                    restored.not_erased.len()
                );
            }
            if !restored.copied.skipped.is_empty() {
                eprintln!(
                    "warning: {} entries could not be restored",
                    restored.copied.skipped.len()
                );
            }
        }
        Command::Diff(args) => {
            if let Some(lines) = args.lines {
                service.config_mut().diff_max_lines = lines;
            }
            let bridge = ExternalDiff::new(service.config().diff_program.clone());
            let lines = service.diff(args.id, &bridge)?;
            report::print_diff(&lines);
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // unknown commands fall back to usage, like running with no command
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                ErrorKind::InvalidSubcommand => {
                    let _ = Cli::command().print_help();
                    std::process::exit(0);
                }
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };

    if let Err(e) = run(command, cli.verbose) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
