//! `add-ts-nocheck <directory>`: the single-purpose marker applier.
//!
//! Keeps the historical interface: one positional argument, plain console lines, exit 1 on
//! a missing or invalid directory. Uses the built-in marker settings and no config file.

use camino::Utf8PathBuf;
use clap::Parser;
use clap::error::ErrorKind;
use uisync_app::{NocheckInput, render_file_outcome, run_nocheck};
use uisync_settings::{NocheckOverrides, UisyncConfigV1};
use uisync_types::MarkerOutcome;

#[derive(Parser, Debug)]
#[command(
    name = "add-ts-nocheck",
    version,
    about = "Prepend `// @ts-nocheck` to every .ts/.tsx file below a directory"
)]
struct Args {
    /// Directory to scan recursively.
    directory: Option<Utf8PathBuf>,

    /// Anything after the directory is ignored.
    #[arg(hide = true)]
    extra: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{}", err.render().to_string().trim_end());
            std::process::exit(1);
        }
    };

    if !args.extra.is_empty() {
        eprintln!(
            "add-ts-nocheck: ignoring extra arguments: {}",
            args.extra.join(" ")
        );
    }

    let Some(directory) = args.directory else {
        println!("Usage: add-ts-nocheck <directory>");
        std::process::exit(1);
    };
    if !directory.is_dir() {
        println!("Error: '{directory}' is not a valid directory.");
        std::process::exit(1);
    }

    let settings =
        uisync_settings::resolve_nocheck(&UisyncConfigV1::default(), NocheckOverrides::default())?;

    run_nocheck(
        NocheckInput {
            root: &directory,
            settings: &settings,
            check_only: false,
        },
        |outcome| {
            let line = render_file_outcome(outcome, &settings.directive);
            if outcome.outcome == MarkerOutcome::Failed {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        },
    )?;

    Ok(())
}
