//! CLI entry point for uisync.
//!
//! This module is intentionally thin: it handles argument parsing, the build subprocess,
//! I/O, and exit codes. All business logic lives in the `uisync-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::process::Command;
use uisync_app::{
    NocheckInput, PackInput, nocheck_exit_code, render_file_outcome, render_pack_lines,
    run_nocheck, run_pack, serialize_report,
};
use uisync_settings::{BuildCommand, NocheckOverrides, PackOverrides, UisyncConfigV1};
use uisync_types::{BuildStatus, FileOutcome, MarkerOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "uisync",
    version,
    about = "Keep a UI resource manifest and TypeScript sources in sync"
)]
struct Cli {
    /// Project root (directory the asset and manifest paths are relative to).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Path to uisync config TOML, relative to the project root.
    #[arg(long, default_value = "uisync.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the UI build, then regenerate the resource manifest from the asset directory.
    Pack {
        /// Override the asset directory.
        #[arg(long)]
        asset_dir: Option<Utf8PathBuf>,

        /// Override the manifest file.
        #[arg(long)]
        manifest: Option<Utf8PathBuf>,

        /// Do not run the build command.
        #[arg(long)]
        skip_build: bool,

        /// What to do when the build fails (abort|continue).
        #[arg(long)]
        on_build_failure: Option<String>,

        /// Write a JSON run report to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Prepend the type-check suppression marker to matching source files.
    Nocheck {
        /// Directory to scan.
        directory: Utf8PathBuf,

        /// Glob of files to mark (repeatable; replaces the configured list).
        #[arg(long = "include")]
        include: Vec<String>,

        /// Glob of files to leave alone (repeatable; added to the configured list).
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Only report files missing the marker; exit 2 if any are.
        #[arg(long)]
        check: bool,

        /// Exit 2 when any file could not be processed.
        #[arg(long)]
        fail_on_error: bool,

        /// Write a JSON run report to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let project_root = cli
        .project_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.project_root.clone());

    match cli.cmd {
        Commands::Pack {
            asset_dir,
            manifest,
            skip_build,
            on_build_failure,
            report_out,
        } => cmd_pack(
            &project_root,
            &cli.config,
            PackOverrides {
                asset_dir,
                manifest,
                skip_build,
                on_build_failure,
            },
            report_out,
        ),
        Commands::Nocheck {
            directory,
            include,
            exclude,
            check,
            fail_on_error,
            report_out,
        } => cmd_nocheck(
            &project_root,
            &cli.config,
            &directory,
            NocheckOverrides { include, exclude },
            check,
            fail_on_error,
            report_out,
        ),
    }
}

fn cmd_pack(
    project_root: &Utf8Path,
    config: &Utf8Path,
    overrides: PackOverrides,
    report_out: Option<Utf8PathBuf>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<()> {
        if !project_root.is_dir() {
            anyhow::bail!("project root does not exist: {}", project_root);
        }
        let cfg = load_config(project_root, config)?;
        let settings =
            uisync_settings::resolve_pack(&cfg, overrides).context("resolve config")?;

        let build = match &settings.build {
            Some(cmd) => run_build(project_root, cmd),
            None => BuildStatus::Skipped,
        };
        if let BuildStatus::Failed { message, .. } = &build {
            eprintln!("uisync: build step failed: {message}");
        }

        let output = run_pack(PackInput {
            project_root,
            settings: &settings,
            build,
        })?;

        for line in render_pack_lines(&output) {
            println!("{line}");
        }
        if let Some(path) = &report_out {
            let json = serialize_report(&output.report).context("serialize report")?;
            write_text_file(path, &json).context("write report json")?;
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("uisync error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_nocheck(
    project_root: &Utf8Path,
    config: &Utf8Path,
    directory: &Utf8Path,
    overrides: NocheckOverrides,
    check_only: bool,
    fail_on_error: bool,
    report_out: Option<Utf8PathBuf>,
) -> anyhow::Result<()> {
    if !directory.is_dir() {
        eprintln!("Error: '{directory}' is not a valid directory.");
        std::process::exit(1);
    }

    let result = (|| -> anyhow::Result<i32> {
        let cfg = load_config(project_root, config)?;
        let settings =
            uisync_settings::resolve_nocheck(&cfg, overrides).context("resolve config")?;

        let output = run_nocheck(
            NocheckInput {
                root: directory,
                settings: &settings,
                check_only,
            },
            |outcome| print_outcome(outcome, &settings.directive),
        )?;

        if let Some(path) = &report_out {
            let json = serialize_report(&output.report).context("serialize report")?;
            write_text_file(path, &json).context("write report json")?;
        }
        Ok(nocheck_exit_code(&output.report.data.counts, fail_on_error))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("uisync error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn print_outcome(outcome: &FileOutcome, directive: &str) {
    let line = render_file_outcome(outcome, directive);
    if outcome.outcome == MarkerOutcome::Failed {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Missing config file means defaults; an unreadable or invalid one is an error.
fn load_config(project_root: &Utf8Path, config: &Utf8Path) -> anyhow::Result<UisyncConfigV1> {
    let path = project_root.join(config);
    if !path.exists() {
        return Ok(UisyncConfigV1::default());
    }
    let text = std::fs::read_to_string(&path).with_context(|| format!("read config: {}", path))?;
    uisync_settings::parse_config_toml(&text).with_context(|| format!("parse config: {}", path))
}

/// Run the build command to completion with inherited stdio.
fn run_build(project_root: &Utf8Path, cmd: &BuildCommand) -> BuildStatus {
    let cwd = match &cmd.working_dir {
        Some(dir) => project_root.join(dir),
        None => project_root.to_path_buf(),
    };
    let command_line = std::iter::once(cmd.program.as_str())
        .chain(cmd.args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    eprintln!("uisync: running `{command_line}` in {cwd}");

    match Command::new(&cmd.program)
        .args(&cmd.args)
        .current_dir(&cwd)
        .status()
    {
        Ok(status) if status.success() => BuildStatus::Succeeded,
        Ok(status) => BuildStatus::Failed {
            exit_code: status.code(),
            message: format!("`{}` exited with {status}", cmd.program),
        },
        Err(err) => BuildStatus::Failed {
            exit_code: None,
            message: format!("spawn `{}`: {err}", cmd.program),
        },
    }
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}
