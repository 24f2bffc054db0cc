//! The repair run: resolve paths, confirm overwrites, drive the core
//!
//! All interactive and filesystem concerns live here so the core stays
//! handle-based and independently testable.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use requote_core::error::{RequoteError, Result};
use requote_core::stream::{repair_stream, RepairSummary};
use requote_core::DEFAULT_DELIMITER;

/// Where the repaired stream goes
enum Destination {
    Stdout,
    File(PathBuf),
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let from_stdin = cli.input == Path::new("-");

    // Existence is checked before anything is opened, so a failed run
    // never leaves a partial output file behind.
    if !from_stdin && !cli.input.exists() {
        return Err(RequoteError::InputNotFound {
            path: cli.input.clone(),
        });
    }

    let dest = resolve_destination(cli, from_stdin)?;

    if let Destination::File(path) = &dest {
        if path.exists() && !cli.force && !confirm_overwrite(path)? {
            if !cli.quiet {
                eprintln!("aborted: {} left untouched", path.display());
            }
            return Ok(());
        }
    }

    debug!(elapsed = ?start.elapsed(), "resolve_paths");

    let reader: Box<dyn BufRead> = if from_stdin {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(&cli.input)?))
    };

    let writer: Box<dyn Write> = match &dest {
        Destination::Stdout => Box::new(io::stdout().lock()),
        Destination::File(path) => Box::new(BufWriter::new(File::create(path)?)),
    };

    // Before/after reports go to stderr so they never mix with repaired
    // records when the destination is stdout.
    let quiet = cli.quiet;
    let summary = repair_stream(reader, writer, DEFAULT_DELIMITER, |change| {
        if !quiet {
            eprintln!("line {:>9} was: {}", change.line_number, change.before);
            eprintln!("line {:>9} now: {}", change.line_number, change.after);
        }
    })?;

    debug!(elapsed = ?start.elapsed(), lines = summary.lines, "repair_complete");

    if !cli.quiet {
        print_summary(cli, &dest, &summary)?;
    }

    Ok(())
}

/// Pick the output destination: explicit flag, or `fixed.<input-name>`
/// alongside the input.
fn resolve_destination(cli: &Cli, from_stdin: bool) -> Result<Destination> {
    if let Some(output) = &cli.output {
        if output == Path::new("-") {
            return Ok(Destination::Stdout);
        }
        return Ok(Destination::File(output.clone()));
    }

    if from_stdin {
        return Err(RequoteError::UsageError(
            "--output is required when reading from stdin".to_string(),
        ));
    }

    let name = cli.input.file_name().ok_or_else(|| {
        RequoteError::UsageError(format!(
            "cannot derive a default output name from {:?}",
            cli.input
        ))
    })?;

    let mut file_name = std::ffi::OsString::from("fixed.");
    file_name.push(name);
    Ok(Destination::File(cli.input.with_file_name(file_name)))
}

/// Ask the operator before clobbering an existing output file.
///
/// Without a terminal there is nobody to ask; refuse instead so scripted
/// runs fail loudly rather than silently overwriting.
fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !io::stdin().is_terminal() {
        return Err(RequoteError::OutputExists {
            path: path.to_path_buf(),
        });
    }

    eprint!(
        "warning: {} already exists. Overwrite? [y/N] ",
        path.display()
    );
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Print the run summary. Moves to stderr when the repaired records
/// themselves occupy stdout.
fn print_summary(cli: &Cli, dest: &Destination, summary: &RepairSummary) -> Result<()> {
    let rendered = match cli.format {
        OutputFormat::Human => format!(
            "{} lines read, {} changed, {} fields repaired",
            summary.lines, summary.lines_changed, summary.fields_repaired
        ),
        OutputFormat::Json => {
            let output = match dest {
                Destination::Stdout => "-".to_string(),
                Destination::File(path) => path.display().to_string(),
            };
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "input": cli.input.display().to_string(),
                "output": output,
                "summary": summary,
            }))?
        }
    };

    match dest {
        Destination::Stdout => eprintln!("{}", rendered),
        Destination::File(_) => println!("{}", rendered),
    }

    Ok(())
}
