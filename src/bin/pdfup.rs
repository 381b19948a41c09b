//! CLI binary for pdf-uploader.
//!
//! A thin shim over the library crate: flags map to `UploaderConfig`, the
//! terminal plays the part of the form (selection list, cancel and upload
//! actions, blocking notices on stderr).

use anyhow::{Context, Result};
use clap::Parser;
use pdf_uploader::{
    InvalidFilePolicy, Notice, Notifier, SelectedFile, SubmissionReport, UploadController,
    UploadedUrls, UploaderConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── Terminal notifier ────────────────────────────────────────────────────────

/// Prints notices to stderr and accepted uploads to stdout.
struct CliNotifier {
    quiet: bool,
    json: bool,
}

impl Notifier for CliNotifier {
    fn alert(&self, notice: &Notice) {
        match notice {
            Notice::Upload(e) => eprintln!(
                "  {} {}  {}",
                red("✗"),
                e.file_name(),
                red(&notice.message())
            ),
            Notice::Selection(_) => eprintln!("{} {}", red("✗"), bold(&notice.message())),
        }
    }

    fn uploaded(&self, file: &SelectedFile, urls: &UploadedUrls) {
        if self.quiet || self.json {
            return;
        }
        println!("  {} {}  {}", green("✓"), file.name(), dim(&urls.to_string()));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Upload two PDFs to the default endpoint
  pdfup invoice.pdf contract.pdf

  # Upload to another server
  pdfup --endpoint https://files.example.com/api/upload scan.pdf

  # Keep the valid files of a mixed batch
  pdfup --skip-invalid *.pdf notes.txt

  # Interactive form
  pdfup -i
    pdfup> add a.pdf b.pdf
    pdfup> list
    pdfup> upload
    pdfup> cancel
    pdfup> quit

  # Machine-readable report
  pdfup --json a.pdf > report.json

ENDPOINT CONTRACT:
  POST <endpoint>, multipart/form-data, one field (default "media") per request.
  Response: {"data": {"url": "<url>" | ["<url>", …]} | null, "error": "<msg>" | null}

ENVIRONMENT VARIABLES:
  PDFUP_ENDPOINT   Upload endpoint URL
  PDFUP_FIELD      Multipart field name
  PDFUP_TIMEOUT    Per-request timeout in seconds (0 = none)
  RUST_LOG         Override log filter
"#;

/// Select PDF files and upload each one to a multipart endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "pdfup",
    version,
    about = "Select PDF files and upload each one to a multipart endpoint",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF files to select (one-shot mode).
    files: Vec<PathBuf>,

    /// Upload endpoint URL.
    #[arg(
        short,
        long,
        env = "PDFUP_ENDPOINT",
        default_value = pdf_uploader::config::DEFAULT_ENDPOINT
    )]
    endpoint: String,

    /// Name of the multipart field carrying the file.
    #[arg(long, env = "PDFUP_FIELD", default_value = pdf_uploader::config::DEFAULT_FIELD_NAME)]
    field: String,

    /// Reject only non-PDF files instead of aborting the rest of the batch.
    #[arg(long)]
    skip_invalid: bool,

    /// Clear the selection after an upload in which every file succeeded.
    #[arg(long)]
    clear_on_success: bool,

    /// Per-request timeout in seconds (0 = none).
    #[arg(long, env = "PDFUP_TIMEOUT", default_value_t = 0)]
    timeout: u64,

    /// Prompt-driven form: add, list, cancel, upload, quit.
    #[arg(short, long, conflicts_with = "files")]
    interactive: bool,

    /// Print the submission report as JSON.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter(&cli))),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let notifier = Arc::new(CliNotifier {
        quiet: cli.quiet,
        json: cli.json,
    });
    let mut form = UploadController::from_config(config)
        .context("Failed to set up uploader")?
        .with_notifier(notifier);

    if cli.interactive {
        return run_interactive(&mut form, &cli).await;
    }

    if cli.files.is_empty() {
        anyhow::bail!("No file was chosen. Pass one or more PDF paths, or use --interactive.");
    }

    // ── One-shot: choose, preview, upload ────────────────────────────────
    let added = form
        .choose_paths(&cli.files)
        .await
        .context("Failed to read selected files")?;
    if let Err(e) = added {
        anyhow::bail!("Selection rejected: {e}");
    }
    if !form.can_submit() {
        anyhow::bail!("Nothing selected: every file was rejected");
    }
    if !cli.quiet && !cli.json {
        print_selection(&form);
    }

    let report = form.submit_selection().await;
    print_report(&report, &cli)?;

    if report.stats.failed > 0 {
        anyhow::bail!(
            "{}/{} files failed to upload",
            report.stats.failed,
            report.stats.total
        );
    }
    Ok(())
}

/// Log filter used when `RUST_LOG` is unset.
fn default_log_filter(cli: &Cli) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    }
}

/// Map CLI args to `UploaderConfig`.
fn build_config(cli: &Cli) -> Result<UploaderConfig> {
    let policy = if cli.skip_invalid {
        InvalidFilePolicy::SkipInvalid
    } else {
        InvalidFilePolicy::AbortBatch
    };

    UploaderConfig::builder()
        .endpoint(cli.endpoint.clone())
        .field_name(cli.field.clone())
        .invalid_file_policy(policy)
        .clear_on_success(cli.clear_on_success)
        .request_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")
}

fn print_selection(form: &UploadController) {
    let files = form.selection().files();
    if files.is_empty() {
        println!("{}", dim("(nothing selected)"));
        return;
    }
    println!("{} {}", cyan("◆"), bold(&format!("{} file(s) selected", files.len())));
    for (i, f) in files.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {}",
            i + 1,
            f.name(),
            dim(&format!("{} bytes", f.size()))
        );
    }
}

fn print_report(report: &SubmissionReport, cli: &Cli) -> Result<()> {
    if cli.json {
        let json = serde_json::to_string_pretty(report).context("Failed to serialise report")?;
        println!("{json}");
        return Ok(());
    }
    if cli.quiet || report.is_empty() {
        return Ok(());
    }

    let s = &report.stats;
    eprintln!(
        "{}  {}/{} uploaded  {}ms{}",
        if s.failed == 0 { green("✔") } else { cyan("⚠") },
        s.succeeded,
        s.total,
        s.total_duration_ms,
        if report.cleared {
            dim("  (selection cleared)")
        } else {
            String::new()
        }
    );
    Ok(())
}

// ── Interactive form ─────────────────────────────────────────────────────────

async fn run_interactive(form: &mut UploadController, cli: &Cli) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if !cli.quiet {
        eprintln!(
            "{} {}  {}",
            cyan("◆"),
            bold("pdfup"),
            dim(&format!("→ {}  (type 'help')", form.config().endpoint))
        );
    }

    loop {
        eprint!("pdfup> ");
        io::stderr().flush().ok();

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            continue;
        };

        match cmd {
            "add" => {
                let paths: Vec<&str> = words.collect();
                let result = if paths.is_empty() {
                    form.picker_mut().dismiss();
                    form.picker_changed()
                } else {
                    match form.choose_paths(&paths).await {
                        Ok(r) => r,
                        Err(e) => {
                            eprintln!("{} {e}", red("✗"));
                            continue;
                        }
                    }
                };
                if result.is_ok() {
                    print_selection(form);
                }
            }
            "list" | "ls" if cli.json => {
                let rows = form.selection().summary();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&rows).context("Failed to serialise selection")?
                );
            }
            "list" | "ls" => print_selection(form),
            "cancel" => {
                if form.can_cancel() {
                    form.cancel_selection();
                    eprintln!("{}", dim("selection cleared"));
                } else {
                    eprintln!("{}", dim("cancel is disabled: nothing selected"));
                }
            }
            "upload" | "submit" => {
                if !form.can_submit() {
                    eprintln!("{}", dim("upload is disabled: nothing selected"));
                    continue;
                }
                let report = form.submit_selection().await;
                print_report(&report, cli)?;
            }
            "help" | "?" => eprintln!("commands: add <paths…>, list, cancel, upload, quit"),
            "quit" | "exit" | "q" => break,
            other => eprintln!("{} unknown command '{other}'", red("✗")),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        let cli = Cli::parse_from(["pdfup", "a.pdf"]);
        assert_eq!(default_log_filter(&cli), "info");
        assert_eq!(default_log_filter(&Cli::parse_from(["pdfup", "-v", "a.pdf"])), "debug");
        assert_eq!(default_log_filter(&Cli::parse_from(["pdfup", "-q", "a.pdf"])), "error");
    }

    #[test]
    fn flags_map_to_config() {
        let cli = Cli::parse_from([
            "pdfup",
            "--endpoint",
            "http://127.0.0.1:8080/up",
            "--field",
            "document",
            "--skip-invalid",
            "a.pdf",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.field_name, "document");
        assert_eq!(config.invalid_file_policy, InvalidFilePolicy::SkipInvalid);
        assert_eq!(config.request_timeout_secs, None);
    }
}
