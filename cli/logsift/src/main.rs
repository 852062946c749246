//! logsift CLI
//!
//! Keyword search over an S3 bucket and rendering of the saved logs.

use clap::Parser;

mod args;
mod format;
mod run;

use args::Cli;
use format::format_bytes;
use run::RunSummary;
use sift_render::RenderSummary;
use sift_search::SearchSummary;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr
    run::init_logging(args.log_level)?;

    match run::execute(args).await? {
        RunSummary::Search(summary) => report_search(&summary),
        RunSummary::Translate(summary) => report_render(&summary),
    }

    Ok(())
}

fn report_search(summary: &SearchSummary) {
    eprintln!();
    eprintln!("Search completed:");
    eprintln!("  Pages listed:     {}", summary.pages_listed);
    eprintln!("  Objects listed:   {}", summary.objects_listed);
    eprintln!("  Objects fetched:  {}", summary.objects_fetched);
    eprintln!("  Objects matched:  {}", summary.objects_matched);
    eprintln!("  Bytes fetched:    {}", format_bytes(summary.bytes_fetched));
    eprintln!("  Bytes written:    {}", format_bytes(summary.bytes_written));

    if let Some(duration) = summary.duration() {
        eprintln!(
            "  Duration:         {:.2}s",
            duration.num_milliseconds() as f64 / 1000.0
        );

        if let Some(ops) = summary.objects_per_second() {
            eprintln!("  Throughput:       {:.1} objects/sec", ops);
        }
    }

    report_warnings(&summary.warnings);
}

fn report_render(summary: &RenderSummary) {
    eprintln!();
    eprintln!("Render completed:");
    eprintln!("  Files rendered:   {}", summary.files_rendered);
    eprintln!("  Users:            {}", summary.users);
    eprintln!("  Entries skipped:  {}", summary.entries_skipped);

    if let Some(duration) = summary.duration() {
        eprintln!(
            "  Duration:         {:.2}s",
            duration.num_milliseconds() as f64 / 1000.0
        );
    }

    report_warnings(&summary.warnings);
}

fn report_warnings(warnings: &[String]) {
    eprintln!("  Warnings:         {}", warnings.len());
    for warning in warnings {
        eprintln!("  Warning: {}", warning);
    }
}
