//! CLI binary for bibcheck.
//!
//! Usage: bibcheck references.bib -o report.txt

#[cfg(feature = "cli")]
mod cli {
    use bibcheck::{ProgressEvent, ScholarClient};
    use clap::Parser;
    use std::path::PathBuf;
    use tokio_util::sync::CancellationToken;

    #[derive(Parser)]
    #[command(
        name = "bibcheck",
        about = "Check BibTeX entries against Google Scholar",
        version
    )]
    struct Cli {
        /// Path to the BibTeX file
        bibtex_file: Option<PathBuf>,

        /// Output file to save results
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum delay between requests (seconds)
        #[arg(long, default_value_t = 2.0)]
        min_delay: f64,

        /// Maximum delay between requests (seconds)
        #[arg(long, default_value_t = 5.0)]
        max_delay: f64,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    }

    fn print_progress(event: &ProgressEvent) {
        match event {
            ProgressEvent::Checking {
                index,
                total,
                entry_id,
                title,
            } => {
                println!("\n[{}/{}] Checking: {}", index + 1, total, entry_id);
                println!("Title: {}", title);
            }
            ProgressEvent::Checked { result, .. } => {
                println!("Query: {}", result.query);
                if result.success {
                    let status = if result.found { "✓ FOUND" } else { "✗ NOT FOUND" };
                    println!("Status: {} ({} results)", status, result.num_results);
                } else {
                    println!(
                        "Status: ERROR - {}",
                        result.error.as_deref().unwrap_or("unknown")
                    );
                }
            }
        }
    }

    fn print_results_table(results: &[bibcheck::CheckResult]) {
        use comfy_table::{ContentArrangement, Table};

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Entry", "Title", "Status", "Results"]);

        for result in results {
            let title = if result.title.chars().count() > 60 {
                let head: String = result.title.chars().take(57).collect();
                format!("{}...", head)
            } else {
                result.title.clone()
            };
            let status = if !result.success {
                "ERROR".to_string()
            } else if result.found {
                "FOUND".to_string()
            } else {
                "NOT FOUND".to_string()
            };

            table.add_row(vec![
                &result.entry_id,
                &title,
                &status,
                &result.num_results.to_string(),
            ]);
        }

        println!("{table}");
    }

    pub async fn run() -> bibcheck::error::Result<()> {
        let cli = Cli::parse();

        let Some(bibtex_file) = cli.bibtex_file else {
            eprintln!("Error: Please provide a BibTeX file path");
            std::process::exit(1);
        };

        if cli.min_delay > cli.max_delay {
            return Err(bibcheck::BibCheckError::InvalidDelayRange {
                min: cli.min_delay,
                max: cli.max_delay,
            });
        }

        println!("BibTeX Google Scholar Checker");
        println!("==================================================");
        println!("This tool will check each entry in your BibTeX file against Google Scholar.");
        println!("Please be patient as we need to add delays to avoid rate limiting.");
        println!(
            "Using delay range: {}-{} seconds between requests\n",
            cli.min_delay, cli.max_delay
        );

        println!("Loading BibTeX file: {}", bibtex_file.display());
        let records = match bibcheck::bibfile::load_records(&bibtex_file) {
            Ok(records) => records,
            Err(e) => {
                // File-load failure aborts before any lookups; the run still
                // completes with an empty result set.
                eprintln!("Error loading BibTeX file: {}", e);
                println!("\n{}", bibcheck::report::render_summary(&[]));
                return Ok(());
            }
        };
        println!("Found {} entries to check", records.len());

        let client = ScholarClient::new().with_delay_range(cli.min_delay, cli.max_delay);

        let cancel = CancellationToken::new();
        let ctrl_c_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctrl_c_cancel.cancel();
            }
        });

        let results = client
            .check_records(&records, |event| print_progress(&event), &cancel)
            .await;

        println!();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            print_results_table(&results);
        }

        println!("\n{}", bibcheck::report::render_summary(&results));

        if let Some(output) = cli.output {
            match bibcheck::report::write_report(&output, &results) {
                Ok(()) => println!("Results saved to: {}", output.display()),
                Err(e) => eprintln!("Error saving results: {}", e),
            }
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
