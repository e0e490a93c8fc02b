// Headless diagnostic tool: scans a Takeout export folder and reports what
// a migration run would import, without touching any photo library.

use std::env;
use std::path::PathBuf;
use tracing::{error, info, warn};

use shoebox::migrate::{dedupe_candidates, scan_candidates, CancelFlag, ScanOutcome, TracingObserver};
use shoebox::sidecar;

#[tokio::main]
async fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let folder = PathBuf::from(&args[1]);
    if !folder.is_dir() {
        error!("{} is not a directory", folder.display());
        std::process::exit(1);
    }

    let observer = TracingObserver;
    let cancel = CancelFlag::new();
    let mut errors = Vec::new();

    let candidates = match scan_candidates(&folder, &cancel, &observer, &mut errors).await {
        Ok(ScanOutcome::Completed(candidates)) => candidates,
        Ok(ScanOutcome::Cancelled) => {
            // This tool never sets the cancel flag.
            return;
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let total = candidates.len();
    let with_sidecar = candidates.iter().filter(|c| c.has_sidecar).count();

    let unique = dedupe_candidates(candidates, |_| {});

    let mut sidecars_loaded = 0;
    let mut parseable_capture_times = 0;
    for asset in &unique {
        if let Some(metadata) = sidecar::load_sidecar(&asset.path).await {
            sidecars_loaded += 1;
            if metadata.capture_instant().is_some() {
                parseable_capture_times += 1;
            }
        }
    }

    info!("Media files analyzed:        {}", total);
    info!("Files with a sidecar:        {}", with_sidecar);
    info!("Unique assets to import:     {}", unique.len());
    info!("Sidecars loading cleanly:    {}", sidecars_loaded);
    info!("Parseable capture times:     {}", parseable_capture_times);

    if errors.is_empty() {
        info!("All files were readable");
    } else {
        warn!("{} file(s) could not be read:", errors.len());
        for line in &errors {
            warn!("  {}", line);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <takeout-folder>", program);
    eprintln!();
    eprintln!("Scans a Google Takeout export folder and reports the candidate");
    eprintln!("inventory, duplicate reduction, and sidecar coverage a migration");
    eprintln!("run would see.");
}
