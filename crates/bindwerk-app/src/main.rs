// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bindwerk — duplex scan booklet builder.
//
// Entry point. Initialises logging, loads configuration, and runs the
// booklet pipeline over the scan root.

use std::path::PathBuf;
use std::process::ExitCode;

use bindwerk_core::config::BookletConfig;
use bindwerk_document::pipeline::BookletPipeline;
use tracing::{error, info, warn};

/// Scan root folder name processed by this tool.
const SCAN_ROOT: &str = "Scans";
/// Optional configuration file read from the scan root.
const CONFIG_NAME: &str = "bindwerk.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Bindwerk starting");

    let root = scan_root();
    let config = match BookletConfig::load_or_default(root.join(CONFIG_NAME)) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration unreadable");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = BookletPipeline::new(root, config);
    match pipeline.run() {
        Ok(summary) => {
            for report in &summary.reports {
                for item in report.failures() {
                    warn!(
                        stage = %report.stage,
                        item = %item.label,
                        cause = item.failure.as_deref().unwrap_or_default(),
                        "item failed"
                    );
                }
            }
            info!(
                sets = summary.set_count,
                pages = summary.page_count,
                elapsed_ms = (summary.finished - summary.started).num_milliseconds(),
                pdf = %summary.pdf_path.display(),
                "booklet build finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "booklet build failed");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the fixed scan root: `~/Downloads/Scans`, or `./Scans` when no
/// home directory is available.
fn scan_root() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join("Downloads").join(SCAN_ROOT);
    }
    PathBuf::from(SCAN_ROOT)
}
