//! Scan demo command.
//!
//! Drives a simulated primary/fallback capability pair end to end, the same
//! path a host bridge takes through the service layer.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use console::style;

use crate::config::Settings;
use crate::scanner::{
    CompletionHub, OutputFormat, RequestTag, SimulatedBehavior, SimulatedScanner,
};
use crate::services::ScanService;

/// Arguments for the scan demo.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Maximum number of pages to capture.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Allow importing existing images from the gallery.
    #[arg(long)]
    pub gallery: bool,

    /// Output format for captured pages (jpg or png).
    #[arg(long)]
    pub format: Option<String>,

    /// JPEG compression quality in [0.0, 1.0].
    #[arg(long)]
    pub quality: Option<f64>,

    /// Number of pages the simulated capture flow produces.
    #[arg(long, default_value_t = 3)]
    pub pages: u32,

    /// Report the primary capability as unavailable to exercise the fallback.
    #[arg(long)]
    pub primary_unavailable: bool,

    /// Simulate the user dismissing the capture flow.
    #[arg(long)]
    pub cancel: bool,

    /// Delay in milliseconds before the capture flow completes.
    #[arg(long, default_value_t = 250)]
    pub capture_delay_ms: u64,
}

/// Run one scan against a simulated capability pair and print the results.
pub async fn cmd_scan(settings: &Settings, args: ScanArgs) -> anyhow::Result<()> {
    let mut options = settings.scan_defaults.clone();
    if let Some(max_pages) = args.max_pages {
        options.max_pages = max_pages;
    }
    if args.gallery {
        options.allow_gallery_import = true;
    }
    if let Some(ref format) = args.format {
        options.output_format = OutputFormat::parse_or_default(format);
    }
    if let Some(quality) = args.quality {
        options.compression_quality = quality;
    }

    settings.ensure_directories()?;

    let behavior = if args.cancel {
        SimulatedBehavior::Cancel
    } else {
        SimulatedBehavior::Capture { pages: args.pages }
    };
    let primary_behavior = if args.primary_unavailable {
        SimulatedBehavior::Unavailable {
            reason: "document scanner not present on this host".to_string(),
        }
    } else {
        behavior.clone()
    };
    let delay = Duration::from_millis(args.capture_delay_ms);

    let hub = Arc::new(CompletionHub::new());
    let primary = Arc::new(
        SimulatedScanner::new(
            RequestTag::PRIMARY,
            "simulated-primary",
            primary_behavior,
            settings.output_dir.clone(),
            hub.clone(),
        )
        .with_capture_delay(delay),
    );
    let fallback = Arc::new(
        SimulatedScanner::new(
            RequestTag::FALLBACK,
            "simulated-fallback",
            behavior,
            settings.output_dir.clone(),
            hub.clone(),
        )
        .with_capture_delay(delay),
    );
    let service = ScanService::new(primary, fallback, hub);

    match service.get_pictures(options).await {
        Ok(pages) if pages.is_empty() => {
            println!("{} Scan cancelled, no pages produced.", style("!").yellow());
        }
        Ok(pages) => {
            println!("\n{}", style("Captured pages").bold());
            println!("{}", "-".repeat(40));
            for page in &pages {
                println!("{}", page);
            }
            println!("\n{} {} page(s) written.", style("✓").green(), pages.len());
        }
        Err(error) => {
            println!(
                "{} Scan failed ({}): {}",
                style("✗").red(),
                error.code(),
                error.message
            );
        }
    }

    Ok(())
}
