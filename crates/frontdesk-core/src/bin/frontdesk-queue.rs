//! Print a seeded front-desk queue, section by section.
//!
//! Usage: `frontdesk-queue <seed.json> [config.json]`
//!
//! Log level comes from `RUST_LOG` (default `info`).

use std::fs;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use frontdesk_core::{open_session_json, FrontDesk, Section};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(seed_path) = args.next() else {
        bail!("usage: frontdesk-queue <seed.json> [config.json]");
    };
    let seed = fs::read_to_string(&seed_path).with_context(|| format!("reading {seed_path}"))?;
    let config = args
        .next()
        .map(|path| fs::read_to_string(&path).with_context(|| format!("reading {path}")))
        .transpose()?;

    let desk = open_session_json(&seed, config.as_deref()).context("loading session")?;
    print_queue(&desk);
    Ok(())
}

fn print_queue(desk: &FrontDesk) {
    for summary in desk.section_summary() {
        println!("{} ({})", summary.title, summary.count);
        for patient in desk.section_view(summary.section) {
            let badges = desk.badges(patient);
            let mut chips: Vec<String> = badges.shown.iter().map(|b| b.label.clone()).collect();
            if badges.overflow > 0 {
                chips.push(format!("+{}", badges.overflow));
            }
            let drag = if desk.config().is_draggable(summary.section) { "≡ " } else { "  " };
            println!("  {drag}[{}] {}  {}", patient.initials, patient.name, chips.join(" "));
        }
        if summary.section != Section::Completed {
            println!();
        }
    }
}
