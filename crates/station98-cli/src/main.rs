//! Station98 CLI - launch events, updates and providers from the terminal.
//!
//! Each command runs one cache-then-network load and prints the result, so
//! the last good data is still shown when the backend is unreachable.

use std::io;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use station98_core::cache::CacheStore;
use station98_core::feed::{split_by_emphasis, tone, FeedCategory, FeedItem, UpdateTone};
use station98_core::models::{
    partition_expeditions, partition_spacewalks, Astronaut, Expedition, LaunchEvent, LaunchProvider,
    Mission, Pad, Program, Record, Spacewalk,
};
use station98_core::resolve::provider_for_event;
use station98_core::sync::MEDIA_EVENTS_CACHE_KEY;
use station98_core::utils::{format_date, truncate_string};
use station98_core::{Catalog, Config, DataOrigin, FetchState, PocketBaseClient};

/// Width titles are cut to in list output
const TITLE_WIDTH: usize = 60;

const USAGE: &str = "usage: station98 <events|feed|providers|missions|pads|programs|astronauts|expeditions|spacewalks|clear-cache>";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        bail!(USAGE);
    };

    let config = Config::load()?;
    let base_url = config.base_url();
    let cache = Arc::new(CacheStore::new(config.cache_dir()?)?);
    let client = Arc::new(PocketBaseClient::new(&base_url)?);
    let catalog = Catalog::new(client, cache);
    info!(%base_url, command = %command, "Station98 starting");

    match command.as_str() {
        "events" => show_events(&catalog).await,
        "feed" => show_feed(&catalog).await,
        "providers" => show_providers(&catalog).await,
        "missions" => show_missions(&catalog).await,
        "pads" => show_pads(&catalog).await,
        "programs" => show_programs(&catalog).await,
        "astronauts" => show_astronauts(&catalog).await,
        "expeditions" => show_expeditions(&catalog).await,
        "spacewalks" => show_spacewalks(&catalog).await,
        "clear-cache" => {
            let removed = catalog.cache().clear()?;
            println!("Removed {} cache entries", removed);
            Ok(())
        }
        other => bail!("unknown command {:?}\n{}", other, USAGE),
    }
}

/// Print the error or cache age line for a finished fetch.
/// Returns false when there is nothing to show.
fn report<T>(state: &FetchState<T>, catalog: &Catalog<PocketBaseClient>, key: &str) -> bool {
    if let Some(ref error) = state.error {
        eprintln!("{}", error);
        return false;
    }
    if state.origin == DataOrigin::Cache {
        let age = catalog.cache().age_display(key).unwrap_or_else(|| "earlier".to_string());
        println!("(offline - showing data cached {})", age);
    }
    if state.items.is_empty() {
        println!("Nothing to show");
        return false;
    }
    true
}

async fn show_events(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let directory = catalog.load_provider_directory().await;
    let events = &directory.events;
    if !report(events, catalog, LaunchEvent::CACHE_KEY) {
        return Ok(());
    }
    for event in &events.items {
        let provider = provider_for_event(event, &directory.providers.items)
            .map(|p| p.abbrev.clone().unwrap_or_else(|| p.name.clone()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<10} {}",
            event.formatted_date(),
            truncate_string(&provider, 10),
            truncate_string(&event.title, TITLE_WIDTH)
        );
    }
    Ok(())
}

fn tone_marker(item: &FeedItem) -> &'static str {
    if item.category() == FeedCategory::Video {
        return "[video]";
    }
    match tone(&item.title) {
        UpdateTone::Scrubbed => "[scrub]",
        UpdateTone::Positive => "[go]",
        UpdateTone::Caution => "[hold]",
        UpdateTone::Neutral => "[news]",
    }
}

async fn show_feed(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let snapshot = catalog.load_feed().await;
    if !report(&snapshot.events, catalog, MEDIA_EVENTS_CACHE_KEY) {
        return Ok(());
    }
    let now = Utc::now();
    let sections = split_by_emphasis(&snapshot.items);
    for (heading, items) in [("Updates", &sections.highlighted), ("News", &sections.news)] {
        if items.is_empty() {
            continue;
        }
        println!("== {} ==", heading);
        for item in items {
            println!(
                "{:<8} {:<10} {}",
                tone_marker(item),
                item.relative_time(now),
                truncate_string(&item.title, TITLE_WIDTH)
            );
        }
    }
    Ok(())
}

async fn show_providers(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let directory = catalog.load_provider_directory().await;
    if !report(&directory.providers, catalog, LaunchProvider::CACHE_KEY) {
        return Ok(());
    }
    if directory.active.is_empty() {
        println!("No providers with upcoming launches");
    }
    for provider in &directory.active {
        println!(
            "{} {:<4} {}",
            provider.name_initial(),
            provider.display_country_code(),
            provider.name
        );
    }
    Ok(())
}

async fn show_missions(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let missions = catalog.load_missions().await;
    if !report(&missions.missions, catalog, Mission::CACHE_KEY) {
        return Ok(());
    }
    for (mission, events) in missions.grouped() {
        println!("{} ({})", mission.name, mission.orbit.as_deref().unwrap_or("orbit unknown"));
        for event in events {
            println!("    {:<24} {}", event.formatted_date(), event.title);
        }
    }
    Ok(())
}

async fn show_pads(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let state = catalog.fetcher::<Pad>().fetch().await;
    if report(&state, catalog, Pad::CACHE_KEY) {
        for pad in &state.items {
            println!(
                "{:>9.4} {:>10.4}  {}",
                pad.latitude,
                pad.longitude,
                pad.name
            );
        }
    }
    Ok(())
}

async fn show_programs(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let state = catalog.fetcher::<Program>().fetch().await;
    if report(&state, catalog, Program::CACHE_KEY) {
        for program in &state.items {
            println!(
                "{:<12} {}",
                program.start_date.as_deref().map(format_date).unwrap_or_default(),
                program.name
            );
        }
    }
    Ok(())
}

async fn show_astronauts(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let state = catalog.fetcher::<Astronaut>().fetch().await;
    if report(&state, catalog, Astronaut::CACHE_KEY) {
        for astronaut in &state.items {
            let marker = if astronaut.in_space { "*" } else { " " };
            println!(
                "{} {:<30} {}",
                marker,
                astronaut.name,
                astronaut.agency.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}

async fn show_expeditions(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let state = catalog.fetcher::<Expedition>().fetch().await;
    if !report(&state, catalog, Expedition::CACHE_KEY) {
        return Ok(());
    }
    let sections = partition_expeditions(&state.items, Utc::now().year());
    for (heading, expeditions) in [("This Year", &sections.this_year), ("Archived", &sections.archived)] {
        if expeditions.is_empty() {
            continue;
        }
        println!("== {} ==", heading);
        for expedition in expeditions {
            println!(
                "{:<20} {} - {}  {}",
                expedition.name,
                expedition.start_date,
                expedition.end_date,
                expedition.station_name()
            );
        }
    }
    Ok(())
}

async fn show_spacewalks(catalog: &Catalog<PocketBaseClient>) -> Result<()> {
    let state = catalog.fetcher::<Spacewalk>().fetch().await;
    if !report(&state, catalog, Spacewalk::CACHE_KEY) {
        return Ok(());
    }
    let (recent, archived) = partition_spacewalks(&state.items, Utc::now().year());
    for (heading, walks) in [("Recent", &recent), ("Archived", &archived)] {
        if walks.is_empty() {
            continue;
        }
        println!("== {} ==", heading);
        for walk in walks {
            println!(
                "{:<24} {:<10} {}",
                format_date(&walk.start_time),
                walk.duration.as_deref().unwrap_or("-"),
                walk.name
            );
        }
    }
    Ok(())
}
