use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::EnvFilter;

use pokewatch::{
    model::prettify, validate, ClientConfig, CreatureRecord, Dispatcher, LookupClient,
};

fn main() -> Result<()> {
    // Diagnostics are best-effort and opt-in (RUST_LOG); stderr keeps them
    // out of the alternate screen and the lookup output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "lookup" {
        run_lookup(&args[2..])
    } else {
        run_ui_mode()
    }
}

/// One-shot lookup: validate, fetch, parse, print. Same pipeline as the
/// TUI's Enter key, minus the watchlist.
fn run_lookup(args: &[String]) -> Result<()> {
    let as_json = args.iter().any(|a| a == "--json");
    let identifier = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .context("usage: pokewatch lookup <name-or-id> [--json]")?;

    validate(identifier)?;

    let client = LookupClient::new(ClientConfig::default())?;
    let (dispatcher, _events) = Dispatcher::new(client)?;
    let record = dispatcher
        .lookup_blocking(identifier)
        .with_context(|| format!("lookup failed for {identifier:?}"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_profile(&record);
    }

    Ok(())
}

fn print_profile(record: &CreatureRecord) {
    println!("Name:     {}", prettify(&record.name));
    println!("Pokedex:  #{}", record.id);
    println!("Weight:   {} hectograms", record.weight);
    println!("Height:   {} decimeters", record.height);
    println!("Base XP:  {}", record.base_experience);
    println!("Ability:  {}", record.display_ability());
    println!("Move:     {}", record.display_move());
    if !record.image_url.is_empty() {
        println!("Artwork:  {}", record.image_url);
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let client = LookupClient::new(ClientConfig::default())?;
    let (dispatcher, events) = Dispatcher::new(client)?;

    let mut app = pokewatch::ui::App::new(dispatcher, events);
    pokewatch::ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("TUI mode not available!");
    eprintln!("  Rebuild with: cargo build --features tui");
    eprintln!("  Or use: pokewatch lookup <name-or-id>");
    std::process::exit(1);
}
