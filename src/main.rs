mod cli;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, DeliveryArgs, FavoritesCommand, HistoryCommand, SettingsCommand};
use job_scout::config::AppConfig;
use job_scout::integrations::{system_clipboard, system_opener};
use job_scout::search::codes::{describe_codes, experience_label, job_type_label, workplace_label};
use job_scout::search::time_filter::{time_filter_display, QUICK_TIME_FILTERS};
use job_scout::storage::FileStore;
use job_scout::{parse_search_url, JobSearchStore, SearchParams, StoreOptions, UrlAnalysis};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage_dir = dir;
    }

    let storage = FileStore::open(&config.storage_dir).with_context(|| {
        format!("Failed to open data directory {}", config.storage_dir.display())
    })?;
    info!("📂 Using data directory {}", storage.dir().display());

    let mut store = JobSearchStore::with_options(storage, StoreOptions::from(&config))
        .with_clipboard(system_clipboard())
        .with_opener(system_opener());
    store.initialize();

    match cli.command {
        Commands::Build { search, delivery, json } => {
            let params = search.into_params(store.settings());
            store.set_form(params);
            if !store.validate_form() {
                let fields: Vec<String> =
                    store.validation().invalid_fields().iter().map(|f| f.to_string()).collect();
                bail!("Invalid search fields: {}", fields.join(", "));
            }

            let url = store.generate_url(None).await?;
            store.add_current_search_to_history().await;

            if json {
                let report = serde_json::json!({ "url": url, "analysis": store.url_analysis() });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_search(store.form(), &url, store.url_analysis());
            }
            deliver(&mut store, &url, &delivery).await;
        }

        Commands::Analyze { url, json } => {
            let params = parse_search_url(&url)?;
            let analysis = store.analyze_url(&url, &params);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_search(&params, &url, Some(&analysis));
            }
        }

        Commands::History(command) => match command {
            HistoryCommand::List { page, per_page } => {
                if let Some(per_page) = per_page {
                    store.set_history_items_per_page(per_page);
                }
                store.set_history_page(page);

                if store.history().is_empty() {
                    println!("No searches in history yet.");
                    return Ok(());
                }
                let offset = (store.pagination().current_page() - 1) * store.pagination().items_per_page();
                for (i, item) in store.paginated_history().iter().enumerate() {
                    println!(
                        "{}. [{}] {}",
                        offset + i + 1,
                        item.searched_at.format("%Y-%m-%d %H:%M"),
                        item.params.trimmed_keywords().unwrap_or("(no keywords)")
                    );
                    println!("   ID: {}", item.id);
                    println!("   URL: {}", item.url);
                }
                println!(
                    "\nPage {} of {} ({} searches)",
                    store.pagination().current_page(),
                    store.total_history_pages(),
                    store.history().len()
                );
            }
            HistoryCommand::Delete { id } => {
                if store.delete_history_item(&id) {
                    println!("Deleted {}", id);
                } else {
                    println!("No history entry {}", id);
                }
            }
            HistoryCommand::Clear => {
                store.clear_history();
                println!("History cleared.");
            }
            HistoryCommand::Load { id, delivery } => {
                if !store.load_history_item(&id) {
                    bail!("No history entry {}", id);
                }
                let url = store.generated_url().to_string();
                print_search(store.form(), &url, store.url_analysis());
                deliver(&mut store, &url, &delivery).await;
            }
        },

        Commands::Favorites(command) => match command {
            FavoritesCommand::List => {
                if store.favorite_count() == 0 {
                    println!("No favorites saved yet.");
                }
                for (i, fav) in store.favorites().iter().enumerate() {
                    println!("{}. {} ({})", i + 1, fav.name, fav.id);
                    if let Some(description) = &fav.description {
                        println!("   {}", description);
                    }
                    if !fav.tags.is_empty() {
                        println!("   Tags: {}", fav.tags.join(", "));
                    }
                    match fav.last_used {
                        Some(at) => println!("   Last used: {}", at.format("%Y-%m-%d %H:%M")),
                        None => println!("   Never used"),
                    }
                }
            }
            FavoritesCommand::Save { name, description, tags, search } => {
                let params = search.into_params(store.settings());
                store.set_form(params);
                let id = store.save_favorite(&name, description.as_deref(), tags)?;
                println!("⭐ Saved favorite \"{}\" as {}", name.trim(), id);
            }
            FavoritesCommand::Load { id, delivery } => {
                if !store.load_favorite(&id) {
                    bail!("No favorite {}", id);
                }
                let url = store.generate_url(None).await?;
                print_search(store.form(), &url, store.url_analysis());
                deliver(&mut store, &url, &delivery).await;
            }
            FavoritesCommand::Delete { id } => {
                if store.delete_favorite(&id) {
                    println!("Deleted {}", id);
                } else {
                    println!("No favorite {}", id);
                }
            }
        },

        Commands::Settings(command) => {
            if let SettingsCommand::Set(args) = command {
                store.update_settings(args.into());
            }
            println!("{}", serde_json::to_string_pretty(store.settings())?);
        }

        Commands::TimeFilters => {
            println!("{:<12} {}", "(empty)", time_filter_display(""));
            for preset in QUICK_TIME_FILTERS {
                println!("{:<12} {} ({} h)", preset.token, preset.label, preset.hours);
            }
        }
    }

    Ok(())
}

/// Copy and/or open `url` as requested, reporting the outcome
async fn deliver(store: &mut JobSearchStore, url: &str, delivery: &DeliveryArgs) {
    if delivery.copy {
        store.copy_to_clipboard(Some(url)).await;
        report_notification(store);
    }
    if delivery.open {
        store.open_in_browser(Some(url)).await;
        report_notification(store);
    }
}

fn report_notification(store: &JobSearchStore) {
    if let Some(note) = store.active_notification(Utc::now()) {
        eprintln!("[{}] {}", note.kind, note.message);
    }
}

fn print_search(params: &SearchParams, url: &str, analysis: Option<&UrlAnalysis>) {
    println!("🔗 {}", url);

    if let Some(keywords) = params.trimmed_keywords() {
        println!("   Keywords: {}", keywords);
    }
    if let Some(location) = params.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        println!("   Location: {}", location);
    }
    if let Some(token) = params.time_posted.as_deref().filter(|t| !t.is_empty()) {
        println!("   Posted: {}", time_filter_display(token));
    } else if let Some(hours) = params.custom_hours.filter(|h| *h > 0.0) {
        println!("   Posted: last {} hours", hours);
    }
    if !params.experience_level.is_empty() {
        println!("   Experience: {}", describe_codes(&params.experience_level, experience_label));
    }
    if !params.job_type.is_empty() {
        println!("   Job type: {}", describe_codes(&params.job_type, job_type_label));
    }
    if !params.workplace_type.is_empty() {
        println!("   Workplace: {}", describe_codes(&params.workplace_type, workplace_label));
    }

    let Some(analysis) = analysis else {
        return;
    };
    println!();
    if !analysis.is_valid {
        println!("❌ URL is not valid");
    } else {
        println!(
            "📊 {} parameters, estimated results: {}",
            analysis.parameter_count,
            analysis.estimated_results.map(|v| v.to_string()).unwrap_or_default()
        );
    }
    for warning in &analysis.warnings {
        println!("   ⚠️  {}", warning);
    }
    for suggestion in &analysis.suggestions {
        println!("   💡 {}", suggestion);
    }
}
