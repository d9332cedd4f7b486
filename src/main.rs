use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lcc_tree::config::Config;
use lcc_tree::domain::DomainError;
use lcc_tree::import;
use lcc_tree::modules::cataloguing_pro::render_tree;
use lcc_tree::services::{classify_items, load_forest};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lcc_tree=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let mut config = Config::from_env();
    config.apply_args(&args);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), DomainError> {
    let schedules = import::read_schedule_dir(&config.schedule_dir)?;
    let mut load = load_forest(&schedules, &config.direct_categories);

    if !load.failures.is_empty() {
        tracing::warn!(
            "{} categories failed to build: {:?}",
            load.failures.len(),
            load.failures.iter().map(|(code, _)| code).collect::<Vec<_>>()
        );
    }

    if let Some(path) = &config.items_path {
        let items = import::read_items_file(path, config.items_have_headers)?;
        let report = classify_items(&mut load.forest, &items);
        tracing::info!(
            "Placed {} items, {} at subcategory level, skipped {}",
            report.placed,
            report.fallback,
            report.skipped
        );
    }

    match &config.category {
        Some(code) => {
            let tree = load.forest.tree(code).ok_or_else(|| {
                DomainError::Validation(format!("Category {} is not loaded", code))
            })?;
            print!("{}", render_tree(tree, config.show_counts));
        }
        None => {
            for (_, tree) in load.forest.trees() {
                print!("{}", render_tree(tree, config.show_counts));
            }
        }
    }

    println!("Total items: {}", load.forest.total_items());
    Ok(())
}
