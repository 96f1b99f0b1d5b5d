use anyhow::{bail, Result};
use fleetify_i18n::config::Config;
use fleetify_i18n::i18n::{
    generate_report, summarize, FsTranslationLoader, I18nMetrics, TranslationValidator,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in CI)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fleetify_i18n=info".parse()?),
        )
        .init();

    info!("Starting translation validation");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Validating {} namespaces under {} against '{}'",
        config.namespaces.len(),
        config.translations_dir.display(),
        config.baseline_locale
    );

    let loader = Arc::new(FsTranslationLoader::new(&config.translations_dir));
    let validator = TranslationValidator::new(loader, config.validator_config());

    let results = validator.validate_all().await;
    let summary = summarize(&results);

    println!("{}", generate_report(&results));

    let metrics = I18nMetrics::global().report();
    info!(
        "Validated {} pairs ({} load failures, average completeness {:.1}%)",
        summary.total, metrics.load_failures, summary.average_completeness
    );

    if !summary.passed(&results) {
        warn!(
            "Translations have errors in: {}",
            summary
                .locales_with_issues
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
        bail!(
            "Translation validation failed ({} invalid, {} incomplete, {} missing)",
            summary.invalid,
            summary.incomplete,
            summary.missing
        );
    }

    info!("All translations passed validation");
    Ok(())
}
