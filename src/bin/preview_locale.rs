//! Preview locale binary - shows what each locale looks like without a UI
//!
//! Usage:
//!   cargo run --bin preview                  # Every registered locale
//!   cargo run --bin preview -- --locale ar   # A single locale
//!   cargo run --bin preview -- --switch      # Also run a resolver switch
//!                                            # against TRANSLATIONS_DIR
//!
//! Optional environment variables:
//! - TRANSLATIONS_DIR (defaults to locales)
//! - PREFERENCE_FILE (defaults to .fleetify-language.json)
//! - APP_LOCALE / LANG

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use fleetify_i18n::config::Config;
use fleetify_i18n::i18n::{
    plan_document_effects, switcher_options, BusinessRuleEngine, DocumentOp,
    FilePreferenceStore, FsTranslationLoader, I18nMetrics, InMemoryDocument, Language,
    LocaleContext, LocaleRegistry, LocaleResolver, MirroredIcon, RuleCategory,
};
use std::sync::Arc;
use tracing::{info, warn};

const SAMPLE_AMOUNT: f64 = 1_234_567.891;
const SAMPLE_ICONS: &[&str] = &["chevron-left", "arrow-right", "truck"];

fn sample_datetime() -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 12, 18)
        .and_then(|date| date.and_hms_opt(14, 30, 0))
        .context("Invalid sample date")
}

fn describe_op(op: &DocumentOp) -> String {
    match op {
        DocumentOp::SetAttribute { name, value } => format!("set {}=\"{}\"", name, value),
        DocumentOp::RemoveClass(class) => format!("remove class {}", class),
        DocumentOp::AddClass(class) => format!("add class {}", class),
        DocumentOp::ReplaceStyle { id, css } => {
            format!("replace style #{} ({} rules)", id, css.lines().count())
        }
    }
}

fn print_locale(language: Language) -> Result<()> {
    let context = LocaleContext::new(language);
    let locale = context.locale();
    let sample = sample_datetime()?;

    println!(
        "\n========== {} ({} / {}) ==========",
        locale.code, locale.name, locale.native_name
    );
    println!("Direction:   {}", context.direction());
    println!("Currency:    {}", context.format_currency(SAMPLE_AMOUNT));
    println!("Number:      {}", context.format_number(SAMPLE_AMOUNT));
    println!("Date:        {}", context.format_date(sample, None));
    println!("Date & time: {}", context.format_date_time(sample));
    println!("Time:        {}", context.format_time(sample));

    println!("Icons:");
    for icon in SAMPLE_ICONS {
        let style = MirroredIcon::new(*icon)
            .style(locale.code)
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<14} {}", icon, style);
    }

    println!("Document effects:");
    for op in plan_document_effects(None, locale) {
        println!("  {}", describe_op(&op));
    }

    let rules = context.rules();
    let explicit = if BusinessRuleEngine::has_explicit_rules(locale.code) {
        ""
    } else {
        " (default rules)"
    };
    println!("Business rules{}:", explicit);
    println!("  Minimum rental age: {}", rules.contracts.minimum_age);
    println!(
        "  Deposit on {}: {}",
        context.format_currency(10_000.0),
        context.format_currency(BusinessRuleEngine::required_deposit(locale.code, 10_000.0))
    );
    println!(
        "  VAT: {}%",
        context.format_number(rules.financial.tax_rates.vat * 100.0)
    );
    println!(
        "  Working hours: {}-{}",
        rules.hr.working_hours.regular.start, rules.hr.working_hours.regular.end
    );
    if let Some(ramadan) = BusinessRuleEngine::apply_rule(
        locale.code,
        RuleCategory::Hr,
        "working_hours.ramadan",
    ) {
        println!("  Ramadan hours: {}", ramadan);
    }
    println!(
        "  Holiday on {}: {}",
        sample.date(),
        BusinessRuleEngine::is_holiday(locale.code, sample.date())
    );

    Ok(())
}

/// Initialize a resolver from the environment and switch through `codes`.
async fn run_switch(config: &Config, codes: &[&str]) -> Result<()> {
    let document = Arc::new(InMemoryDocument::new());
    let resolver = LocaleResolver::new(
        Arc::new(FilePreferenceStore::new(&config.preference_file)),
        Arc::new(FsTranslationLoader::new(&config.translations_dir)),
        document.clone(),
    )
    .with_namespaces(config.namespaces.clone())
    .with_environment_locale(config.environment_locale.clone())
    .with_fallback(Language::from_code(&config.default_locale)?);

    resolver.on_change(Box::new(|language| {
        info!("Listener saw switch to {}", language.code());
    }));

    resolver.initialize().await?;
    println!("\n========== RESOLVER ==========");
    println!("Initial locale: {}", resolver.current().code());

    for code in codes {
        let outcome = match resolver.change_locale(code).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Skipping '{}': {}", code, e);
                println!("{} -> failed: {}", code, e);
                continue;
            }
        };
        let state = document.snapshot();
        println!(
            "{} -> {:?}: lang={} dir={} classes={:?}",
            code,
            outcome,
            state.attribute("lang").unwrap_or("-"),
            state.attribute("dir").unwrap_or("-"),
            state.body_classes
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fleetify_i18n=info".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let only = args
        .iter()
        .position(|arg| arg == "--locale")
        .and_then(|i| args.get(i + 1));
    let switch = args.iter().any(|arg| arg == "--switch");

    let languages = match only {
        Some(code) => vec![Language::from_code(code)?],
        None => LocaleRegistry::global()
            .codes()
            .into_iter()
            .map(Language::from_code)
            .collect::<Result<Vec<_>, _>>()?,
    };

    println!("Switcher:");
    let selected = languages.first().map(|l| l.code()).unwrap_or_default();
    for option in switcher_options(selected) {
        let marker = if option.selected { "*" } else { " " };
        println!(
            " {} {:<3} {:<10} {} ({})",
            marker, option.code, option.name, option.native_name, option.direction
        );
    }

    for language in &languages {
        print_locale(*language)?;
    }

    if switch {
        let config = Config::from_env()?;
        let codes: Vec<&str> = languages.iter().map(|l| l.code()).collect();
        run_switch(&config, &codes).await?;
    }

    let metrics = I18nMetrics::global().report();
    println!(
        "\nFormatting fallbacks: {}, load failures: {}",
        metrics.formatting_fallbacks, metrics.load_failures
    );
    Ok(())
}
