use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use translation_runtime::TranslatorConfig;
use translation_runtime::core::types::AUTO_SOURCE_LANGUAGE;
use translation_runtime::language::{self, LanguageDetector};
use translation_runtime::phrase_table::PhraseTable;

const USAGE: &str = "usage: translate_cli [--target <lang>] [--source <lang>] [--detect] \
[--phrase-table <path.json>] [--no-phrase-table]

Reads text from stdin, one line per request, and prints `[origin] translation`.
Credentials and defaults come from the environment (.env is loaded if present):
OPENAI_API_KEY, ANTHROPIC_API_KEY, GOOGLE_TRANSLATE_API_KEY, DEFAULT_TARGET_LANGUAGE,
ENABLE_FALLBACK_TRANSLATIONS, TRANSLATOR_REQUEST_TIMEOUT_MS, TRANSLATOR_MAX_TEXT_LENGTH,
TRANSLATOR_PROVIDER_ORDER.";

struct CliOptions {
    target_language: Option<String>,
    source_language: String,
    detect: bool,
    phrase_table_path: Option<String>,
    disable_phrase_table: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translation_runtime=info,translate_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let Some(options) = parse_options(std::env::args().skip(1).collect())? else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut config = TranslatorConfig::from_env()?;
    if options.disable_phrase_table {
        config.enable_phrase_table = false;
    }
    let target_language = options
        .target_language
        .clone()
        .unwrap_or_else(|| config.default_target_language.clone());
    if !language::is_supported(&target_language) {
        eprintln!("translate_cli: warning: unsupported target language {target_language:?}");
    }

    let mut builder = config.resolver_builder()?;
    if let Some(path) = custom_phrase_table_path(&options, config.enable_phrase_table)? {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read phrase table {path}: {e}"))?;
        builder = builder.with_phrase_table(PhraseTable::from_json_str(&json)?);
    }
    let resolver = builder.build();
    let detector = LanguageDetector::default();

    eprintln!(
        "translate_cli: target={target_language}, providers={}",
        resolver
            .registry()
            .ids()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    );

    let stdout = io::stdout();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let source_language = if options.detect {
            let detected = detector.detect(&line);
            info!(detected, "detected source language");
            detected.to_string()
        } else {
            options.source_language.clone()
        };

        match resolver
            .translate(&line, &source_language, &target_language)
            .await
        {
            Ok(result) => {
                info!(origin = %result.origin, "resolved translation");
                let mut out = stdout.lock();
                writeln!(out, "[{}] {}", result.origin, result.translated_text)?;
                out.flush()?;
            }
            Err(err) => eprintln!("error: {err}"),
        }
    }

    Ok(())
}

/// Returns `None` when help was requested.
fn parse_options(args: Vec<String>) -> Result<Option<CliOptions>, Box<dyn std::error::Error>> {
    let mut options = CliOptions {
        target_language: None,
        source_language: AUTO_SOURCE_LANGUAGE.to_string(),
        detect: false,
        phrase_table_path: None,
        disable_phrase_table: false,
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--target" => {
                options.target_language = Some(required_value(&args, i, "--target")?);
                i += 2;
            }
            "--source" => {
                options.source_language = required_value(&args, i, "--source")?;
                i += 2;
            }
            "--phrase-table" => {
                options.phrase_table_path = Some(required_value(&args, i, "--phrase-table")?);
                i += 2;
            }
            "--detect" => {
                options.detect = true;
                i += 1;
            }
            "--no-phrase-table" => {
                options.disable_phrase_table = true;
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {other}\n\n{USAGE}").into()),
        }
    }

    Ok(Some(options))
}

/// A custom table only makes sense while the phrase table is enabled.
fn custom_phrase_table_path(
    options: &CliOptions,
    phrase_table_enabled: bool,
) -> Result<Option<&str>, Box<dyn std::error::Error>> {
    match options.phrase_table_path.as_deref() {
        Some(_) if !phrase_table_enabled => Err(
            "--phrase-table cannot be used while the phrase table is disabled \
(--no-phrase-table or ENABLE_FALLBACK_TRANSLATIONS=false)"
                .into(),
        ),
        path => Ok(path),
    }
}

fn required_value(
    args: &[String],
    index: usize,
    flag: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let value = args
        .get(index + 1)
        .ok_or_else(|| format!("missing value for {flag}"))?
        .trim()
        .to_string();
    if value.is_empty() {
        return Err(format!("{flag} must be non-empty").into());
    }
    Ok(value)
}
