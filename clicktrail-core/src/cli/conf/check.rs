use crate::conf::{ClicktrailConfig, ConfigError, load_config};
use crate::pipeline::Analyzer;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match validate(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            print_summary(&cfg);
            Ok(())
        }
        Err(err) => {
            print_config_error(&path, err, plain);
            std::process::exit(1);
        }
    }
}

/// Loads the file and builds every startup component, so column clashes, bad
/// bot tokens and unreadable alias files all surface here.
pub fn validate(path: &Path) -> Result<ClicktrailConfig, ConfigError> {
    let cfg = load_config(path)?;
    Analyzer::from_config(&cfg)?;
    Ok(cfg)
}

fn print_summary(cfg: &ClicktrailConfig) {
    match &cfg.log.path {
        Some(log) => println!("✔ log: {}", log.display()),
        None => println!("✔ log: <set with --log>"),
    }
    println!(
        "✔ columns: session={} url={} referrer={} timestamp={} status={}",
        cfg.log.session_column + 1,
        cfg.log.url_column + 1,
        cfg.log.referrer_column + 1,
        cfg.log.timestamp_column + 1,
        cfg.log.status_column + 1
    );
    println!(
        "✔ {} declared hostnames",
        cfg.cleaning.declared_hostnames().len()
    );
    println!(
        "✔ {} bot tokens, {} skipped extensions, {} skipped urls",
        cfg.cleaning.skip_bot_tokens.len(),
        cfg.cleaning.skip_extensions.len(),
        cfg.cleaning.skip_urls.len()
    );
    match cfg.reports.continuous_every {
        0 => println!(
            "✔ batch mode, top {} pairs and {} sessions",
            cfg.reports.pairs, cfg.reports.sessions
        ),
        n => println!("✔ continuous mode, reports every {n} accepted lines"),
    }
}

fn print_config_error(path: &Path, err: ConfigError, plain: bool) {
    let hint = config_error_hint(&err);
    if plain {
        eprintln!("{}", err);
    } else {
        eprintln!();
        eprintln!("{}", path.display());
        eprintln!("  {}: {}", "error".red().bold(), err);
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // Column layout
        //---------------------------------------------------------------------
        ConfigError::ColumnConflict { .. } => Some(
            "Every field must come from its own column.\n\
             \n\
             Columns are 0-based in the config file. For a combined log:\n\
             \n\
             log {\n\
             \x20 preset = \"combined\"\n\
             }",
        ),

        ConfigError::MissingLogPath => Some(
            "Tell clicktrail which log to read.\n\
             \n\
             Either set `path` in the `log` block or pass `--log <file>`\n\
             (`--log -` reads stdin).",
        ),

        //---------------------------------------------------------------------
        // Cleaning
        //---------------------------------------------------------------------
        ConfigError::NoDeclaredHosts => Some(
            "skip_undeclared_hosts needs at least one hostname.\n\
             \n\
             Example:\n\
             \n\
             cleaning {\n\
             \x20 domain       = \"example.com\"\n\
             \x20 host_aliases = [\"www.example.com\"]\n\
             }",
        ),

        ConfigError::InvalidBotPattern { .. } => Some(
            "Bot tokens are joined into one case-insensitive regex alternation.\n\
             \n\
             Escape metacharacters such as `(` or `+` in `skip_bot_tokens`.",
        ),

        ConfigError::EmptyAcceptStatus => Some(
            "At least one HTTP status must be accepted.\n\
             \n\
             Example:\n\
             \n\
             cleaning {\n\
             \x20 accept_status = [200, 304]\n\
             }",
        ),

        ConfigError::ReadAliasFile { .. } => Some(
            "The URL alias file holds one `URL<TAB>ALIAS` entry per line.\n\
             \n\
             Check `url_alias_file` or remove it.",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
