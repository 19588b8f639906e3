//! voxcat main entry point
//!
//! Loads the configuration, fills a voice catalog from the platform speech
//! engine and selects a voice for the requested (or configured) locale.

use anyhow::{bail, Context};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use voxcat::config::Config;
use voxcat::speech::backends::native::NativeEngine;
use voxcat::{Locale, RegistrationMode, VoiceCatalog};

const USAGE: &str = "Usage: voxcat [--debug|-d] [--config PATH] [--list] [--json] [LOCALE]\n\
\n\
LOCALE is language[_country[_variant]], e.g. en_US. The first engine voice of\n\
each language/country answers to the bare locale; further voices for the same\n\
pair carry their voice name as variant (see --list).";

/// Exit status when the requested locale is not in the catalog
const EXIT_NOT_FOUND: i32 = 2;

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    debug: bool,
    help: bool,
    config: Option<PathBuf>,
    list: bool,
    json: bool,
    locale: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Options> {
    let mut opts = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" | "-d" => opts.debug = true,
            "--list" | "-l" => opts.list = true,
            "--json" => opts.json = true,
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                opts.config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => opts.help = true,
            flag if flag.starts_with('-') => bail!("Unknown option {}\n{}", flag, USAGE),
            _ if opts.locale.is_none() => opts.locale = Some(arg.clone()),
            _ => bail!("Only one locale may be given\n{}", USAGE),
        }
    }

    Ok(opts)
}

/// Catalog state printed by the CLI
#[derive(Serialize)]
struct Report<'a> {
    mode: RegistrationMode,
    capacity: usize,
    voxdir: &'a Path,
    voices: Vec<VoiceReport<'a>>,
    selected: Option<&'a Locale>,
}

#[derive(Serialize)]
struct VoiceReport<'a> {
    locale: &'a Locale,
    registered: bool,
    handle: Option<usize>,
    current: bool,
}

fn report(catalog: &VoiceCatalog) -> Report<'_> {
    let current = catalog.get_current_voice().map(|v| v.locale());

    Report {
        mode: catalog.mode(),
        capacity: catalog.capacity(),
        voxdir: catalog.voxdir(),
        voices: catalog
            .voices()
            .map(|v| VoiceReport {
                locale: v.locale(),
                registered: v.is_registered(),
                handle: v.handle().map(|h| h.raw()),
                current: Some(v.locale()) == current,
            })
            .collect(),
        selected: current,
    }
}

fn print_report(report: &Report<'_>, list: bool) {
    if list {
        println!(
            "{} voices (capacity {}, mode {})",
            report.voices.len(),
            report.capacity,
            report.mode
        );
        for voice in &report.voices {
            let marker = if voice.current { '*' } else { ' ' };
            let state = if voice.registered { "registered" } else { "-" };
            println!("{} {:<40} {}", marker, voice.locale.to_string(), state);
        }
    }

    match report.selected {
        Some(locale) => println!("Selected voice: {}", locale),
        None => println!("No voice selected"),
    }
}

/// Registration mode to use with the native engine
///
/// The platform engine speaks with one voice at a time, so eager
/// registration would leave it on whichever voice was added last.
fn native_mode(configured: RegistrationMode) -> RegistrationMode {
    if configured == RegistrationMode::Eager {
        warn!("registration_mode = all is not supported by the native engine, using single");
    }
    RegistrationMode::Single
}

fn render_json(report: &Report<'_>) -> voxcat::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn init_logging(debug_mode: bool) {
    if debug_mode {
        // Debug mode: write to voxcat.log
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("voxcat.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open voxcat.log for debug logging: {}", e);
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!("voxcat version {} starting (debug mode)", voxcat::VERSION);
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }
}

fn main() {
    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if opts.help {
        println!("{}", USAGE);
        return;
    }

    init_logging(opts.debug);

    match run(&opts) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_NOT_FOUND),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the requested locale resolved to a voice
fn run(opts: &Options) -> anyhow::Result<bool> {
    let config = match &opts.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Loading configuration")?;
    info!("Configuration loaded from {:?}", config.path());

    let requested = match &opts.locale {
        Some(raw) => Some(raw.parse::<Locale>()?),
        None => config.default_locale(),
    };

    let engine = NativeEngine::new().context("Connecting to speech engine")?;

    let mut catalog = VoiceCatalog::new(
        config.max_voices(),
        native_mode(config.registration_mode()),
        config.voxdir(),
    );
    engine
        .fill_catalog(&mut catalog, &config.languages())
        .context("Listing engine voices")?;
    debug!("Catalog: {:?}", catalog);

    let found = match &requested {
        Some(locale) => {
            let found = catalog.get_voice_for(locale).is_some();
            if !found {
                eprintln!("No voice for locale {}", locale);
            }
            found
        }
        None => true,
    };

    let report = report(&catalog);
    if opts.json {
        println!("{}", render_json(&report)?);
    } else {
        print_report(&report, opts.list || requested.is_none());
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let opts = parse_args(args(&["-d", "--config", "/tmp/v.cfg", "--json", "en_US"])).unwrap();
        assert!(opts.debug);
        assert!(opts.json);
        assert!(!opts.list);
        assert!(!opts.help);
        assert_eq!(opts.config, Some(PathBuf::from("/tmp/v.cfg")));
        assert_eq!(opts.locale.as_deref(), Some("en_US"));
    }

    #[test]
    fn test_parse_help() {
        let opts = parse_args(args(&["--list", "-h"])).unwrap();
        assert!(opts.help);
        assert!(opts.list);
        assert!(parse_args(args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_native_mode_is_always_single() {
        assert_eq!(native_mode(RegistrationMode::Eager), RegistrationMode::Single);
        assert_eq!(native_mode(RegistrationMode::Single), RegistrationMode::Single);
    }

    #[test]
    fn test_render_json() {
        let mut catalog = VoiceCatalog::new(2, RegistrationMode::Single, "/voices");
        catalog.add_voice_with(
            "en",
            "US",
            "",
            |_: &Path| voxcat::EngineHandle::new(1),
            |_: voxcat::EngineHandle| {},
        );

        let json = render_json(&report(&catalog)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "single");
        assert_eq!(value["voices"][0]["registered"], true);
        assert_eq!(value["voices"][0]["handle"], 1);
        assert_eq!(value["selected"]["country"], "US");
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["en", "fr"])).is_err());
    }
}
