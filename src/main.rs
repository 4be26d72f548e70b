use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use subfix::app_dirs::AppDirs;
use subfix::config::{Config, ConfigStore, FileConfigStore};
use subfix::correct::Dictionary;
use subfix::file_processor::FileProcessor;
use subfix::report::Reporter;

/// auto-correct OCR l/I confusions in subtitle files
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Corrects the lowercase-l/uppercase-I confusions that subtitle OCR tools \
                  produce. Each file is backed up next to the original before being \
                  rewritten in place."
)]
pub struct Cli {
    /// subtitle files to correct in place
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// write a <file>.log with every original=corrected pair
    #[clap(short = 'a', long = "log")]
    write_log: bool,

    /// suppress all console output, including errors
    #[clap(short, long)]
    quiet: bool,

    /// output additional information while processing
    #[clap(short, long)]
    verbose: bool,

    /// extra corrections file layered over the built-in dictionary
    #[clap(short, long)]
    dictionary: Option<PathBuf>,
}

impl Cli {
    /// Merges the flags over the persisted defaults. Flags only switch
    /// things on; the config file supplies everything else.
    fn effective_config(&self, mut config: Config) -> Config {
        config.quiet |= self.quiet;
        config.verbose |= self.verbose;
        config.write_log |= self.write_log;
        if self.dictionary.is_some() {
            config.dictionary_path = self.dictionary.clone();
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    validate_files(&cli);

    let config = cli.effective_config(FileConfigStore::new().load());
    let reporter = Reporter::new(config.verbose, config.quiet);
    let dictionary = build_dictionary(&config, &reporter);
    reporter.verbose_message(&format!("Dictionary entries: {}", dictionary.len()));

    let processor = FileProcessor::new(&dictionary, &reporter, &config);
    let mut failures = 0;
    for file in &cli.files {
        if let Err(err) = processor.process(file) {
            reporter.error(&format!("while processing {}: {err:#}", file.display()));
            failures += 1;
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Console logging controlled by RUST_LOG, warnings by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Every argument must name an existing regular file; anything else exits
/// through clap's error path so the usage text is shown.
fn validate_files(cli: &Cli) {
    for file in &cli.files {
        if !file.exists() {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, format!("no such file: {}", file.display()))
                .exit();
        }
        if !file.is_file() {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::Io,
                format!("cannot convert a directory: {}", file.display()),
            )
            .exit();
        }
    }
}

/// The bundled dictionary, with the user's corrections file layered on top
/// when one is configured or present in the config directory. Load
/// failures degrade to the entries already gathered.
fn build_dictionary(config: &Config, reporter: &Reporter) -> Dictionary {
    let mut dictionary = Dictionary::embedded();

    let user_path = config
        .dictionary_path
        .clone()
        .or_else(|| AppDirs::user_dictionary_path().filter(|p| p.exists()));

    if let Some(path) = user_path {
        match Dictionary::load(&path) {
            Ok(extra) => dictionary.extend(extra),
            Err(err) => {
                warn!("{err:#}");
                reporter.error(&format!("unable to load corrections file: {err:#}"));
            }
        }
    }
    dictionary
}
