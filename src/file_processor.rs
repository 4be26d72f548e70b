use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::{debug, info};

use crate::config::Config;
use crate::correct::{Dictionary, LineCorrector};
use crate::report::Reporter;
use crate::stats::RunStats;

/// Corrects subtitle files in place: the input is renamed to a backup and
/// a corrected copy is written under the original name, line by line.
pub struct FileProcessor<'a> {
    corrector: LineCorrector<'a>,
    reporter: &'a Reporter,
    write_log: bool,
    backup_extension: String,
}

impl<'a> FileProcessor<'a> {
    pub fn new(dictionary: &'a Dictionary, reporter: &'a Reporter, config: &Config) -> Self {
        Self {
            corrector: LineCorrector::new(dictionary),
            reporter,
            write_log: config.write_log,
            backup_extension: config.backup_extension.clone(),
        }
    }

    /// Processes one file: back up via rename, rewrite corrected contents,
    /// report statistics, and optionally write the corrections log.
    pub fn process(&self, path: &Path) -> anyhow::Result<RunStats> {
        info!("processing file: {}", path.display());
        let backup = sibling_with_extension(path, &self.backup_extension);
        if backup == path {
            bail!(
                "{} already has the backup extension .{}",
                path.display(),
                self.backup_extension
            );
        }
        info!("backing up as: {}", backup.display());
        if backup.exists() {
            fs::remove_file(&backup)
                .with_context(|| format!("unable to remove stale backup {}", backup.display()))?;
        }
        fs::rename(path, &backup).with_context(|| {
            format!(
                "unable to rename {} to {}",
                path.display(),
                backup.display()
            )
        })?;

        self.reporter.message(&format!("Correcting {}", path.display()));
        let stats = self.copy_contents(&backup, path)?;
        self.report_statistics(&stats);
        if self.write_log {
            self.write_corrections_log(path, &stats)?;
        }
        Ok(stats)
    }

    /// Streams the backup into the recreated file, correcting each line.
    fn copy_contents(&self, from: &Path, to: &Path) -> anyhow::Result<RunStats> {
        let reader = BufReader::new(
            File::open(from).with_context(|| format!("unable to open {}", from.display()))?,
        );
        let mut writer = BufWriter::new(
            File::create(to).with_context(|| format!("unable to create {}", to.display()))?,
        );

        let mut stats = RunStats::new();
        for line in reader.lines() {
            let line = line.with_context(|| format!("error reading {}", from.display()))?;
            debug!("line #{}: {line}", stats.lines + 1);
            let outcome = self.corrector.correct(&line);
            stats.record_line(&outcome);
            writeln!(writer, "{}", outcome.text)
                .with_context(|| format!("error writing {}", to.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("error writing {}", to.display()))?;
        Ok(stats)
    }

    fn report_statistics(&self, stats: &RunStats) {
        self.reporter.message(&format!("# Lines: {}", stats.lines));
        self.reporter.message(&format!("# Words: {}", stats.words));
        self.reporter
            .message(&format!("# Corrections: {}", stats.corrected));
    }

    fn write_corrections_log(&self, path: &Path, stats: &RunStats) -> anyhow::Result<()> {
        let log_path = sibling_with_extension(path, "log");
        fs::write(&log_path, stats.render_log())
            .with_context(|| format!("unable to create corrections log {}", log_path.display()))?;
        self.reporter
            .verbose_message(&format!("Corrections logged to {}", log_path.display()));
        Ok(())
    }
}

/// Swaps the file's extension, appending one when the name has none.
fn sibling_with_extension(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "1\n00:00:01,000 --> 00:00:03,000\n[SlNGlNG lN THE RAlN]\n\n2\n00:00:04,000 --> 00:00:06,000\nlt'II be a IoveIy day\n";

    fn quiet_config() -> (Config, Reporter) {
        let config = Config::default();
        let reporter = Reporter::new(false, true);
        (config, reporter)
    }

    #[test]
    fn process_backs_up_and_corrects_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.srt");
        fs::write(&path, SAMPLE).unwrap();

        let dictionary = Dictionary::embedded();
        let (config, reporter) = quiet_config();
        let processor = FileProcessor::new(&dictionary, &reporter, &config);
        let stats = processor.process(&path).unwrap();

        let backup = dir.path().join("movie.bak");
        assert_eq!(fs::read_to_string(&backup).unwrap(), SAMPLE);

        let corrected = fs::read_to_string(&path).unwrap();
        assert!(corrected.contains("[SINGING IN THE RAIN]"));
        assert!(corrected.contains("It'll be a lovely day"));

        assert_eq!(stats.lines, 7);
        assert_eq!(stats.corrected, 5);
    }

    #[test]
    fn stale_backup_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.srt");
        let backup = dir.path().join("movie.bak");
        fs::write(&path, "lovely\n").unwrap();
        fs::write(&backup, "old backup\n").unwrap();

        let dictionary = Dictionary::embedded();
        let (config, reporter) = quiet_config();
        let processor = FileProcessor::new(&dictionary, &reporter, &config);
        processor.process(&path).unwrap();

        assert_eq!(fs::read_to_string(&backup).unwrap(), "lovely\n");
    }

    #[test]
    fn log_file_holds_sorted_unique_pairs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.srt");
        fs::write(&path, "lf only lf\nIast lf\n").unwrap();

        let dictionary = Dictionary::embedded();
        let (mut config, reporter) = quiet_config();
        config.write_log = true;
        let processor = FileProcessor::new(&dictionary, &reporter, &config);
        processor.process(&path).unwrap();

        let log = fs::read_to_string(dir.path().join("movie.log")).unwrap();
        assert_eq!(log, "Iast=last\nlf=If\n");
    }

    #[test]
    fn no_log_file_without_the_flag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.srt");
        fs::write(&path, "lf\n").unwrap();

        let dictionary = Dictionary::embedded();
        let (config, reporter) = quiet_config();
        let processor = FileProcessor::new(&dictionary, &reporter, &config);
        processor.process(&path).unwrap();

        assert!(!dir.path().join("movie.log").exists());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let dictionary = Dictionary::embedded();
        let (config, reporter) = quiet_config();
        let processor = FileProcessor::new(&dictionary, &reporter, &config);

        assert!(processor.process(&dir.path().join("absent.srt")).is_err());
    }

    #[test]
    fn backup_extension_collision_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.bak");
        fs::write(&path, "text\n").unwrap();

        let dictionary = Dictionary::embedded();
        let (config, reporter) = quiet_config();
        let processor = FileProcessor::new(&dictionary, &reporter, &config);

        assert!(processor.process(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "text\n");
    }

    #[test]
    fn custom_backup_extension_is_used() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.srt");
        fs::write(&path, "fine\n").unwrap();

        let dictionary = Dictionary::embedded();
        let (mut config, reporter) = quiet_config();
        config.backup_extension = "orig".into();
        let processor = FileProcessor::new(&dictionary, &reporter, &config);
        processor.process(&path).unwrap();

        assert!(dir.path().join("movie.orig").exists());
    }
}
