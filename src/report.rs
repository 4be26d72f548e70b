use tracing::{error, info};

/// Console reporting with the quiet/verbose switches. Every message is
/// also mirrored to tracing so `RUST_LOG` captures a full run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
    quiet: bool,
}

impl Reporter {
    /// Quiet wins: a quiet reporter is never verbose.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Displays a message to the user unless quiet.
    pub fn message(&self, message: &str) {
        info!("{message}");
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Displays a message only in verbose mode.
    pub fn verbose_message(&self, message: &str) {
        info!("{message}");
        if self.verbose {
            println!("{message}");
        }
    }

    /// Displays `ERROR: <message>` on stderr unless quiet.
    pub fn error(&self, message: &str) {
        error!("{message}");
        if !self.quiet {
            eprintln!("ERROR: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        let reporter = Reporter::new(true, true);
        assert!(reporter.is_quiet());
        assert!(!reporter.is_verbose());
    }

    #[test]
    fn verbose_without_quiet_sticks() {
        let reporter = Reporter::new(true, false);
        assert!(reporter.is_verbose());
        assert!(!reporter.is_quiet());
    }

    #[test]
    fn default_reporter_is_neither() {
        let reporter = Reporter::default();
        assert!(!reporter.is_quiet());
        assert!(!reporter.is_verbose());
    }
}
