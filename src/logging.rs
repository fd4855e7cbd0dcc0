use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// How much the binary logs, from `-q` up to `-vvv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn directive(self) -> String {
        format!("license_detector={}", self.level())
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// flag-derived level. Logs go to stderr so report output on stdout stays
/// machine-readable.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    let detailed = verbosity >= Verbosity::Debug;

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(detailed)
        .with_line_number(detailed)
        .compact();

    if detailed {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
