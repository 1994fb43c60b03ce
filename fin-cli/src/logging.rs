//! Log output for `fincalc`.
//!
//! Events go to stderr, leaving stdout to reports and JSON. A log file can
//! be attached once the config has been read, and the filter can be swapped
//! at any point after [`init_logging`].

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// `<timestamp> <LEVEL> <target> <fields>` on one line.
struct CliEventFormat;

/// ANSI colour for a level tag.
fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for CliEventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "{DIM}{timestamp}{RESET} {}{:>5}{RESET} {CYAN}{}{RESET} ",
                level_colour(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer for the file layer. Output is dropped until a file is attached.
#[derive(Clone, Default)]
struct LogFile(SharedFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

struct Handles {
    filter: reload::Handle<EnvFilter, Registry>,
    file: SharedFile,
}

static HANDLES: OnceLock<Handles> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    HANDLES.get().ok_or_else(|| anyhow!("logging not yet initialized"))
}

/// `RUST_LOG` if set and valid, else `default_level`, else `info`.
fn make_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Replaces the active filter. Takes a bare level such as `debug` or a full
/// `EnvFilter` directive such as `info,fin_db_sqlite=trace`.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    handles()?
        .filter
        .reload(filter)
        .map_err(|e| anyhow!("filter reload failed: {e}"))
}

/// Appends log output to `path`, replacing any file already attached. The
/// parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let handles = handles()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    *handles.file.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Runs before the config is loaded, so the
/// level starts at `default_level` (or `RUST_LOG`) and the file layer stays
/// silent until [`enable_file_logging`]. A second call is a no-op.
pub fn init_logging(default_level: &str) {
    if HANDLES.get().is_some() {
        return;
    }

    let file = LogFile::default();
    let (filter_layer, filter) = reload::Layer::new(make_filter(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CliEventFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(CliEventFormat)
        .with_ansi(false)
        .with_writer(file.clone());

    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match installed {
        Ok(()) => {
            let _ = HANDLES.set(Handles {
                filter,
                file: file.0,
            });
        }
        // Another subscriber owns the process; keep it.
        Err(e) => eprintln!("fincalc: logging not installed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_filter_falls_back_on_invalid_level() {
        let filter = make_filter("fin_cli=loud");

        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn log_file_discards_until_attached() {
        let file = LogFile::default();

        let written = file.make_writer().write(b"dropped").unwrap();

        assert_eq!(written, 7);
    }

    #[test]
    fn levels_have_distinct_colours() {
        let colours: Vec<_> = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
            .iter()
            .map(level_colour)
            .collect();

        let mut unique = colours.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), colours.len());
    }

    #[test]
    fn set_log_level_rejects_bad_directive() {
        init_logging("info");

        assert!(set_log_level("fin_cli=loud").is_err());
        assert!(set_log_level("debug").is_ok());
    }
}
