//! Discovery of the `emacsclient` binary on the local system.
//!
//! The locator probes a fixed, ordered list of well-known install paths and
//! falls back to resolving `emacsclient` through `PATH` with `which`.
//! Absence of the executable is a normal, reportable condition, so the
//! contract is an `Option`, never an error.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::process::{CommandExecutor, SystemExecutor};

/// Tracing target for locator operations.
const LOCATOR_TARGET: &str = "emacs_plugin::locator";

/// Well-known absolute install locations, probed in order. First existing
/// path wins.
pub const WELL_KNOWN_PATHS: [&str; 4] = [
    "/usr/local/bin/emacsclient",
    "/opt/homebrew/bin/emacsclient",
    "/usr/bin/emacsclient",
    "/Applications/Emacs.app/Contents/MacOS/bin/emacsclient",
];

/// Binary used to resolve the client through `PATH`.
const WHICH_BINARY: &str = "/usr/bin/which";

/// Name of the client binary searched for on `PATH`.
const CLIENT_BINARY: &str = "emacsclient";

/// Trait for locating the external client executable.
pub trait ExecutableLocator {
    /// Returns the first discovered executable path, or `None` when the
    /// search is exhausted.
    fn find(&self) -> Option<PathBuf>;
}

/// Trait abstracting filesystem existence checks for testability.
pub trait PathProbe {
    /// Returns `true` when something exists at `path`. Existence only; no
    /// permission or executability check.
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Locates `emacsclient` via well-known paths, then a `PATH` search.
///
/// Each `find` call re-runs the full search; nothing is cached, so an
/// install or removal between invocations is observed immediately.
///
/// # Example
///
/// ```no_run
/// use emacs_plugin::locator::{EmacsclientLocator, ExecutableLocator};
///
/// let locator = EmacsclientLocator::new();
/// // `None` when emacsclient is not installed anywhere we look.
/// let _path = locator.find();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EmacsclientLocator<P = FsProbe, E = SystemExecutor> {
    probe: P,
    executor: E,
}

impl EmacsclientLocator {
    /// Creates a locator backed by the real filesystem and `which`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            probe: FsProbe,
            executor: SystemExecutor,
        }
    }
}

impl<P, E> EmacsclientLocator<P, E> {
    /// Creates a locator from explicit probe and executor parts.
    #[must_use]
    pub const fn from_parts(probe: P, executor: E) -> Self {
        Self { probe, executor }
    }
}

impl<P: PathProbe, E: CommandExecutor> ExecutableLocator for EmacsclientLocator<P, E> {
    fn find(&self) -> Option<PathBuf> {
        for candidate in WELL_KNOWN_PATHS {
            if self.probe.exists(Path::new(candidate)) {
                debug!(
                    target: LOCATOR_TARGET,
                    path = candidate,
                    "found emacsclient at well-known path"
                );
                return Some(PathBuf::from(candidate));
            }
        }
        self.search_path()
    }
}

impl<P, E: CommandExecutor> EmacsclientLocator<P, E> {
    /// Resolves the client through `PATH`. A spawn failure, non-zero exit,
    /// or empty output all mean "not found".
    fn search_path(&self) -> Option<PathBuf> {
        let outcome = self
            .executor
            .execute(Path::new(WHICH_BINARY), &[CLIENT_BINARY.to_owned()])
            .ok()?;

        if !outcome.is_success() {
            debug!(target: LOCATOR_TARGET, exit_code = outcome.exit_code(), "PATH search failed");
            return None;
        }

        let resolved = outcome.stdout().trim();
        if resolved.is_empty() {
            debug!(target: LOCATOR_TARGET, "PATH search returned no result");
            return None;
        }

        debug!(target: LOCATOR_TARGET, path = resolved, "resolved emacsclient via PATH");
        Some(PathBuf::from(resolved))
    }
}
