// prefs.rs: container I/O preferences and the display-level globals.
//
// - `DISPLAY_LEVEL` is a process-wide `AtomicI32` so batch workers can log
//   without locking.  The library default is 0 (silent); the CLI raises it.
// - `Prefs` is a plain value type owned by the caller.  Setters take
//   `&mut self` and return the value stored.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::lzo::WorkspaceSource;

// ---------------------------------------------------------------------------
// Display / notification globals
// ---------------------------------------------------------------------------

/// Global notification level. 0 = silent, 1 = errors only, 2 = results +
/// warnings, 3 = progress, 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(0);

/// Write `msg` to stderr if the current notification level is ≥ `level`.
/// Flushes stderr when level ≥ 4.
#[inline]
pub fn display_level(level: i32, msg: &str) {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= level {
        eprint!("{}", msg);
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}

/// Sets the global notification level. Returns the value stored.
pub fn set_notification_level(level: i32) -> i32 {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
    level
}

/// Current global notification level.
#[inline]
pub fn notification_level() -> i32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Preferences struct
// ---------------------------------------------------------------------------

/// Options shared by every container operation.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Replace an existing destination file. Default: true.
    pub overwrite: bool,
    /// Write the destination through a temporary file in the same directory
    /// and rename it into place. Default: false.
    pub atomic: bool,
    /// Copy the source file's modification time onto the destination.
    /// Default: false.
    pub preserve_mtime: bool,
    /// Where compressions get their workspace from. Default: per call.
    pub workspace: WorkspaceSource,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: true,
            atomic: false,
            preserve_mtime: false,
            workspace: WorkspaceSource::PerCall,
        }
    }
}

impl Prefs {
    /// Creates a new `Prefs` with all defaults applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables destination-file overwrite. Returns the new value.
    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    /// Enables or disables temp-file-plus-rename writes. Returns the new value.
    pub fn set_atomic(&mut self, yes: bool) -> bool {
        self.atomic = yes;
        yes
    }

    /// Enables or disables copying the source mtime. Returns the new value.
    pub fn set_preserve_mtime(&mut self, yes: bool) -> bool {
        self.preserve_mtime = yes;
        yes
    }

    /// Switches compressions to lease workspaces from a shared pool.
    pub fn use_workspace_pool(&mut self) {
        if !matches!(self.workspace, WorkspaceSource::Pooled(_)) {
            self.workspace = WorkspaceSource::pooled();
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
