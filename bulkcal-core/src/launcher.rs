//! Seams to the outside world: external applications and the user.
//!
//! The pipeline only talks to these traits, so it runs the same on every
//! platform and can be tested without spawning processes or reading stdin.

use std::io;
use std::path::Path;

use crate::error::BulkCalResult;

/// Launches external applications for a file
pub trait Launcher {
    /// Open `path` in a spreadsheet editor. Must not wait for the editor to exit.
    fn open_in_editor(&self, path: &Path) -> io::Result<()>;

    /// Show `path` in the platform file manager
    fn reveal(&self, path: &Path) -> io::Result<()>;
}

/// Blocks until the user confirms they are done
pub trait Prompt {
    fn wait_for_user(&self, message: &str) -> BulkCalResult<()>;
}
