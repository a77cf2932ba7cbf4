use std::io;
use std::path::Path;
use std::process::Command;

use bulkcal_core::launcher::Launcher;

/// Opens files with the platform's own tools
pub struct SystemLauncher {
    /// Application to open the template with, otherwise the default for .xlsx
    pub editor: Option<String>,
}

impl Launcher for SystemLauncher {
    fn open_in_editor(&self, path: &Path) -> io::Result<()> {
        match &self.editor {
            Some(app) => open::with_detached(path, app),
            None => open::that_detached(path),
        }
    }

    fn reveal(&self, path: &Path) -> io::Result<()> {
        if cfg!(target_os = "macos") {
            Command::new("open").arg("-R").arg(path).status().map(|_| ())
        } else if cfg!(target_os = "windows") {
            let mut select = std::ffi::OsString::from("/select,");
            select.push(path);
            Command::new("explorer").arg(select).status().map(|_| ())
        } else {
            // No portable "select" for Linux file managers, open the folder instead
            open::that_detached(containing_dir(path))
        }
    }
}

/// Directory holding `path`; "." for a bare filename like `cal.ics`
fn containing_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => path,
    }
}
