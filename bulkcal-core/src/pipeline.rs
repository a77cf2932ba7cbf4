//! One run: provision the template if needed, read the rows, write the
//! calendar, clean up and reveal the result.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::BulkCalResult;
use crate::ics;
use crate::launcher::{Launcher, Prompt};
use crate::sheet;

pub const EDIT_PROMPT: &str = "Add events to the file, save it and press RETURN to continue...";

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Pre-filled spreadsheet. When `None` a template is created at `template_path`.
    pub input: Option<PathBuf>,
    pub output: PathBuf,
    pub template_path: PathBuf,
    pub reveal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub events: usize,
    pub output: PathBuf,
    pub template_created: bool,
}

/// A template created by this run. Removed on drop, so error paths clean up too.
#[derive(Debug)]
pub struct TemplateFile {
    path: PathBuf,
    cleaned: bool,
}

impl TemplateFile {
    /// Write a blank template to `path`.
    pub fn create(path: &Path) -> BulkCalResult<Self> {
        info!("Creating events sheet at {}...", path.display());
        // Guard first, so a half-written template is removed as well
        let template = TemplateFile {
            path: path.to_path_buf(),
            cleaned: false,
        };
        sheet::write_template(&template.path)?;
        Ok(template)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the template now, reporting failures. A missing file is fine.
    pub fn cleanup(mut self) -> BulkCalResult<()> {
        self.cleaned = true;
        remove_if_exists(&self.path)
    }
}

impl Drop for TemplateFile {
    fn drop(&mut self) {
        if !self.cleaned
            && let Err(e) = remove_if_exists(&self.path)
        {
            warn!("Could not remove {}: {}", self.path.display(), e);
        }
    }
}

fn remove_if_exists(path: &Path) -> BulkCalResult<()> {
    if path.exists() {
        debug!("Removing {}", path.display());
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Create the template, open it for editing and wait until the user is done.
pub fn provision_template(
    path: &Path,
    launcher: &dyn Launcher,
    prompt: &dyn Prompt,
) -> BulkCalResult<TemplateFile> {
    let template = TemplateFile::create(path)?;

    info!("Opening events file...");
    if let Err(e) = launcher.open_in_editor(template.path()) {
        warn!("Could not open {}: {}", template.path().display(), e);
    }

    prompt.wait_for_user(EDIT_PROMPT)?;
    Ok(template)
}

pub fn run(
    options: &RunOptions,
    launcher: &dyn Launcher,
    prompt: &dyn Prompt,
) -> BulkCalResult<RunSummary> {
    let (input, template) = match &options.input {
        Some(path) => (path.clone(), None),
        None => {
            let template = provision_template(&options.template_path, launcher, prompt)?;
            (template.path().to_path_buf(), Some(template))
        }
    };

    let events = sheet::load_events(&input)?;
    info!("Loaded {} events from {}", events.len(), input.display());

    ics::export_ics(&events, &options.output)?;

    let template_created = template.is_some();
    if let Some(template) = template {
        template.cleanup()?;
    }

    if options.reveal
        && let Err(e) = launcher.reveal(&options.output)
    {
        warn!("Could not reveal {}: {}", options.output.display(), e);
    }

    Ok(RunSummary {
        events: events.len(),
        output: options.output.clone(),
        template_created,
    })
}
