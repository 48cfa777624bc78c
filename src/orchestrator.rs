//! End-to-end run: render, generate, reconcile.
//!
//! ```text
//! workspace ─▶ input icon ─▶ options ─▶ backup all ─┐
//!                                                   ▼
//!          ┌─ for each selected platform (table order) ─────────────┐
//!          │ compose render/<key>.png ─▶ generator ─▶ snapshot into │
//!          │ generated/<key> ─▶ restore every platform from original│
//!          └────────────────────────────────────────────────────────┘
//!                                                   ▼
//!            restore selected from generated ─▶ Android background
//! ```
//!
//! Platforms are processed strictly one after another: the generator
//! rewrites the whole icon tree on each call, so overlapping calls would
//! race on the same directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::compositor;
use crate::error::{Error, Result};
use crate::external::IconGenerator;
use crate::options::RunOptions;
use crate::platform::android::{AndroidPatch, apply_android_background};
use crate::platform::{Availability, BackupStore, PLATFORMS, Platform};
use crate::prompt::OptionSource;
use crate::ui;

/// Candidate source icons under `assets/`, in priority order.
pub const INPUT_CANDIDATES: [&str; 4] = ["icon.svg", "icon.png", "icon.jpg", "icon.jpeg"];

/// Prefix of the per-run working directory inside `assets/`.
pub const WORKSPACE_PREFIX: &str = ".icon-gen-";

/// A Tauri project on disk.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    /// The first existing candidate icon.
    pub fn resolve_input_icon(&self) -> Result<PathBuf> {
        let assets = self.assets_dir();
        let found = INPUT_CANDIDATES
            .iter()
            .map(|name| assets.join(name))
            .find(|path| path.is_file());
        found.ok_or(Error::MissingInputIcon(assets))
    }

    pub fn availability(&self) -> Vec<Availability> {
        crate::platform::availability(&self.root)
    }
}

/// Per-run scratch space. Removed when dropped.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates the workspace inside `assets`, creating `assets` if needed.
    pub fn create(assets: &Path) -> Result<Self> {
        fs::create_dir_all(assets).map_err(|e| Error::io(assets, e))?;
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(assets)
            .map_err(|e| Error::io(assets, e))?;
        for sub in ["render", "original", "generated"] {
            let path = dir.path().join(sub);
            fs::create_dir(&path).map_err(|e| Error::io(&path, e))?;
        }
        tracing::debug!(event = "workspace_created", path = %dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where the composed icon for `platform` is written.
    pub fn render_path(&self, platform: Platform) -> PathBuf {
        self.path()
            .join("render")
            .join(format!("{}.png", platform.key()))
    }

    /// Snapshots taken before any generator call.
    pub fn originals(&self) -> BackupStore {
        BackupStore::new(self.path().join("original"))
    }

    /// Snapshots of each platform's freshly generated files.
    pub fn generated(&self) -> BackupStore {
        BackupStore::new(self.path().join("generated"))
    }

    /// Removes the directory, reporting failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        let path = self.path().to_path_buf();
        self.dir.close().map_err(|e| Error::io(&path, e))?;
        tracing::debug!(event = "workspace_removed", path = %path.display());
        Ok(())
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub options: RunOptions,
    pub input: PathBuf,
    /// Platforms rendered and generated, in processing order.
    pub rendered: Vec<Platform>,
    /// Platforms whose generated files were put back in place.
    pub restored: Vec<Platform>,
    pub android: Option<AndroidPatch>,
}

/// Runs the whole pipeline for `project`.
///
/// The workspace is removed on every exit path. On failure the live icon
/// directories are left as the last step put them; the project can be
/// regenerated by running again.
pub fn run(
    project: &Project,
    options: &mut impl OptionSource,
    generator: &impl IconGenerator,
) -> Result<RunReport> {
    let input = project.resolve_input_icon()?;
    tracing::info!(event = "input_icon", path = %input.display());

    let workspace = ui::step("Preparing workspace", || {
        Workspace::create(&project.assets_dir())
    })?;
    let report = run_in(project, &workspace, input, options, generator)?;
    ui::step("Cleaning up", || workspace.close())?;
    Ok(report)
}

fn run_in(
    project: &Project,
    workspace: &Workspace,
    input: PathBuf,
    source: &mut impl OptionSource,
    generator: &impl IconGenerator,
) -> Result<RunReport> {
    let options = source.collect(&project.availability())?;
    let platforms = options.ordered_platforms();
    if platforms.is_empty() {
        return Err(Error::NoPlatformsAvailable);
    }
    if let Ok(json) = options.to_json() {
        tracing::info!(event = "run_options", options = %json);
    }

    let root = project.root();
    let originals = workspace.originals();
    let generated = workspace.generated();

    ui::step("Backing up existing icons", || -> Result<()> {
        for config in &PLATFORMS {
            config.protected(root).backup(&originals)?;
        }
        Ok(())
    })?;

    let fill = options.fill();
    let mut rendered = Vec::with_capacity(platforms.len());
    for platform in &platforms {
        let config = platform.config();
        let output = workspace.render_path(*platform);

        ui::step(&format!("Rendering {}", config.display_name), || -> Result<()> {
            let spec = config.icon_spec(&input, output.clone(), fill, options.shape)?;
            compositor::compose(&spec)
        })?;

        ui::step(&format!("Generating {} assets", config.display_name), || {
            generator.generate(&output)
        })?;

        ui::step(&format!("Reconciling {} assets", config.display_name), || -> Result<()> {
            config.protected(root).backup(&generated)?;
            for other in &PLATFORMS {
                other.protected(root).restore(&originals)?;
            }
            Ok(())
        })?;

        tracing::info!(event = "platform_generated", platform = platform.key());
        rendered.push(*platform);
    }

    let mut restored = Vec::with_capacity(platforms.len());
    let android = ui::step("Restoring generated icons", || -> Result<Option<AndroidPatch>> {
        for platform in &platforms {
            if platform.config().protected(root).restore(&generated)? {
                restored.push(*platform);
            }
        }
        if options.includes(Platform::Android) {
            let res_dir = Platform::Android.config().protected(root);
            return apply_android_background(res_dir.dir(), fill).map(Some);
        }
        Ok(None)
    })?;

    Ok(RunReport {
        options,
        input,
        rendered,
        restored,
        android,
    })
}
