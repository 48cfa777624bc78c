//! tauri-iconsmith: platform icon generation for Tauri projects
//!
//! This crate renders one source icon into a padded, optionally masked and
//! backgrounded 1024px PNG per target platform, feeds each PNG to the Tauri
//! icon generator, and reconciles the icon directories the generator
//! overwrites so every platform ends up with its own assets.
//!
//! # Example
//!
//! ```
//! use tauri_iconsmith::{Layout, TARGET_SIZE};
//!
//! // macOS: the tile floats 12% in from the canvas edge, the icon sits 10%
//! // inside the tile.
//! let layout = Layout::compute(TARGET_SIZE, Some(0.12), 0.1)?;
//! assert_eq!(layout.tile.x, 123);
//! assert_eq!(layout.tile.width, 778);
//! # Ok::<(), tauri_iconsmith::Error>(())
//! ```
//!
//! # Running the pipeline
//!
//! [`run`] drives everything. Options come from an [`OptionSource`]: the
//! binary prompts interactively, while callers can pass prepared
//! [`RunOptions`]. The external tool sits behind [`IconGenerator`].
//!
//! ```no_run
//! use tauri_iconsmith::{MaskShape, Platform, Project, RunOptions, TauriIconCli, color, run};
//!
//! let project = Project::new(".");
//! let mut options = RunOptions::new([Platform::Macos], color::DARK)
//!     .with_shape(Some(MaskShape::Squircle));
//! let report = run(&project, &mut options, &TauriIconCli::new(project.root()))?;
//! println!("{}", report.options.to_json_pretty()?);
//! # Ok::<(), tauri_iconsmith::Error>(())
//! ```

pub mod color;
pub mod compositor;
mod error;
pub mod external;
pub mod geometry;
pub mod gradient;
mod icon;
pub mod options;
pub mod orchestrator;
pub mod platform;
pub mod prompt;
pub mod ui;

pub use color::HexColor;
pub use error::{Error, Result};
pub use external::{IconGenerator, TauriIconCli};
pub use geometry::{Layout, MaskShape, TARGET_SIZE};
pub use gradient::GradientVariant;
pub use icon::{BackgroundFill, IconSpec, RectPx};
pub use options::RunOptions;
pub use orchestrator::{Project, RunReport, Workspace, run};
pub use platform::{Platform, PlatformConfig};
pub use prompt::{InteractivePrompter, OptionSource};
