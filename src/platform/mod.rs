//! Target platforms and their static configuration.
//!
//! Each platform knows how its icon is rendered (padding, tile, background
//! policy) and which directory of the Tauri project holds the icons the
//! external generator writes for it.

pub mod android;
pub mod backup;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::MaskShape;
use crate::icon::{BackgroundFill, IconSpec};
pub use backup::{BackupStore, Ownership, ProtectedDir};

/// A platform the icon can be generated for.
///
/// Variants are declared in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Windows,
    Macos,
    Android,
    Ios,
}

impl Platform {
    /// Every platform, in processing order.
    pub const ALL: [Platform; 4] = [Self::Windows, Self::Macos, Self::Android, Self::Ios];

    /// Stable identifier used for file and backup names.
    pub fn key(&self) -> &'static str {
        self.config().key
    }

    /// Human-readable name shown in prompts and progress output.
    pub fn display_name(&self) -> &'static str {
        self.config().display_name
    }

    pub fn config(&self) -> &'static PlatformConfig {
        match self {
            Self::Windows => &PLATFORMS[0],
            Self::Macos => &PLATFORMS[1],
            Self::Android => &PLATFORMS[2],
            Self::Ios => &PLATFORMS[3],
        }
    }
}

/// Whether a platform paints the user's background behind the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundPolicy {
    /// Always transparent (Android gets its background from XML instead).
    Transparent,
    /// Uses the background chosen in the prompts.
    UserChoice,
}

/// Static description of one platform.
#[derive(Debug)]
pub struct PlatformConfig {
    pub platform: Platform,
    pub key: &'static str,
    pub display_name: &'static str,
    /// Icon padding inside the tile.
    pub padding: f64,
    /// Transparent margin around the tile, if the tile floats.
    pub tile_inset: Option<f64>,
    pub background: BackgroundPolicy,
    /// Whether the user's mask shape is applied to the tile.
    pub masked: bool,
    /// Project path that must exist for the platform to be offered.
    pub prerequisite: Option<&'static str>,
    /// Directory the external generator writes this platform's icons to.
    pub protected_dir: &'static str,
    /// Which files inside `protected_dir` belong to this platform.
    pub ownership: Ownership,
}

/// The platform table. Read-only for the lifetime of the process.
pub static PLATFORMS: [PlatformConfig; 4] = [
    PlatformConfig {
        platform: Platform::Windows,
        key: "windows",
        display_name: "Windows / Linux",
        padding: 0.0,
        tile_inset: None,
        background: BackgroundPolicy::Transparent,
        masked: false,
        prerequisite: Some("src-tauri"),
        protected_dir: "src-tauri/icons",
        ownership: Ownership::AllExcept(&["icon.icns"]),
    },
    PlatformConfig {
        platform: Platform::Macos,
        key: "macos",
        display_name: "macOS",
        padding: 0.1,
        tile_inset: Some(0.12),
        background: BackgroundPolicy::UserChoice,
        masked: true,
        prerequisite: Some("src-tauri"),
        protected_dir: "src-tauri/icons",
        ownership: Ownership::Only(&["icon.icns"]),
    },
    PlatformConfig {
        platform: Platform::Android,
        key: "android",
        display_name: "Android",
        padding: 0.25,
        tile_inset: None,
        background: BackgroundPolicy::Transparent,
        masked: false,
        prerequisite: Some("src-tauri/gen/android"),
        protected_dir: "src-tauri/gen/android/app/src/main/res",
        ownership: Ownership::All,
    },
    PlatformConfig {
        platform: Platform::Ios,
        key: "ios",
        display_name: "iOS",
        padding: 0.15,
        tile_inset: None,
        background: BackgroundPolicy::UserChoice,
        masked: false,
        prerequisite: Some("src-tauri/gen/apple"),
        protected_dir: "src-tauri/gen/apple/Assets.xcassets/AppIcon.appiconset",
        ownership: Ownership::All,
    },
];

impl PlatformConfig {
    /// True when the project scaffold this platform needs is present.
    pub fn is_available(&self, root: &Path) -> bool {
        self.prerequisite
            .is_none_or(|prerequisite| root.join(prerequisite).exists())
    }

    /// The guarded icon directory of this platform inside `root`.
    pub fn protected(&self, root: &Path) -> ProtectedDir {
        ProtectedDir::new(self.key, root.join(self.protected_dir), self.ownership)
    }

    /// Builds the render spec for this platform.
    pub fn icon_spec(
        &self,
        input: &Path,
        output: PathBuf,
        fill: BackgroundFill,
        shape: Option<MaskShape>,
    ) -> Result<IconSpec> {
        let background = match self.background {
            BackgroundPolicy::Transparent => None,
            BackgroundPolicy::UserChoice => Some(fill),
        };
        let mut spec = IconSpec::new(input, output)
            .with_padding(self.padding)?
            .with_background(background)
            .with_shape(if self.masked { shape } else { None });
        if let Some(inset) = self.tile_inset {
            spec = spec.with_tile_inset(inset)?;
        }
        Ok(spec)
    }
}

/// Whether a platform can be offered in this project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub platform: Platform,
    pub available: bool,
}

/// Checks every platform's prerequisite against the project at `root`.
pub fn availability(root: &Path) -> Vec<Availability> {
    PLATFORMS
        .iter()
        .map(|config| Availability {
            platform: config.platform,
            available: config.is_available(root),
        })
        .collect()
}
