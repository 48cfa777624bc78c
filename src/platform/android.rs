//! Android adaptive-icon background.
//!
//! Adaptive icons take their background layer from XML resources rather
//! than from the rendered PNG. A solid background rewrites the color
//! resource; a gradient background writes a `layer-list` drawable and points
//! the adaptive-icon descriptors at it. Either way the descriptors end up
//! referencing a resource that exists.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::color::HexColor;
use crate::error::{Error, Result};
use crate::gradient::android_layer_list;
use crate::icon::BackgroundFill;

/// Color resource holding the solid background, relative to `res/`.
pub const COLOR_RESOURCE: &str = "values/ic_launcher_background.xml";

/// Gradient drawable written in gradient mode, relative to `res/`.
pub const GRADIENT_DRAWABLE: &str = "drawable/ic_launcher_background_gradient.xml";

/// Adaptive-icon descriptors whose background reference is switched.
pub const ADAPTIVE_DESCRIPTORS: [&str; 2] = [
    "mipmap-anydpi-v26/ic_launcher.xml",
    "mipmap-anydpi-v26/ic_launcher_round.xml",
];

const COLOR_REFERENCE: &str = "@color/ic_launcher_background";
const DRAWABLE_REFERENCE: &str = "@drawable/ic_launcher_background_gradient";
const RESOURCES_END: &str = "</resources>";

static COLOR_NODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<color\s+name="ic_launcher_background"\s*>)[^<]*(</color>)"#)
        .expect("color node pattern is valid")
});

static BACKGROUND_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@color/ic_launcher_background\b|@drawable/ic_launcher_background_gradient\b")
        .expect("background reference pattern is valid")
});

/// What [`apply_android_background`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AndroidPatch {
    /// The color resource was rewritten or created.
    pub color_written: bool,
    /// The gradient drawable was written.
    pub drawable_written: bool,
    /// Number of adaptive-icon descriptors whose reference changed.
    pub descriptors_updated: usize,
}

/// Applies `fill` to the Android resources under `res_dir`.
pub fn apply_android_background(res_dir: &Path, fill: BackgroundFill) -> Result<AndroidPatch> {
    let mut patch = AndroidPatch::default();
    let reference = match fill {
        BackgroundFill::Solid(color) => {
            patch.color_written = write_color_resource(&res_dir.join(COLOR_RESOURCE), color)?;
            COLOR_REFERENCE
        }
        BackgroundFill::Gradient(color) => {
            write_file(&res_dir.join(GRADIENT_DRAWABLE), &android_layer_list(color))?;
            patch.drawable_written = true;
            DRAWABLE_REFERENCE
        }
    };

    for descriptor in ADAPTIVE_DESCRIPTORS {
        if repoint_descriptor(&res_dir.join(descriptor), reference)? {
            patch.descriptors_updated += 1;
        }
    }

    tracing::info!(
        event = "android_background",
        res = %res_dir.display(),
        fill = ?fill,
        descriptors = patch.descriptors_updated,
    );
    Ok(patch)
}

/// Sets the `ic_launcher_background` color node to `color`.
///
/// An existing node is rewritten in place and a missing node is inserted
/// before `</resources>`; other resources are kept. A fresh file is written
/// only when none exists. Returns `false` and leaves the file alone when it
/// has no `</resources>` to insert into.
fn write_color_resource(path: &Path, color: HexColor) -> Result<bool> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            write_file(path, &color_resource(color))?;
            return Ok(true);
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let updated = if COLOR_NODE.is_match(&contents) {
        COLOR_NODE
            .replace(&contents, format!("${{1}}{color}${{2}}"))
            .into_owned()
    } else if let Some(end) = contents.rfind(RESOURCES_END) {
        let mut updated = String::with_capacity(contents.len() + 64);
        updated.push_str(&contents[..end]);
        updated.push_str(&format!(
            "    <color name=\"ic_launcher_background\">{color}</color>\n"
        ));
        updated.push_str(&contents[end..]);
        updated
    } else {
        tracing::warn!(event = "color_resource_unpatched", path = %path.display());
        return Ok(false);
    };

    write_file(path, &updated)?;
    Ok(true)
}

fn color_resource(color: HexColor) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n    <color name=\"ic_launcher_background\">{color}</color>\n</resources>\n"
    )
}

/// Points a descriptor's background at `reference`.
///
/// Returns whether the file changed; a missing descriptor is skipped.
fn repoint_descriptor(path: &Path, reference: &str) -> Result<bool> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::io(path, e)),
    };
    let updated = BACKGROUND_REFERENCE.replace_all(&contents, reference);
    if updated == contents {
        return Ok(false);
    }
    write_file(path, &updated)?;
    Ok(true)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DARK;

    const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<adaptive-icon xmlns:android="http://schemas.android.com/apk/res/android">
  <foreground android:drawable="@mipmap/ic_launcher_foreground"/>
  <background android:drawable="@color/ic_launcher_background"/>
</adaptive-icon>
"#;

    const COLORS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
  <color name="ic_launcher_background">#fff</color>
  <color name="accent">#123456</color>
</resources>
"#;

    fn scaffold(res: &Path) {
        for descriptor in ADAPTIVE_DESCRIPTORS {
            let path = res.join(descriptor);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, DESCRIPTOR).unwrap();
        }
        let colors = res.join(COLOR_RESOURCE);
        fs::create_dir_all(colors.parent().unwrap()).unwrap();
        fs::write(colors, COLORS).unwrap();
    }

    #[test]
    fn solid_rewrites_only_the_background_node() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold(tmp.path());

        let patch = apply_android_background(tmp.path(), BackgroundFill::Solid(DARK)).unwrap();

        let colors = fs::read_to_string(tmp.path().join(COLOR_RESOURCE)).unwrap();
        assert!(colors.contains(r##"<color name="ic_launcher_background">#171717</color>"##));
        assert!(colors.contains(r##"<color name="accent">#123456</color>"##));
        assert!(patch.color_written);
        assert_eq!(patch.descriptors_updated, 0);
        assert!(!tmp.path().join(GRADIENT_DRAWABLE).exists());
    }

    #[test]
    fn gradient_writes_drawable_and_repoints_descriptors() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold(tmp.path());

        let patch = apply_android_background(tmp.path(), BackgroundFill::Gradient(DARK)).unwrap();

        assert!(patch.drawable_written);
        assert_eq!(patch.descriptors_updated, 2);
        let drawable = fs::read_to_string(tmp.path().join(GRADIENT_DRAWABLE)).unwrap();
        assert!(drawable.contains("<layer-list"));
        for descriptor in ADAPTIVE_DESCRIPTORS {
            let contents = fs::read_to_string(tmp.path().join(descriptor)).unwrap();
            assert!(contents.contains(DRAWABLE_REFERENCE));
            assert!(!contents.contains(COLOR_REFERENCE));
            assert!(contents.contains("@mipmap/ic_launcher_foreground"));
        }
    }

    #[test]
    fn switching_back_to_solid_restores_color_reference() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold(tmp.path());

        apply_android_background(tmp.path(), BackgroundFill::Gradient(DARK)).unwrap();
        let patch = apply_android_background(tmp.path(), BackgroundFill::Solid(DARK)).unwrap();

        assert_eq!(patch.descriptors_updated, 2);
        for descriptor in ADAPTIVE_DESCRIPTORS {
            let contents = fs::read_to_string(tmp.path().join(descriptor)).unwrap();
            assert!(contents.contains(COLOR_REFERENCE));
            assert!(!contents.contains(DRAWABLE_REFERENCE));
        }
    }

    #[test]
    fn missing_background_node_is_inserted_next_to_other_colors() {
        let tmp = tempfile::tempdir().unwrap();
        let colors = tmp.path().join(COLOR_RESOURCE);
        fs::create_dir_all(colors.parent().unwrap()).unwrap();
        fs::write(
            &colors,
            "<resources>\n    <color name=\"brand\">#123456</color>\n</resources>\n",
        )
        .unwrap();

        let patch = apply_android_background(tmp.path(), BackgroundFill::Solid(DARK)).unwrap();

        assert!(patch.color_written);
        let contents = fs::read_to_string(&colors).unwrap();
        assert!(contents.contains(r##"<color name="brand">#123456</color>"##));
        assert!(contents.contains(r##"<color name="ic_launcher_background">#171717</color>"##));
        assert!(contents.trim_end().ends_with("</resources>"));
        assert_eq!(contents.matches("<resources>").count(), 1);
    }

    #[test]
    fn unterminated_color_resource_is_left_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let colors = tmp.path().join(COLOR_RESOURCE);
        fs::create_dir_all(colors.parent().unwrap()).unwrap();
        fs::write(&colors, "<resources>\n    <color name=\"brand\">#123456</color>\n").unwrap();

        let patch = apply_android_background(tmp.path(), BackgroundFill::Solid(DARK)).unwrap();

        assert!(!patch.color_written);
        assert!(fs::read_to_string(&colors).unwrap().contains("brand"));
    }

    #[test]
    fn missing_color_resource_is_created() {
        let tmp = tempfile::tempdir().unwrap();

        apply_android_background(tmp.path(), BackgroundFill::Solid(DARK)).unwrap();

        let colors = fs::read_to_string(tmp.path().join(COLOR_RESOURCE)).unwrap();
        assert!(colors.contains(r##"<color name="ic_launcher_background">#171717</color>"##));
    }
}
