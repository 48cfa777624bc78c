//! Collecting run options.
//!
//! The binary asks interactively through [`InteractivePrompter`]; tests and
//! programmatic callers hand in a prepared [`RunOptions`] instead. Both go
//! through [`OptionSource`].

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

use crate::color::{self, HexColor};
use crate::error::{Error, Result};
use crate::geometry::MaskShape;
use crate::options::RunOptions;
use crate::platform::{Availability, Platform};

/// Produces the options for a run, given which platforms can be built.
pub trait OptionSource {
    fn collect(&mut self, available: &[Availability]) -> Result<RunOptions>;
}

fn available_platforms(available: &[Availability]) -> Vec<Platform> {
    available
        .iter()
        .filter(|a| a.available)
        .map(|a| a.platform)
        .collect()
}

/// Prepared options drop the platforms whose scaffold is missing.
impl OptionSource for RunOptions {
    fn collect(&mut self, available: &[Availability]) -> Result<RunOptions> {
        let usable = available_platforms(available);
        let mut options = self.clone();
        options.platforms.retain(|platform| {
            let keep = usable.contains(platform);
            if !keep {
                tracing::warn!(event = "platform_unavailable", platform = platform.key());
            }
            keep
        });
        if options.platforms.is_empty() {
            return Err(Error::NoPlatformsAvailable);
        }
        Ok(options)
    }
}

/// Terminal prompts.
pub struct InteractivePrompter {
    theme: ColorfulTheme,
}

impl Default for InteractivePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractivePrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn platforms(&self, usable: &[Platform]) -> Result<Vec<Platform>> {
        let items: Vec<&str> = usable.iter().map(|p| p.display_name()).collect();
        let defaults = vec![true; items.len()];
        loop {
            let chosen = MultiSelect::with_theme(&self.theme)
                .with_prompt("Which platforms should get new icons? (space to toggle)")
                .items(&items)
                .defaults(&defaults)
                .interact()?;
            if !chosen.is_empty() {
                return Ok(chosen.into_iter().map(|index| usable[index]).collect());
            }
            crate::ui::print_warning("Select at least one platform.");
        }
    }

    fn background(&self) -> Result<HexColor> {
        let items = [
            format!("Light ({})", color::LIGHT),
            format!("Dark ({})", color::DARK),
            "Custom hex color".to_string(),
        ];
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Background color")
            .items(&items)
            .default(1)
            .interact()?;
        match choice {
            0 => Ok(color::LIGHT),
            1 => Ok(color::DARK),
            _ => {
                let input: String = Input::with_theme(&self.theme)
                    .with_prompt("Hex color (#RRGGBB)")
                    .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
                        if HexColor::is_valid(input.trim()) {
                            Ok(())
                        } else {
                            Err("expected a color like #1A2B3C")
                        }
                    })
                    .interact_text()?;
                input.parse()
            }
        }
    }

    fn shape(&self) -> Result<Option<MaskShape>> {
        let shapes = [Some(MaskShape::Squircle), Some(MaskShape::RoundedRectangle), None];
        let items: Vec<&str> = shapes
            .iter()
            .map(|shape| shape.map_or("None (square tile)", |s| s.label()))
            .collect();
        let choice = Select::with_theme(&self.theme)
            .with_prompt("macOS tile shape")
            .items(&items)
            .default(0)
            .interact()?;
        Ok(shapes[choice])
    }

    fn gradient(&self) -> Result<bool> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Background style")
            .items(&["Solid color", "Gradient"])
            .default(0)
            .interact()?;
        Ok(choice == 1)
    }
}

impl OptionSource for InteractivePrompter {
    fn collect(&mut self, available: &[Availability]) -> Result<RunOptions> {
        let usable = available_platforms(available);
        for unavailable in available.iter().filter(|a| !a.available) {
            crate::ui::print_info(&format!(
                "{} skipped: project scaffold not found",
                unavailable.platform.display_name()
            ));
        }
        if usable.is_empty() {
            return Err(Error::NoPlatformsAvailable);
        }

        let platforms = self.platforms(&usable)?;
        let background = self.background()?;
        let shape = if platforms.contains(&Platform::Macos) {
            self.shape()?
        } else {
            None
        };
        let gradient = self.gradient()?;

        Ok(RunOptions::new(platforms, background)
            .with_shape(shape)
            .with_gradient(gradient))
    }
}
