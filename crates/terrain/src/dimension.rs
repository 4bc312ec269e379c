//! Vertical extent of the world a column belongs to

use blockwire_config::DecoderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    /// Whether light payloads carry sky light arrays
    pub has_sky_light: bool,
    /// Section y of the lowest section
    pub min_section: i32,
    pub section_count: u32,
}

impl Default for Dimension {
    fn default() -> Self {
        Self::new(true, 0, 16)
    }
}

impl Dimension {
    pub const fn new(has_sky_light: bool, min_section: i32, section_count: u32) -> Self {
        Self {
            has_sky_light,
            min_section,
            section_count,
        }
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(
            config.dimension_sky_light,
            config.dimension_min_section,
            config.dimension_section_count,
        )
    }

    pub fn max_section(&self) -> i32 {
        self.min_section + self.section_count as i32 - 1
    }

    /// Section y of the `index`-th section from the bottom
    pub fn section_y(&self, index: usize) -> i32 {
        self.min_section + index as i32
    }
}
