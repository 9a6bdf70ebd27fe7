//! Colors for borders and ownership regions

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ownership::OwnershipRelation;

/// RGBA color, channels in `0.0..=1.0`
pub type RegionColor = [f32; 4];

/// Color from 8-bit channels and a float alpha
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> RegionColor {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// CSS `rgba()` notation, e.g. for SVG or HTML canvas styles
pub fn to_css(color: RegionColor) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3]
    )
}

/// Trait for mapping ownership relations to colors
pub trait ColorMapper {
    /// Fill color for a region, `None` for regions that are not filled
    fn fill_color(&self, relation: OwnershipRelation) -> Option<RegionColor>;

    /// Stroke color for faction borders
    fn border_color(&self) -> RegionColor;
}

/// Overlay colors
///
/// The defaults are translucent so the map stays readable underneath.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Fill for the viewer's own regions
    pub own: RegionColor,
    /// Fill for allied regions
    pub ally: RegionColor,
    /// Fill for every other owned region
    pub enemy: RegionColor,
    /// Border stroke
    pub border: RegionColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            own: rgba(242, 248, 253, 0.1),
            ally: rgba(81, 234, 255, 0.2),
            enemy: rgba(248, 92, 80, 0.2),
            border: rgba(242, 248, 253, 0.3),
        }
    }
}

impl Palette {
    /// Replace the border color with one picked at random from `choices`
    ///
    /// Keeps the current border when `choices` is empty.
    pub fn with_random_border(mut self, choices: &[RegionColor], seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        if let Some(&color) = choices.choose(&mut rng) {
            self.border = color;
        }
        self
    }
}

impl ColorMapper for Palette {
    fn fill_color(&self, relation: OwnershipRelation) -> Option<RegionColor> {
        match relation {
            OwnershipRelation::SelfOwned => Some(self.own),
            OwnershipRelation::Ally => Some(self.ally),
            OwnershipRelation::Other => Some(self.enemy),
            OwnershipRelation::Unowned => None,
        }
    }

    fn border_color(&self) -> RegionColor {
        self.border
    }
}

/// Pick two colors at random (with replacement) from `choices`
///
/// Returns `None` if `choices` is empty.
pub fn pick_colors<R: rand::Rng + ?Sized>(
    choices: &[RegionColor],
    rng: &mut R,
) -> Option<(RegionColor, RegionColor)> {
    let first = *choices.choose(rng)?;
    let second = *choices.choose(rng)?;
    Some((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_is_translucent() {
        let palette = Palette::default();
        for color in [palette.own, palette.ally, palette.enemy, palette.border] {
            assert!(color[3] > 0.0 && color[3] < 1.0);
        }
        // Enemy is red-dominant, ally is blue-dominant
        assert!(palette.enemy[0] > palette.enemy[2]);
        assert!(palette.ally[2] > palette.ally[0]);
    }

    #[test]
    fn test_unowned_has_no_fill() {
        let palette = Palette::default();
        assert_eq!(palette.fill_color(OwnershipRelation::Unowned), None);
        assert_eq!(palette.fill_color(OwnershipRelation::SelfOwned), Some(palette.own));
        assert_eq!(palette.fill_color(OwnershipRelation::Ally), Some(palette.ally));
        assert_eq!(palette.fill_color(OwnershipRelation::Other), Some(palette.enemy));
    }

    #[test]
    fn test_css_notation() {
        assert_eq!(to_css(rgba(248, 92, 80, 0.2)), "rgba(248, 92, 80, 0.2)");
    }

    #[test]
    fn test_random_border_is_deterministic() {
        let choices = [rgba(244, 162, 97, 1.0), rgba(42, 157, 143, 1.0), rgba(233, 196, 106, 1.0)];
        let a = Palette::default().with_random_border(&choices, 11);
        let b = Palette::default().with_random_border(&choices, 11);
        assert_eq!(a.border, b.border);
        assert!(choices.contains(&a.border));

        let untouched = Palette::default().with_random_border(&[], 11);
        assert_eq!(untouched.border, Palette::default().border);
    }

    #[test]
    fn test_pick_colors() {
        let single = [rgba(244, 162, 97, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(pick_colors(&single, &mut rng), Some((single[0], single[0])));
        assert_eq!(pick_colors(&[], &mut rng), None);
    }
}
