/// Base -> target palette correspondence
///
/// Base color `i` maps to target color `i`. A target palette shorter than
/// the base palette is repeated cyclically, so both arrays always have the
/// base palette's length.

use anyhow::{ensure, Context, Result};

use super::color::RgbColor;

#[derive(Clone, Debug, PartialEq)]
pub struct PaletteMap {
    base: Vec<RgbColor>,
    target: Vec<RgbColor>,
}

impl PaletteMap {
    /// Build the correspondence from hex palettes. Any malformed color fails the whole map.
    pub fn build<S: AsRef<str>>(base_palette: &[S], target_palette: &[S]) -> Result<Self> {
        let base = parse_palette(base_palette, "base")?;
        let target = parse_palette(target_palette, "target")?;
        Self::from_colors(base, target)
    }

    pub fn from_colors(base: Vec<RgbColor>, target: Vec<RgbColor>) -> Result<Self> {
        ensure!(!base.is_empty(), "Base palette is empty");
        ensure!(!target.is_empty(), "Target palette is empty");

        // Excess target colors are never addressed; a short target wraps around.
        let target = target.iter().copied().cycle().take(base.len()).collect();

        Ok(Self { base, target })
    }

    #[cfg(test)]
    pub fn target(&self) -> &[RgbColor] {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Index of the closest base color. Lowest index wins on ties.
    pub fn nearest_index(&self, color: RgbColor) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;
        for (idx, base) in self.base.iter().enumerate() {
            let dist = color.distance_sq(*base);
            if dist < best_dist {
                best_idx = idx;
                best_dist = dist;
                if dist == 0 {
                    break;
                }
            }
        }
        best_idx
    }

    /// Replacement color for `color`
    #[inline]
    pub fn map_color(&self, color: RgbColor) -> RgbColor {
        self.target[self.nearest_index(color)]
    }
}

fn parse_palette<S: AsRef<str>>(palette: &[S], which: &str) -> Result<Vec<RgbColor>> {
    palette
        .iter()
        .enumerate()
        .map(|(i, hex)| {
            RgbColor::from_hex(hex.as_ref())
                .with_context(|| format!("Bad color at {} palette index {}", which, i))
        })
        .collect()
}
