use anyhow::{Context, Result};
use image::RgbaImage;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::palette::{PaletteMap, RgbColor};

pub struct ImageRecolorer<'a> {
    map: &'a PaletteMap,
}

impl<'a> ImageRecolorer<'a> {
    pub fn new(map: &'a PaletteMap) -> Self {
        Self { map }
    }

    /// Load `input`, recolor it and write the RGBA result to `output`.
    /// Returns the number of pixels that were recolored.
    pub fn recolor_file(&self, input: &Path, output: &Path) -> Result<usize> {
        let mut image = image::open(input)
            .with_context(|| format!("Failed to open image {}", input.display()))?
            .to_rgba8();

        let recolored = self.recolor_pixels(&mut image);

        if let Some(dir) = output.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory {}", dir.display()))?;
            }
        }

        image
            .save(output)
            .with_context(|| format!("Failed to write image {}", output.display()))?;

        Ok(recolored)
    }

    // Pixels with alpha == 0 keep their RGB bytes untouched; alpha is carried over as-is.
    pub fn recolor_pixels(&self, image: &mut RgbaImage) -> usize {
        // Memoized per distinct RGB value
        let mut cache: HashMap<RgbColor, RgbColor> = HashMap::with_capacity(256);
        let mut recolored = 0;

        for px in image.pixels_mut() {
            let [r, g, b, a] = px.0;
            if a == 0 {
                continue;
            }

            let RgbColor(nr, ng, nb) = *cache
                .entry(RgbColor(r, g, b))
                .or_insert_with_key(|&color| self.map.map_color(color));
            px.0 = [nr, ng, nb, a];
            recolored += 1;
        }

        recolored
    }
}
