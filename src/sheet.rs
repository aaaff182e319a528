//! Sprite-sheet decoding
//!
//! A sheet is a 3x3 grid of equally sized cells. Decoding slices the grid
//! into standalone RGBA sprites in row-major order and, for sources without
//! an alpha channel, rewrites near-white pixels to transparent with a
//! distance-keyed fade so anti-aliased edges keep a soft silhouette.

use std::path::Path;

use anyhow::{Context, Result, bail};
use image::{DynamicImage, RgbaImage, imageops};

use crate::consts::*;

/// A single sprite cut from a sheet.
#[derive(Debug, Clone)]
pub struct SpriteImage {
    /// Flat index: sheet order, then row-major within the sheet
    pub id: u32,
    pub image: RgbaImage,
}

/// An ordered pool of decoded sprites sharing one cell size.
///
/// Slot tables address sprites by flat index, so the order in `sprites` is
/// load-bearing: sheets ascending, cells row-major within each sheet.
#[derive(Debug, Clone, Default)]
pub struct SpritePool {
    pub sprites: Vec<SpriteImage>,
    pub sprite_width: u32,
    pub sprite_height: u32,
}

impl SpritePool {
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&SpriteImage> {
        self.sprites.get(id as usize)
    }
}

/// Slice one sheet into its nine sprites.
///
/// `has_transparency` marks sources that already carry alpha; the white
/// matte is skipped for those.
pub fn decode_sheet(sheet: &DynamicImage, has_transparency: bool) -> Result<SpritePool> {
    let mut rgba = sheet.to_rgba8();
    let (w, h) = rgba.dimensions();
    let cell_w = w / SHEET_COLS;
    let cell_h = h / SHEET_ROWS;
    if cell_w == 0 || cell_h == 0 {
        bail!(
            "sheet {}x{} is smaller than its {}x{} grid",
            w,
            h,
            SHEET_COLS,
            SHEET_ROWS
        );
    }

    if !has_transparency {
        key_out_white(&mut rgba);
    }

    let mut sprites = Vec::with_capacity((SHEET_COLS * SHEET_ROWS) as usize);
    for row in 0..SHEET_ROWS {
        for col in 0..SHEET_COLS {
            let cell =
                imageops::crop_imm(&rgba, col * cell_w, row * cell_h, cell_w, cell_h).to_image();
            sprites.push(SpriteImage {
                id: sprites.len() as u32,
                image: cell,
            });
        }
    }

    Ok(SpritePool {
        sprites,
        sprite_width: cell_w,
        sprite_height: cell_h,
    })
}

/// Load and decode one sheet from disk.
///
/// A missing or unreadable file fails the whole load; callers treat this as
/// fatal to session initialization (no partial pool).
pub fn load_sheet(path: impl AsRef<Path>, has_transparency: bool) -> Result<SpritePool> {
    let path = path.as_ref();
    let sheet = image::open(path)
        .with_context(|| format!("failed to load sheet {}", path.display()))?;
    decode_sheet(&sheet, has_transparency)
        .with_context(|| format!("failed to decode sheet {}", path.display()))
}

/// Load a numbered sheet series (`{base}01.png`, `{base}02.png`, ...) in
/// ascending order and concatenate the decoded sprites preserving sheet
/// order. Cell dimensions are taken from the last sheet.
pub fn load_sheet_series(
    base_pattern: &str,
    count: u32,
    has_transparency: bool,
) -> Result<SpritePool> {
    let mut pool = SpritePool::default();
    for i in 1..=count {
        let path = format!("{base_pattern}{i:02}.png");
        let sheet = load_sheet(&path, has_transparency)?;
        let offset = pool.sprites.len() as u32;
        pool.sprites.extend(sheet.sprites.into_iter().map(|mut s| {
            s.id += offset;
            s
        }));
        pool.sprite_width = sheet.sprite_width;
        pool.sprite_height = sheet.sprite_height;
        log::debug!("decoded sheet {path}: {} sprites", SHEET_COLS * SHEET_ROWS);
    }
    Ok(pool)
}

/// Standard series of sprites the player must find (sources carry alpha).
pub fn load_to_find(asset_dir: &str) -> Result<SpritePool> {
    load_sheet_series(&format!("{asset_dir}/to_find/"), TO_FIND_SHEET_COUNT, true)
}

/// Standard series of neutral distractor sprites (sources carry alpha).
pub fn load_neutral(asset_dir: &str) -> Result<SpritePool> {
    load_sheet_series(&format!("{asset_dir}/neutral/"), NEUTRAL_SHEET_COUNT, true)
}

/// Distance-keyed white matte.
///
/// Pixels within `WHITE_THRESHOLD` of pure white go fully transparent; over
/// the next `FADE_RANGE` units alpha ramps linearly back up. Pixels further
/// from white keep their original alpha.
fn key_out_white(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let dr = 255.0 - r as f32;
        let dg = 255.0 - g as f32;
        let db = 255.0 - b as f32;
        let dist = (dr * dr + dg * dg + db * db).sqrt();

        if dist < WHITE_THRESHOLD {
            pixel.0[3] = 0;
        } else if dist < WHITE_THRESHOLD + FADE_RANGE {
            pixel.0[3] = (((dist - WHITE_THRESHOLD) / FADE_RANGE) * 255.0).round() as u8;
        }
    }
}
