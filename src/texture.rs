//! Textures and the mip pyramid

use std::fmt;
use std::path::Path;

use log::warn;

/// Upper bound on the length of a mip chain
pub const MAX_MIP_LEVELS: usize = 14;

const BYTES_PER_TEXEL: usize = 4;

/// One level of a mip pyramid, a flat RGBA8 texel array
#[derive(Debug,Clone)]
pub struct MipLevel {
    /// Level width in texels
    pub width: usize,
    /// Level height in texels
    pub height: usize,
    /// Interleaved RGBA8 texel data, row-major
    pub texels: Vec<u8>,
}

impl MipLevel {
    fn new(width: usize, height: usize) -> Self {
        MipLevel { width, height, texels: vec![0u8; width * height * BYTES_PER_TEXEL] }
    }
    /// The four components of the texel at (x,y); (x,y) must be in range
    pub fn texel(&self, x: usize, y: usize) -> &[u8] {
        let i = (y * self.width + x) * BYTES_PER_TEXEL;
        &self.texels[i .. i + BYTES_PER_TEXEL]
    }
}

/// Texture errors
#[derive(Debug,PartialEq)]
pub enum TextureError {
    /// A mip level beyond the populated chain was requested
    LevelOutOfRange { level: usize, levels: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TextureError::LevelOutOfRange { level, levels } => {
                write!(f, "mip level {} out of range, texture has {} level(s)", level, levels)
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// A texture: an ordered chain of mip levels
///
/// Level 0 is the full resolution base image; each following level halves
/// the width and height of its parent (rounded down, floored at 1x1). The
/// chain holds only the base level until [generate_mips] is called, and is
/// immutable from the sampler's point of view afterwards.
///
/// [generate_mips]: Texture::generate_mips
#[derive(Debug,Clone)]
pub struct Texture {
    pub levels: Vec<MipLevel>,
}

impl Texture {
    /// Create a texture from an interleaved RGBA8 base image
    pub fn from_rgba8(texels: Vec<u8>, width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "texture dimensions must be non-zero");
        assert_eq!(texels.len(), width * height * BYTES_PER_TEXEL);
        Texture { levels: vec![MipLevel { width, height, texels }] }
    }
    /// Load the base level from an image file
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<Self, image::ImageError> {
        let img = image::open(filename)?.to_rgba();
        let (w, h) = img.dimensions();
        Ok(Self::from_rgba8(img.into_raw(), w as usize, h as usize))
    }
    /// Base level width in texels
    pub fn width(&self) -> usize {
        self.levels[0].width
    }
    /// Base level height in texels
    pub fn height(&self) -> usize {
        self.levels[0].height
    }
    /// The mip level at `level`
    pub fn level(&self, level: usize) -> Result<&MipLevel, TextureError> {
        let levels = self.levels.len();
        self.levels.get(level).ok_or_else(|| {
            warn!("mip level {} out of range, texture has {} level(s)", level, levels);
            TextureError::LevelOutOfRange { level, levels }
        })
    }
    /// Build the mip pyramid below `start_level`
    ///
    /// The number of levels added is `floor(log2(max(width, height)))` of
    /// the level at `start_level`, capped so the whole chain never exceeds
    /// [MAX_MIP_LEVELS]. Each added level halves its parent's dimensions
    /// (rounded down, floored at 1) and every level above `start_level` is
    /// filled by box-filtering each 2x2 block of its parent.
    pub fn generate_mips(&mut self, start_level: usize) -> Result<(), TextureError> {
        if start_level >= self.levels.len() {
            warn!("invalid mip start level {}, texture has {} level(s)",
                  start_level, self.levels.len());
            return Err(TextureError::LevelOutOfRange {
                level: start_level,
                levels: self.levels.len(),
            });
        }

        // allocate sublevels
        let base_w = self.levels[start_level].width;
        let base_h = self.levels[start_level].height;
        let num_sub = (base_w.max(base_h) as f64).log2().floor() as usize;
        let num_sub = num_sub.min(MAX_MIP_LEVELS.saturating_sub(start_level + 1));

        self.levels.truncate(start_level + 1);
        let (mut w, mut h) = (base_w, base_h);
        for _ in 0 .. num_sub {
            // handle odd size textures by rounding down
            w = (w / 2).max(1);
            h = (h / 2).max(1);
            self.levels.push(MipLevel::new(w, h));
        }

        // box filter each level from its parent
        for i in start_level + 1 .. self.levels.len() {
            let (head, tail) = self.levels.split_at_mut(i);
            let parent = &head[i - 1];
            let level = &mut tail[0];
            for y in 0 .. level.height {
                for x in 0 .. level.width {
                    // a parent dimension already floored at 1 has no
                    // second row/column to average
                    let x1 = (2 * x + 1).min(parent.width - 1);
                    let y1 = (2 * y + 1).min(parent.height - 1);
                    for k in 0 .. BYTES_PER_TEXEL {
                        let sum = u16::from(parent.texel(2 * x, 2 * y)[k])
                                + u16::from(parent.texel(x1,    2 * y)[k])
                                + u16::from(parent.texel(2 * x, y1)[k])
                                + u16::from(parent.texel(x1,    y1)[k]);
                        level.texels[(y * level.width + x) * BYTES_PER_TEXEL + k] =
                            (sum / 4) as u8;
                    }
                }
            }
        }
        Ok(())
    }
}
