//! Reading and writing of image files
//!
//! See <https://en.wikipedia.org/wiki/Netpbm_format#PPM_example>
//!
use std::path::Path;

/// Read an image file into an interleaved RGBA8 buffer
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>,usize,usize),image::ImageError> {
    let img = image::open(filename)?.to_rgba();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

/// Write an interleaved RGBA8 buffer to an image file
pub fn write_file<P: AsRef<Path>>(buf: &[u8], width: usize, height: usize, filename: P) -> Result<(), std::io::Error> {
    image::save_buffer(filename, buf, width as u32, height as u32, image::RGBA(8))
}
