
/// How a frame is produced
///
/// ```text
/// ren = Renderer::new( triangulator )
/// ren.set_sample_rate( n )
/// ren.draw( scene, target )
///   begin()           -- supersample buffer at n x target size, opaque white
///   draw_element()    -- compose transform, dispatch on element kind
///     rasterize_point / rasterize_line / rasterize_triangle / rasterize_image
///       set_sample()  -- bounds checked write, out of range dropped
///   canvas border     -- four lines at the canvas corners, outset one unit
///   resolve(target)   -- alpha weighted box filter over each n x n block,
///                        output alpha forced opaque
/// ```
pub mod color;
pub mod transform;
pub mod buffer;
pub mod scene;
pub mod texture;
pub mod sampler;
pub mod render;
pub mod raster;
pub mod viewport;
pub mod ppm;

pub use crate::color::*;
pub use crate::transform::*;
pub use crate::buffer::*;
pub use crate::scene::*;
pub use crate::texture::*;
pub use crate::sampler::*;
pub use crate::render::*;
pub use crate::viewport::*;
