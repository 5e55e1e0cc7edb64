use crate::capture::buffer::FrameRGB;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::DecodeFxResult;
use crate::foundation::math::flatten_premul_rgba8_to_rgb8;

/// Pixel target of the renderer: a premultiplied RGBA8 pixmap of canvas size.
pub struct Surface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(canvas: Canvas) -> DecodeFxResult<Self> {
        let (w, h) = canvas.to_u16()?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied RGBA8 bytes.
    pub fn rgba_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    /// Deep copy of the current pixels as opaque RGB8, flattened over `bg`.
    pub fn snapshot_rgb(&self, bg: Rgb8) -> FrameRGB {
        let mut data = Vec::new();
        flatten_premul_rgba8_to_rgb8(&mut data, self.rgba_premul(), [bg.r, bg.g, bg.b]);
        FrameRGB {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
        }
    }
}
