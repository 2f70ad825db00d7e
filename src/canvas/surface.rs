use spinwave_core::DisplayGeometry;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A canvas whose backing store tracks its CSS size times the device
/// pixel ratio. Drawing happens in CSS pixels.
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("get_context: {e:?}"))?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "2d context cast failed".to_string())?;
        Ok(Self { canvas, ctx })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Match the backing store to the current layout and reapply the
    /// pixel-ratio transform.
    pub fn sync(&self, pixel_ratio: f64) -> DisplayGeometry {
        let rect = self.canvas.get_bounding_client_rect();
        let geometry = DisplayGeometry::from_logical(rect.width(), rect.height(), pixel_ratio);
        if geometry.needs_resize(self.canvas.width(), self.canvas.height()) {
            self.canvas.set_width(geometry.backing_width);
            self.canvas.set_height(geometry.backing_height);
        }
        let dpr = geometry.pixel_ratio;
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("set_transform failed: {e:?}");
        }
        geometry
    }
}
