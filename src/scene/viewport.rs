use crate::foundation::core::{Canvas, Size};
use crate::foundation::error::{SceneError, SceneResult};

/// Design resolution every layer is authored in.
pub const DESIGN_SIZE: Size = Size::new(1000.0, 1000.0);

/// Inflation applied to the fitted scale so the canvas never touches the display edges.
pub const DEFAULT_PADDING: f64 = 1.01;

/// Uniform factor mapping `design` onto `display` without overflow on either axis.
///
/// The larger of the two required ratios wins, then `padding` inflates it.
pub fn compute_scale(design: Size, display: Size, padding: f64) -> SceneResult<f64> {
    if !(display.width > 0.0 && display.height > 0.0) {
        return Err(SceneError::validation(format!(
            "display size must be positive, got {}x{}",
            display.width, display.height
        )));
    }
    if !(design.width > 0.0 && design.height > 0.0) {
        return Err(SceneError::validation("design size must be positive"));
    }
    if !(padding.is_finite() && padding > 0.0) {
        return Err(SceneError::validation("viewport padding must be > 0"));
    }

    let ratio = (design.height / display.height).max(design.width / display.width);
    let scale = ratio * padding;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(SceneError::validation("viewport scale factor is not finite"));
    }
    Ok(scale)
}

/// Measured once at start; the scene is not relaid out afterwards.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Viewport {
    virtual_width: f64,
    virtual_height: f64,
    scale_factor: f64,
    canvas: Canvas,
}

impl Viewport {
    #[tracing::instrument(level = "debug")]
    pub fn measure(design: Size, display_size: Canvas, padding: f64) -> SceneResult<Self> {
        let scale_factor = compute_scale(design, display_size.size(), padding)?;
        let width = (design.width / scale_factor).trunc();
        let height = (design.height / scale_factor).trunc();
        if width < 1.0 || height < 1.0 {
            return Err(SceneError::validation(format!(
                "display {}x{} is too small for the design canvas",
                display_size.width, display_size.height
            )));
        }
        let canvas = Canvas {
            width: width as u32,
            height: height as u32,
        };
        tracing::debug!(scale_factor, ?canvas, "viewport measured");
        Ok(Self {
            virtual_width: design.width,
            virtual_height: design.height,
            scale_factor,
            canvas,
        })
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn virtual_size(&self) -> Size {
        Size::new(self.virtual_width, self.virtual_height)
    }

    /// Device-space canvas the scene is rendered into.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> f64 {
        f64::from(self.canvas.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.canvas.height)
    }

    /// Convert a virtual-space quantity to whole device pixels (truncated toward zero).
    pub fn to_device(&self, virtual_value: f64) -> f64 {
        if self.scale_factor == 1.0 || virtual_value == 0.0 {
            return virtual_value;
        }
        (virtual_value / self.scale_factor).trunc()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/viewport.rs"]
mod tests;
