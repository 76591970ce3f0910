//! The drawing surface: a canvas layered over the chat container's content
//! box, sized to the scrollable extent so it moves with the content and
//! stroke coordinates never involve the scroll offset.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use marginalia_shared::Stroke;

use crate::dom::set_styles;
use crate::render;

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

pub const OVERLAY_ROOT_ID: &str = "marginalia-root";
const OVERLAY_Z_INDEX: &str = "2147483647";

/// Backing-store resolution of the surface, recomputed from the container's
/// content extent and the device pixel ratio on every resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    pub content_width: f64,
    pub content_height: f64,
    pub dpr: f64,
}

impl SurfaceGeometry {
    pub fn new(content_width: f64, content_height: f64, dpr: f64) -> Self {
        Self {
            content_width: content_width.max(0.0),
            content_height: content_height.max(0.0),
            dpr: dpr.max(1.0),
        }
    }

    /// Measures the container's current content extent. The height is the
    /// scroll height, not the visible height: the surface covers everything
    /// that can scroll into view.
    pub fn measure(window: &Window, container: &Element) -> Self {
        Self::new(
            container.client_width() as f64,
            container.scroll_height() as f64,
            window.device_pixel_ratio(),
        )
    }

    pub fn device_width(&self) -> u32 {
        (self.content_width * self.dpr).round() as u32
    }

    pub fn device_height(&self) -> u32 {
        (self.content_height * self.dpr).round() as u32
    }
}

pub struct Surface {
    pub root: HtmlElement,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub geometry: SurfaceGeometry,
}

impl Surface {
    /// Builds the overlay layer inside `container`. The root div sits at the
    /// container's content origin and scrolls with it; only the canvas takes
    /// pointer events, and only while draw mode is on.
    pub fn attach(document: &Document, container: &Element) -> Result<Self, JsValue> {
        // A stale root can survive a teardown that lost its session (e.g. a
        // script reload); never stack a second surface on top of it.
        if let Some(stale) = document.get_element_by_id(OVERLAY_ROOT_ID) {
            stale.remove();
        }

        let root: HtmlElement = document.create_element("div")?.dyn_into()?;
        root.set_id(OVERLAY_ROOT_ID);
        set_styles(
            &root,
            &[
                ("position", "absolute"),
                ("left", "0"),
                ("top", "0"),
                ("width", "100%"),
                ("pointer-events", "none"),
                ("z-index", OVERLAY_Z_INDEX),
            ],
        );

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        set_styles(
            &canvas,
            &[
                ("position", "absolute"),
                ("left", "0"),
                ("top", "0"),
                ("pointer-events", "auto"),
                ("cursor", "crosshair"),
            ],
        );

        root.append_child(&canvas)?;
        container.append_child(&root)?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("missing 2d canvas context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            root,
            canvas,
            ctx,
            geometry: SurfaceGeometry::new(0.0, 0.0, 1.0),
        })
    }

    /// Re-measures the container, resizes the backing store, re-establishes
    /// the logical-to-device transform and redraws the whole collection.
    /// Cheap no-op redraw when nothing changed, so it is safe to call on
    /// every observer notification.
    pub fn resize(&mut self, window: &Window, container: &Element, strokes: &[Stroke]) {
        self.geometry = SurfaceGeometry::measure(window, container);

        let css_width = format!("{}px", self.geometry.content_width);
        let css_height = format!("{}px", self.geometry.content_height);
        let _ = self.root.style().set_property("height", &css_height);
        let _ = self.canvas.style().set_property("width", &css_width);
        let _ = self.canvas.style().set_property("height", &css_height);

        // Assigning the backing-store size resets all context state,
        // including the transform.
        self.canvas.set_width(self.geometry.device_width());
        self.canvas.set_height(self.geometry.device_height());
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let _ = self.ctx.scale(self.geometry.dpr, self.geometry.dpr);

        render::redraw(&self.ctx, &self.geometry, strokes);
    }

    /// When draw mode is off the surface stays visible but passes pointer
    /// input through to the page underneath.
    pub fn set_draw_mode(&self, enabled: bool) {
        let value = if enabled { "auto" } else { "none" };
        let _ = self.canvas.style().set_property("pointer-events", value);
    }

    pub fn to_png_data_url(&self) -> Result<String, JsValue> {
        self.canvas.to_data_url()
    }

    pub fn detach(&self) {
        self.root.remove();
    }
}
