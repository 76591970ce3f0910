use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, PointerEvent, Window};

use marginalia_shared::Point;

pub fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("unexpected element type for <{tag}>")))
}

pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

/// The overlay positions itself against the container's content box, so the
/// container must establish a positioning context.
pub fn ensure_positioned(window: &Window, container: &Element) {
    let position = window
        .get_computed_style(container)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("position").ok())
        .unwrap_or_default();
    if position == "static" || position.is_empty() {
        if let Some(container) = container.dyn_ref::<HtmlElement>() {
            let _ = container.style().set_property("position", "relative");
        }
    }
}

/// Converts a pointer event to surface-local content coordinates. The
/// bounding rect is re-read per event: the surface's viewport position
/// changes continuously as the page scrolls even though its content-relative
/// position is fixed.
pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    Point {
        x: event.client_x() as f64 - rect.left(),
        y: event.client_y() as f64 - rect.top(),
    }
    .sanitize()
}
