//! Floating toolbar: brush color/size, draw-type mode toggle, clear, PNG
//! export and close. Styling is inlined since the overlay runs inside a
//! third-party page with no stylesheet of its own.

use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlInputElement};

use marginalia_shared::{DEFAULT_COLOR, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};

use crate::dom::{create, set_styles};

const INK: &str = "#0f172a";
const QUIET_BG: &str = "rgba(15,23,42,0.06)";
const ACCENT_BG: &str = "linear-gradient(135deg, #0a84ff, #36a2ff)";

pub struct Toolbar {
    pub root: HtmlElement,
    pub color_input: HtmlInputElement,
    pub size_input: HtmlInputElement,
    pub mode_button: HtmlButtonElement,
    pub clear_button: HtmlButtonElement,
    pub save_button: HtmlButtonElement,
    pub close_button: HtmlButtonElement,
}

pub fn build(document: &Document) -> Result<Toolbar, JsValue> {
    let root: HtmlElement = create(document, "div")?;
    set_styles(
        &root,
        &[
            ("position", "fixed"),
            ("top", "12px"),
            ("left", "12px"),
            ("display", "inline-flex"),
            ("gap", "10px"),
            ("align-items", "center"),
            ("width", "fit-content"),
            ("max-width", "calc(100% - 24px)"),
            ("padding", "8px 10px"),
            ("border-radius", "14px"),
            ("background", "rgba(255,255,255,0.85)"),
            ("border", "1px solid rgba(15,23,42,0.12)"),
            ("box-shadow", "0 10px 24px rgba(15,23,42,0.15)"),
            ("backdrop-filter", "blur(10px)"),
            ("z-index", "2147483647"),
            ("pointer-events", "auto"),
        ],
    );

    let color_input: HtmlInputElement = create(document, "input")?;
    color_input.set_type("color");
    color_input.set_value(DEFAULT_COLOR);
    let _ = color_input.set_attribute("aria-label", "Brush color");
    set_styles(
        &color_input,
        &[
            ("width", "28px"),
            ("height", "28px"),
            ("border", "1px solid rgba(15,23,42,0.12)"),
            ("border-radius", "8px"),
            ("padding", "0"),
            ("background", "white"),
            ("pointer-events", "auto"),
        ],
    );

    let size_input: HtmlInputElement = create(document, "input")?;
    size_input.set_type("range");
    size_input.set_min(&MIN_SIZE.to_string());
    size_input.set_max(&MAX_SIZE.to_string());
    size_input.set_value(&DEFAULT_SIZE.to_string());
    let _ = size_input.set_attribute("aria-label", "Brush size");
    set_styles(
        &size_input,
        &[
            ("width", "120px"),
            ("accent-color", "#0a84ff"),
            ("pointer-events", "auto"),
        ],
    );

    let mode_button = pill_button(document, "Type Mode", QUIET_BG, INK)?;
    let clear_button = pill_button(document, "Clear", "white", INK)?;
    let save_button = pill_button(document, "Save PNG", ACCENT_BG, "white")?;
    let close_button = pill_button(document, "Close", QUIET_BG, INK)?;

    root.append_child(&color_input)?;
    root.append_child(&size_input)?;
    root.append_child(&mode_button)?;
    root.append_child(&clear_button)?;
    root.append_child(&save_button)?;
    root.append_child(&close_button)?;

    Ok(Toolbar {
        root,
        color_input,
        size_input,
        mode_button,
        clear_button,
        save_button,
        close_button,
    })
}

/// The label names the mode a click switches to.
pub fn sync_mode_button(button: &HtmlButtonElement, draw_enabled: bool) {
    if draw_enabled {
        button.set_text_content(Some("Type Mode"));
        pill(button, QUIET_BG, INK);
    } else {
        button.set_text_content(Some("Draw Mode"));
        pill(button, ACCENT_BG, "white");
    }
}

fn pill_button(
    document: &Document,
    label: &str,
    background: &str,
    color: &str,
) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = create(document, "button")?;
    let _ = button.set_attribute("type", "button");
    button.set_text_content(Some(label));
    pill(&button, background, color);
    Ok(button)
}

fn pill(button: &HtmlButtonElement, background: &str, color: &str) {
    set_styles(
        button,
        &[
            ("padding", "6px 10px"),
            ("border-radius", "999px"),
            ("border", "1px solid rgba(15,23,42,0.12)"),
            ("background", background),
            ("color", color),
            ("font-size", "12px"),
            ("font-weight", "600"),
            ("letter-spacing", "0.2px"),
            ("pointer-events", "auto"),
            ("cursor", "pointer"),
        ],
    );
}
