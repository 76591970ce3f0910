//! Finds the scrollable chat region to attach the overlay to.
//!
//! Candidate selection is a pure function over measured metrics; the DOM
//! walk only gathers those metrics, so the heuristic is testable against
//! synthetic candidate lists.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

#[cfg(test)]
#[path = "locate_test.rs"]
mod locate_test;

/// Scrollers shorter than this are widgets (code blocks, tooltips), not the
/// chat region.
pub const MIN_SCROLLER_HEIGHT: f64 = 300.0;

/// Measurements for one element with vertical overflow, detached from the
/// DOM node they came from.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollCandidate {
    pub overflow_scrollable: bool,
    pub scroll_height: f64,
    pub client_height: f64,
    pub inside_figure: bool,
    pub inside_control_group: bool,
}

impl ScrollCandidate {
    pub fn eligible(&self) -> bool {
        self.overflow_scrollable
            && self.scroll_height > self.client_height
            && self.client_height > MIN_SCROLLER_HEIGHT
            && !self.inside_figure
            && !self.inside_control_group
    }
}

/// Picks the primary scroller: the eligible candidate with the largest
/// visible height. Earlier candidates win ties.
pub fn best_candidate(candidates: &[ScrollCandidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        if !candidate.eligible() {
            continue;
        }
        let better = match best {
            Some((_, height)) => candidate.client_height > height,
            None => true,
        };
        if better {
            best = Some((index, candidate.client_height));
        }
    }
    best.map(|(index, _)| index)
}

/// Locates the scrollable chat container. Falls back to `<main>` when no
/// descendant qualifies, then to the document body. Idempotent and cheap
/// enough to re-run on every (re)attach.
pub fn find_chat_container(window: &Window, document: &Document) -> Option<Element> {
    let main = match document.query_selector("main").ok().flatten() {
        Some(main) => main,
        None => return fallback_root(document),
    };

    let mut elements = Vec::new();
    let mut metrics = Vec::new();
    if let Ok(descendants) = main.query_selector_all("*") {
        for index in 0..descendants.length() {
            let Some(node) = descendants.item(index) else {
                continue;
            };
            let Ok(element) = node.dyn_into::<Element>() else {
                continue;
            };
            metrics.push(measure(window, &element));
            elements.push(element);
        }
    }

    match best_candidate(&metrics) {
        Some(index) => Some(elements[index].clone()),
        None => Some(main),
    }
}

fn measure(window: &Window, element: &Element) -> ScrollCandidate {
    let overflow_y = window
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("overflow-y").ok())
        .unwrap_or_default();
    ScrollCandidate {
        overflow_scrollable: overflow_y == "auto" || overflow_y == "scroll",
        scroll_height: element.scroll_height() as f64,
        client_height: element.client_height() as f64,
        inside_figure: has_ancestor(element, "figure"),
        inside_control_group: has_ancestor(element, "[role=\"group\"]"),
    }
}

fn has_ancestor(element: &Element, selector: &str) -> bool {
    element.closest(selector).ok().flatten().is_some()
}

fn fallback_root(document: &Document) -> Option<Element> {
    if let Some(body) = document.body() {
        return Some(body.into());
    }
    document.document_element()
}
