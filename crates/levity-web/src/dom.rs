//! DOM-backed visual nodes and target discovery.

use levity_core::{Rect, StyleSnapshot, VisualNode};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Ordered selectors naming the elements that join the simulation.
///
/// Selectors with no match are skipped; the effect binds whatever subset
/// of the page is present.
pub const TARGET_SELECTORS: [&str; 7] = [
    "[data-physics=\"hero-title\"]",
    "[data-physics=\"hero-subtitle\"]",
    "[data-physics=\"cta-button-1\"]",
    "[data-physics=\"cta-button-2\"]",
    "[data-physics=\"stat-card-1\"]",
    "[data-physics=\"stat-card-2\"]",
    "[data-physics=\"stat-card-3\"]",
];

/// A page element participating in the effect.
///
/// Thin handle over the underlying `HtmlElement`; the element's lifetime
/// belongs to the document, this type only reads its geometry and writes
/// its inline styles.
#[derive(Debug, Clone)]
pub struct DomElement {
    element: HtmlElement,
}

impl DomElement {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn write(&self, name: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(name, value) {
            tracing::warn!(?err, name, "failed to write inline style");
        }
    }
}

impl VisualNode for DomElement {
    fn bounding_rect(&self) -> Rect {
        let rect = self.element.get_bounding_client_rect();
        Rect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn size(&self) -> (f32, f32) {
        (
            self.element.offset_width() as f32,
            self.element.offset_height() as f32,
        )
    }

    fn read_styles(&self) -> StyleSnapshot {
        let style = self.element.style();
        let read = |name: &str| style.get_property_value(name).unwrap_or_default();
        StyleSnapshot {
            position: read("position"),
            transform: read("transform"),
            transition: read("transition"),
            z_index: read("z-index"),
        }
    }

    fn set_position(&self, value: &str) {
        self.write("position", value);
    }

    fn set_transform(&self, value: &str) {
        self.write("transform", value);
    }

    fn set_transition(&self, value: &str) {
        self.write("transition", value);
    }

    fn set_z_index(&self, value: &str) {
        self.write("z-index", value);
    }

    fn same_node(&self, other: &Self) -> bool {
        self.element.is_same_node(Some(&other.element))
    }
}

/// Resolves the target selector list against the live document, in
/// order. Missing selectors are skipped; an element matched by more than
/// one selector is taken once.
pub fn discover_targets() -> Vec<DomElement> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };

    let mut targets: Vec<DomElement> = Vec::new();
    for selector in TARGET_SELECTORS {
        let Ok(Some(element)) = document.query_selector(selector) else {
            tracing::debug!(selector, "no element for selector");
            continue;
        };
        let Ok(element) = element.dyn_into::<HtmlElement>() else {
            continue;
        };
        if targets
            .iter()
            .any(|t| t.element.is_same_node(Some(&element)))
        {
            continue;
        }
        targets.push(DomElement::new(element));
    }
    targets
}
