//! Visual-node handles: the engine's view of the host page.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Center of the rectangle.
    pub fn center(&self) -> (f32, f32) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// True if the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Inline style values captured at bind time and written back on restore.
///
/// Empty strings mean "no inline value was set"; restoring an empty string
/// removes the inline declaration again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSnapshot {
    pub position: String,
    pub transform: String,
    pub transition: String,
    pub z_index: String,
}

/// Externally-owned handle to a node the effect can move.
///
/// The engine never owns the node's lifetime. It captures a style snapshot
/// at bind time, writes transforms through this interface while running,
/// and restores the snapshot on deactivation.
pub trait VisualNode {
    /// Current bounding rectangle in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Current rendered size (width, height) in pixels.
    fn size(&self) -> (f32, f32);

    /// Reads the inline style properties the effect mutates.
    fn read_styles(&self) -> StyleSnapshot;

    fn set_position(&self, value: &str);
    fn set_transform(&self, value: &str);
    fn set_transition(&self, value: &str);
    fn set_z_index(&self, value: &str);

    /// True if both handles refer to the same underlying node.
    fn same_node(&self, other: &Self) -> bool;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Rect, StyleSnapshot, VisualNode};

    /// Test double standing in for a page element.
    #[derive(Debug, Clone)]
    pub struct MockNode {
        rect: Rect,
        styles: Rc<RefCell<StyleSnapshot>>,
    }

    impl MockNode {
        pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
            Self {
                rect: Rect::new(left, top, width, height),
                styles: Rc::new(RefCell::new(StyleSnapshot::default())),
            }
        }

        /// A node carrying pre-existing inline styles.
        pub fn styled(rect: Rect, styles: StyleSnapshot) -> Self {
            Self {
                rect,
                styles: Rc::new(RefCell::new(styles)),
            }
        }

        pub fn position(&self) -> String {
            self.styles.borrow().position.clone()
        }

        pub fn transform(&self) -> String {
            self.styles.borrow().transform.clone()
        }

        pub fn transition(&self) -> String {
            self.styles.borrow().transition.clone()
        }

        pub fn z_index(&self) -> String {
            self.styles.borrow().z_index.clone()
        }
    }

    impl VisualNode for MockNode {
        fn bounding_rect(&self) -> Rect {
            self.rect
        }

        fn size(&self) -> (f32, f32) {
            (self.rect.width, self.rect.height)
        }

        fn read_styles(&self) -> StyleSnapshot {
            self.styles.borrow().clone()
        }

        fn set_position(&self, value: &str) {
            self.styles.borrow_mut().position = value.to_string();
        }

        fn set_transform(&self, value: &str) {
            self.styles.borrow_mut().transform = value.to_string();
        }

        fn set_transition(&self, value: &str) {
            self.styles.borrow_mut().transition = value.to_string();
        }

        fn set_z_index(&self, value: &str) {
            self.styles.borrow_mut().z_index = value.to_string();
        }

        fn same_node(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.styles, &other.styles)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(100.0, 50.0, 200.0, 80.0);
        assert_eq!(rect.center(), (200.0, 90.0));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 40.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 40.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 40.0, 40.0).is_empty());
    }

    #[test]
    fn test_snapshot_default_is_empty() {
        let snapshot = StyleSnapshot::default();
        assert!(snapshot.position.is_empty());
        assert!(snapshot.transform.is_empty());
        assert!(snapshot.transition.is_empty());
        assert!(snapshot.z_index.is_empty());
    }
}
