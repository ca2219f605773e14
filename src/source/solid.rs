use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use crate::foundation::core::PixelSize;
use crate::render::pixmap::{Pixmap, PremulRgba8};
use crate::source::ElementSource;

#[derive(Clone, Copy, Debug)]
struct SolidElement {
    size: PixelSize,
    color: PremulRgba8,
}

/// Element source made of solid-color rectangles.
///
/// Every `render` call is counted, per element id and in total, which makes this the
/// deterministic double for verifying cache behavior. Elements can be added, recolored and
/// removed through a shared reference to simulate a theme reload.
#[derive(Debug, Default)]
pub struct SolidElementSource {
    identity: String,
    elements: RefCell<BTreeMap<String, SolidElement>>,
    renders: Cell<usize>,
    renders_by_id: RefCell<HashMap<String, usize>>,
}

impl SolidElementSource {
    /// Empty source with the given identity string.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`SolidElementSource::insert`].
    pub fn with_element(self, id: &str, size: PixelSize, color: PremulRgba8) -> Self {
        self.insert(id, size, color);
        self
    }

    /// Add or replace an element.
    pub fn insert(&self, id: &str, size: PixelSize, color: PremulRgba8) {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), SolidElement { size, color });
    }

    /// Remove an element; returns `true` if it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.elements.borrow_mut().remove(id).is_some()
    }

    /// Total number of `render` calls that produced a raster.
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    /// Number of `render` calls for one element id.
    pub fn render_count_for(&self, id: &str) -> usize {
        self.renders_by_id.borrow().get(id).copied().unwrap_or(0)
    }

    /// Reset all render counters.
    pub fn reset_counts(&self) {
        self.renders.set(0);
        self.renders_by_id.borrow_mut().clear();
    }
}

impl ElementSource for SolidElementSource {
    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn element_size(&self, id: &str) -> PixelSize {
        self.elements
            .borrow()
            .get(id)
            .map(|e| e.size)
            .unwrap_or(PixelSize::ZERO)
    }

    fn render(&self, id: &str, size: PixelSize) -> Option<Pixmap> {
        if size.is_empty() {
            return None;
        }
        let element = self.elements.borrow().get(id).copied()?;
        self.renders.set(self.renders.get() + 1);
        *self
            .renders_by_id
            .borrow_mut()
            .entry(id.to_string())
            .or_insert(0) += 1;
        Some(Pixmap::solid(size, element.color))
    }

    fn source_identity(&self) -> String {
        self.identity.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/solid.rs"]
mod tests;
