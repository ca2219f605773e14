//! Named element sources.
//!
//! The compositor never parses themes itself. It asks an [`ElementSource`] whether an element
//! exists, how large it naturally is, and for a raster of it at a given size.

use crate::foundation::core::PixelSize;
use crate::render::pixmap::Pixmap;

pub(crate) mod solid;
pub(crate) mod svg;

/// Capability interface over a themed image containing named elements.
///
/// Element ids are plain strings built as `prefix + suffix` (e.g. `"hover-topleft"`). Absent
/// elements are never an error: they report zero size and render nothing.
pub trait ElementSource {
    /// Return `true` when an element with this id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Natural size of the element, [`PixelSize::ZERO`] when absent.
    fn element_size(&self, id: &str) -> PixelSize;

    /// Rasterize the element stretched to exactly `size`.
    ///
    /// Returns `None` when the element is absent or `size` is empty.
    fn render(&self, id: &str, size: PixelSize) -> Option<Pixmap>;

    /// Stable identity of the underlying theme (usually its path), used in persistent cache keys.
    fn source_identity(&self) -> String;
}

impl<S: ElementSource + ?Sized> ElementSource for std::rc::Rc<S> {
    fn has_element(&self, id: &str) -> bool {
        (**self).has_element(id)
    }

    fn element_size(&self, id: &str) -> PixelSize {
        (**self).element_size(id)
    }

    fn render(&self, id: &str, size: PixelSize) -> Option<Pixmap> {
        (**self).render(id, size)
    }

    fn source_identity(&self) -> String {
        (**self).source_identity()
    }
}
