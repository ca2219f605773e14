//! themeframe composites resizable themed frames from named 9-slice elements.
//!
//! A theme (usually one SVG) carries elements such as `topleft`, `top`, `center`, optionally
//! namespaced by a prefix (`hover-center`). [`FrameSvg`] lays those pieces out for any size and
//! set of enabled borders, memoizes the result per prefix and, with a [`FrameCache`] attached,
//! shares composites across instances and runs.
//!
//! - Pick a source: [`SvgElementSource`] or any [`ElementSource`] implementation
//! - Create a [`FrameSvg`], select a prefix and [`FrameSvg::resize_frame`]
//! - Read [`FrameSvg::frame_pixmap`], [`FrameSvg::margins`] and [`FrameSvg::mask`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cache;
mod foundation;
mod frame;
mod frame_svg;
mod render;
mod source;

pub use crate::foundation::core::{PixelPoint, PixelRect, PixelSize, Point, Rect, Size};
pub use crate::foundation::error::{ThemeFrameError, ThemeFrameResult};

pub use crate::cache::key::{background_key, overlay_key};
pub use crate::cache::store::{DiskFrameCache, FrameCache, MemoryFrameCache};
pub use crate::cache::write_back::WriteBackQueue;
pub use crate::frame::borders::{EnabledBorders, Location, MarginEdge};
pub use crate::frame::metrics::{FrameMetrics, is_drawable};
pub use crate::frame::variant::FrameVariant;
pub use crate::frame_svg::{FrameSvg, FrameSvgOpts, Margins};
pub use crate::render::compositor::composite_background;
pub use crate::render::mask::{FrameMask, MaskSpan};
pub use crate::render::overlay::{OverlayLayer, has_overlay, overlay_rect, render_overlay};
pub use crate::render::pixmap::{Pixmap, PremulRgba8, over};
pub use crate::source::ElementSource;
pub use crate::source::solid::SolidElementSource;
pub use crate::source::svg::SvgElementSource;
