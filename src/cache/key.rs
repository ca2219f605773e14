//! Persistent cache keys.
//!
//! Keys are stored by external caches across runs, so their layout is fixed byte for byte.

use crate::foundation::core::{PixelPoint, PixelSize};
use crate::frame::borders::EnabledBorders;

/// Key of a composited background: `"{borders}_{height}_{width}_{prefix}_{identity}_"`.
pub fn background_key(
    borders: EnabledBorders,
    size: PixelSize,
    prefix: &str,
    identity: &str,
) -> String {
    format!(
        "{}_{}_{}_{prefix}_{identity}_",
        borders.bits(),
        size.height,
        size.width
    )
}

/// Key of an overlay layer: the background key prefixed by `"overlay_{y}_{x}_"`.
///
/// Two overlay configurations that share background geometry and position produce the same key.
pub fn overlay_key(
    position: PixelPoint,
    borders: EnabledBorders,
    size: PixelSize,
    prefix: &str,
    identity: &str,
) -> String {
    format!(
        "overlay_{}_{}_{}",
        position.y,
        position.x,
        background_key(borders, size, prefix, identity)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/cache/key.rs"]
mod tests;
