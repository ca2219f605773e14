use crate::foundation::error::{ThemeFrameError, ThemeFrameResult};

bitflags::bitflags! {
    /// Which borders take part in layout and rendering.
    ///
    /// The numeric value is part of persistent cache keys and must stay stable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct EnabledBorders: u8 {
        /// Top edge and the top corners.
        const TOP = 1;
        /// Bottom edge and the bottom corners.
        const BOTTOM = 2;
        /// Left edge and the left corners.
        const LEFT = 4;
        /// Right edge and the right corners.
        const RIGHT = 8;
    }
}

impl Default for EnabledBorders {
    fn default() -> Self {
        Self::all()
    }
}

impl EnabledBorders {
    /// Parse `"all"`, `"none"` or a comma separated list such as `"top,left"`.
    pub fn parse_list(s: &str) -> ThemeFrameResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "all" => return Ok(Self::all()),
            "none" | "" => return Ok(Self::empty()),
            _ => {}
        }

        let mut out = Self::empty();
        for part in s.split(',') {
            let name = part.trim().to_ascii_uppercase();
            let flag = Self::from_name(&name).ok_or_else(|| {
                ThemeFrameError::validation(format!("unknown border '{}'", part.trim()))
            })?;
            out |= flag;
        }
        Ok(out)
    }
}

/// One side of the frame, used for margin queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MarginEdge {
    /// Top inset.
    Top,
    /// Bottom inset.
    Bottom,
    /// Left inset.
    Left,
    /// Right inset.
    Right,
}

/// Logical screen edge a frame is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Location {
    /// Not attached to an edge.
    #[default]
    Floating,
    /// Attached to the top screen edge.
    TopEdge,
    /// Attached to the bottom screen edge.
    BottomEdge,
    /// Attached to the left screen edge.
    LeftEdge,
    /// Attached to the right screen edge.
    RightEdge,
}

impl Location {
    /// Theme prefix conventionally used for frames on this edge.
    pub fn prefix_name(self) -> &'static str {
        match self {
            Location::TopEdge => "north",
            Location::BottomEdge => "south",
            Location::LeftEdge => "west",
            Location::RightEdge => "east",
            Location::Floating => "",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/borders.rs"]
mod tests;
