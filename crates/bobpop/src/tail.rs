//! Decorative tail (the small arrow pointing out of a tooltip-style panel).
//!
//! Each placement is drawn with a zero-sized `::before` box whose borders form a triangle.
//! Edge placements point straight out; the `left top`/`left bottom`/`right top`/`right bottom`
//! corners point out diagonally.

use std::str::FromStr;

use crate::error::{ParseError, ParseResult};
use crate::stylesheet::CssRule;

/// Where the tail sits on the panel, named `<edge> <position along edge>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TailPlacement {
    TopLeft,
    #[default]
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    LeftTop,
    LeftCenter,
    LeftBottom,
    RightTop,
    RightCenter,
    RightBottom,
}

/// Resolved geometry for one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailGeometry {
    pub bottom: &'static str,
    pub left: &'static str,
    /// Which borders carry the colour, as `[top, right, bottom, left]`.
    pub painted: [bool; 4],
}

impl TailPlacement {
    pub const ALL: [TailPlacement; 12] = [
        TailPlacement::TopLeft,
        TailPlacement::TopCenter,
        TailPlacement::TopRight,
        TailPlacement::BottomLeft,
        TailPlacement::BottomCenter,
        TailPlacement::BottomRight,
        TailPlacement::LeftTop,
        TailPlacement::LeftCenter,
        TailPlacement::LeftBottom,
        TailPlacement::RightTop,
        TailPlacement::RightCenter,
        TailPlacement::RightBottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TailPlacement::TopLeft => "top left",
            TailPlacement::TopCenter => "top center",
            TailPlacement::TopRight => "top right",
            TailPlacement::BottomLeft => "bottom left",
            TailPlacement::BottomCenter => "bottom center",
            TailPlacement::BottomRight => "bottom right",
            TailPlacement::LeftTop => "left top",
            TailPlacement::LeftCenter => "left center",
            TailPlacement::LeftBottom => "left bottom",
            TailPlacement::RightTop => "right top",
            TailPlacement::RightCenter => "right center",
            TailPlacement::RightBottom => "right bottom",
        }
    }

    pub fn geometry(&self) -> TailGeometry {
        const TOP: [bool; 4] = [false, false, true, false];
        const BOTTOM: [bool; 4] = [true, false, false, false];
        let (bottom, left, painted) = match self {
            TailPlacement::TopLeft => ("90%", "10%", TOP),
            TailPlacement::TopCenter => ("90%", "50%", TOP),
            TailPlacement::TopRight => ("90%", "90%", TOP),
            TailPlacement::BottomLeft => ("0%", "10%", BOTTOM),
            TailPlacement::BottomCenter => ("0%", "50%", BOTTOM),
            TailPlacement::BottomRight => ("0%", "90%", BOTTOM),
            TailPlacement::LeftTop => ("80%", "8%", [true, false, false, true]),
            TailPlacement::LeftCenter => ("50%", "0%", [false, true, false, false]),
            TailPlacement::LeftBottom => ("5%", "6%", [false, false, true, true]),
            TailPlacement::RightTop => ("80%", "92%", [true, true, false, false]),
            TailPlacement::RightCenter => ("50%", "90%", [false, false, false, true]),
            TailPlacement::RightBottom => ("6%", "93%", [false, true, true, false]),
        };
        TailGeometry {
            bottom,
            left,
            painted,
        }
    }

    /// Per-instance `::before` rule for the panel with DOM id `id`.
    pub fn rule(&self, id: &str, color: &str) -> CssRule {
        let geometry = self.geometry();
        let border_color = geometry
            .painted
            .iter()
            .map(|&painted| if painted { color } else { "transparent" })
            .collect::<Vec<_>>()
            .join(" ");
        CssRule::new(
            tail_selector(id),
            &[
                ("bottom", geometry.bottom),
                ("left", geometry.left),
                ("border-color", &border_color),
            ],
        )
    }
}

/// Selector of the per-instance tail rule.
pub fn tail_selector(id: &str) -> String {
    format!("#{id}::before")
}

impl FromStr for TailPlacement {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_lowercase();
        // Single edge words default to the centre of that edge.
        let normalized = match normalized.as_str() {
            "top" | "bottom" | "left" | "right" => format!("{normalized} center"),
            _ => normalized,
        };
        TailPlacement::ALL
            .into_iter()
            .find(|placement| placement.as_str() == normalized)
            .ok_or_else(|| ParseError::UnknownTailPlacement(s.to_string()))
    }
}
