//! Hand-drawn signature capture.
//!
//! Strokes are kept as point lists on a fixed canvas and rendered to an SVG
//! image embedded as a base64 data URI.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Signature canvas width in pixels.
pub const SIGNATURE_CANVAS_WIDTH: f32 = 500.0;
/// Signature canvas height in pixels.
pub const SIGNATURE_CANVAS_HEIGHT: f32 = 200.0;

/// One pen position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignaturePoint {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Vertical offset from the top edge.
    pub y: f32,
}

impl SignaturePoint {
    /// Creates a point clamped to the canvas.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp(x, SIGNATURE_CANVAS_WIDTH),
            y: clamp(y, SIGNATURE_CANVAS_HEIGHT),
        }
    }
}

/// Signature pad holding the strokes drawn so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignaturePad {
    strokes: Vec<Vec<SignaturePoint>>,
}

impl SignaturePad {
    /// Creates an empty pad.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one pen stroke. Strokes without points are ignored.
    pub fn draw_stroke(&mut self, points: impl IntoIterator<Item = SignaturePoint>) {
        let stroke: Vec<SignaturePoint> = points.into_iter().collect();
        if !stroke.is_empty() {
            self.strokes.push(stroke);
        }
    }

    /// Erases every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Returns whether nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Returns the number of strokes drawn.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Renders the strokes as an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = SIGNATURE_CANVAS_WIDTH,
            h = SIGNATURE_CANVAS_HEIGHT,
        );

        for stroke in &self.strokes {
            let mut path = String::new();
            for (index, point) in stroke.iter().enumerate() {
                let command = if index == 0 { 'M' } else { 'L' };
                let _ = write!(path, "{command}{:.1} {:.1} ", point.x, point.y);
            }
            // A single tap still needs a segment for the round cap to show.
            if let [only] = stroke.as_slice() {
                let _ = write!(path, "L{:.1} {:.1} ", only.x, only.y);
            }

            let _ = write!(
                svg,
                r#"<path d="{}" fill="none" stroke="black" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#,
                path.trim_end()
            );
        }

        svg.push_str("</svg>");
        svg
    }

    /// Returns the signature as a data URI, or `None` when nothing was drawn.
    #[must_use]
    pub fn to_data_url(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        Some(format!(
            "data:image/svg+xml;base64,{}",
            STANDARD.encode(self.to_svg())
        ))
    }
}

fn clamp(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}
