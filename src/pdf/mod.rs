//! Read access to PDF annotations.
//!
//! The collector only sees the [`AnnotationSource`] trait; [`PdfFile`] is the
//! lopdf-backed implementation for documents on disk.

pub mod reader;
mod text;

pub use reader::PdfFile;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("page index {0} out of range")]
    PageOutOfRange(usize),

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// A highlight quadrilateral in normalized [0, 1] page coordinates.
///
/// Points are in corner order, so indices 0 and 2 are opposite corners of
/// the quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub points: [[f64; 2]; 4],
}

impl Quad {
    /// Scale a corner back into absolute page units.
    pub fn scaled_point(&self, index: usize, width: f64, height: f64) -> (f64, f64) {
        let [x, y] = self.points[index];
        (x * width, y * height)
    }
}

/// An axis-aligned region of a page, in absolute page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn from_diagonal(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0,
            y0: a.1,
            x1: b.0,
            y1: b.1,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (left, right) = (self.x0.min(self.x1), self.x0.max(self.x1));
        let (bottom, top) = (self.y0.min(self.y1), self.y0.max(self.y1));
        x >= left && x <= right && y >= bottom && y <= top
    }
}

/// The closed set of annotation variants the pipeline handles.
///
/// Colors are plain RGB; any alpha or extra channels are already dropped by
/// the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Highlight { color: [u8; 3], quads: Vec<Quad> },
    Text { color: [u8; 3], contents: String },
    Other { subtype: String },
}

/// Capabilities the collector needs from a loaded document.
pub trait AnnotationSource {
    fn page_count(&self) -> usize;

    /// Page dimensions `(width, height)` in page units.
    fn page_size(&self, index: usize) -> Result<(f64, f64), PdfError>;

    /// Annotations of the page, in document order.
    fn annotations(&self, index: usize) -> Result<Vec<Annotation>, PdfError>;

    /// Plain text contained in a region of the page.
    fn text_in_region(&self, index: usize, rect: Rect) -> Result<String, PdfError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_normalizes_corner_order() {
        let rect = Rect::from_diagonal((300.0, 710.0), (70.0, 690.0));
        assert!(rect.contains(72.0, 700.0));
        assert!(!rect.contains(72.0, 720.0));
        assert!(!rect.contains(50.0, 700.0));
    }

    #[test]
    fn quad_points_scale_to_page_units() {
        let quad = Quad {
            points: [[0.25, 0.75], [0.5, 0.75], [0.5, 0.25], [0.25, 0.25]],
        };
        assert_eq!(quad.scaled_point(0, 600.0, 800.0), (150.0, 600.0));
        assert_eq!(quad.scaled_point(2, 600.0, 800.0), (300.0, 200.0));
    }
}
