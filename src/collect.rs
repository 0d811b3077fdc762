//! Scan a document and bucket its annotations by nearest catalog color.

use std::fmt;

use indexmap::IndexMap;
use tracing::warn;

use crate::{
    palette::{ColorEntry, SUPPORTED_COLORS, nearest_color},
    pdf::{Annotation, AnnotationSource, PdfError, Rect},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Highlight,
    Text,
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationKind::Highlight => write!(f, "Highlight"),
            AnnotationKind::Text => write!(f, "Text"),
        }
    }
}

/// One extracted annotation. Immutable once built; owned by the bucket it
/// was appended to.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    /// 1-based page number.
    pub page: u32,
    pub content: String,
    pub kind: AnnotationKind,
}

/// Records grouped by catalog color name, one bucket per catalog entry,
/// iterated in catalog order. Append-only during the scan.
#[derive(Debug)]
pub struct ColorBuckets {
    inner: IndexMap<&'static str, Vec<AnnotationRecord>>,
}

impl ColorBuckets {
    fn new() -> Self {
        let mut inner = IndexMap::new();
        for entry in &SUPPORTED_COLORS {
            inner.insert(entry.name, Vec::new());
        }
        Self { inner }
    }

    fn push(&mut self, color: &ColorEntry, record: AnnotationRecord) {
        self.inner.entry(color.name).or_default().push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[AnnotationRecord])> {
        self.inner
            .iter()
            .map(|(name, records)| (*name, records.as_slice()))
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values().all(Vec::is_empty)
    }
}

/// Walk every page in order and bucket each supported annotation.
pub fn collect<S: AnnotationSource>(source: &S) -> Result<ColorBuckets, PdfError> {
    let mut buckets = ColorBuckets::new();

    for index in 0..source.page_count() {
        let (width, height) = source.page_size(index)?;
        let page = index as u32 + 1;

        for annotation in source.annotations(index)? {
            match annotation {
                Annotation::Highlight { color, quads } => {
                    let named = nearest_color(color);
                    let mut content = String::new();
                    for quad in &quads {
                        let rect = Rect::from_diagonal(
                            quad.scaled_point(0, width, height),
                            quad.scaled_point(2, width, height),
                        );
                        content.push_str(&source.text_in_region(index, rect)?);
                        // Every quad's text gets a trailing space, the last
                        // one included; nothing is trimmed.
                        content.push(' ');
                    }
                    buckets.push(
                        named,
                        AnnotationRecord {
                            page,
                            content,
                            kind: AnnotationKind::Highlight,
                        },
                    );
                }
                Annotation::Text { color, contents } => {
                    buckets.push(
                        nearest_color(color),
                        AnnotationRecord {
                            page,
                            content: contents,
                            kind: AnnotationKind::Text,
                        },
                    );
                }
                Annotation::Other { subtype } => {
                    warn!(page, subtype = %subtype, "skipping unsupported annotation");
                }
            }
        }
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::Quad;

    struct MockPage {
        size: (f64, f64),
        annotations: Vec<Annotation>,
        /// Regions with known text, matched by approximate rect equality.
        regions: Vec<(Rect, &'static str)>,
    }

    struct MockSource {
        pages: Vec<MockPage>,
    }

    impl AnnotationSource for MockSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_size(&self, index: usize) -> Result<(f64, f64), PdfError> {
            Ok(self.pages[index].size)
        }

        fn annotations(&self, index: usize) -> Result<Vec<Annotation>, PdfError> {
            Ok(self.pages[index].annotations.clone())
        }

        fn text_in_region(&self, index: usize, rect: Rect) -> Result<String, PdfError> {
            let close = |a: f64, b: f64| (a - b).abs() < 1e-6;
            Ok(self.pages[index]
                .regions
                .iter()
                .find(|(r, _)| {
                    close(r.x0, rect.x0)
                        && close(r.y0, rect.y0)
                        && close(r.x1, rect.x1)
                        && close(r.y1, rect.y1)
                })
                .map(|(_, text)| (*text).to_string())
                .unwrap_or_default())
        }
    }

    fn full_page_quad() -> Quad {
        Quad {
            points: [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        }
    }

    fn empty_page() -> MockPage {
        MockPage {
            size: (612.0, 792.0),
            annotations: vec![],
            regions: vec![],
        }
    }

    #[test]
    fn empty_document_yields_empty_buckets() {
        let source = MockSource {
            pages: vec![empty_page(), empty_page()],
        };
        let buckets = collect(&source).unwrap();
        assert!(buckets.is_empty());
        assert_eq!(buckets.len(), 0);
        // Buckets are pre-seeded in catalog order even when empty.
        let names: Vec<&str> = buckets.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Red", "Green", "Blue", "Yellow", "Cyan"]);
    }

    #[test]
    fn full_page_green_highlight_lands_in_the_green_bucket() {
        let mut pages = vec![empty_page(), empty_page(), empty_page()];
        pages[2] = MockPage {
            size: (612.0, 792.0),
            annotations: vec![Annotation::Highlight {
                color: [0, 255, 0],
                quads: vec![full_page_quad()],
            }],
            regions: vec![(
                Rect::from_diagonal((0.0, 792.0), (612.0, 0.0)),
                "the whole page",
            )],
        };
        let source = MockSource { pages };

        let buckets = collect(&source).unwrap();
        let green: Vec<_> = buckets
            .iter()
            .find(|(name, _)| *name == "Green")
            .map(|(_, records)| records.to_vec())
            .unwrap();
        assert_eq!(
            green,
            vec![AnnotationRecord {
                page: 3,
                content: "the whole page ".into(),
                kind: AnnotationKind::Highlight,
            }]
        );
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn multi_quad_highlights_concatenate_with_trailing_spaces() {
        let quad_a = Quad {
            points: [[0.0, 1.0], [0.5, 1.0], [0.5, 0.5], [0.0, 0.5]],
        };
        let quad_b = Quad {
            points: [[0.0, 0.5], [0.5, 0.5], [0.5, 0.0], [0.0, 0.0]],
        };
        let source = MockSource {
            pages: vec![MockPage {
                size: (100.0, 100.0),
                annotations: vec![Annotation::Highlight {
                    color: [255, 255, 0],
                    quads: vec![quad_a, quad_b],
                }],
                regions: vec![
                    (Rect::from_diagonal((0.0, 100.0), (50.0, 50.0)), "upper"),
                    (Rect::from_diagonal((0.0, 50.0), (50.0, 0.0)), "lower"),
                ],
            }],
        };

        let buckets = collect(&source).unwrap();
        let (_, yellow) = buckets.iter().find(|(name, _)| *name == "Yellow").unwrap();
        assert_eq!(yellow[0].content, "upper lower ");
    }

    #[test]
    fn text_annotations_carry_their_contents() {
        let source = MockSource {
            pages: vec![MockPage {
                size: (612.0, 792.0),
                annotations: vec![Annotation::Text {
                    color: [250, 5, 5],
                    contents: "remember this".into(),
                }],
                regions: vec![],
            }],
        };

        let buckets = collect(&source).unwrap();
        let (_, red) = buckets.iter().find(|(name, _)| *name == "Red").unwrap();
        assert_eq!(
            red.to_vec(),
            vec![AnnotationRecord {
                page: 1,
                content: "remember this".into(),
                kind: AnnotationKind::Text,
            }]
        );
    }

    #[test]
    fn unsupported_variants_are_skipped() {
        let source = MockSource {
            pages: vec![MockPage {
                size: (612.0, 792.0),
                annotations: vec![
                    Annotation::Other {
                        subtype: "Link".into(),
                    },
                    Annotation::Text {
                        color: [0, 0, 255],
                        contents: "kept".into(),
                    },
                ],
                regions: vec![],
            }],
        };

        let buckets = collect(&source).unwrap();
        assert_eq!(buckets.len(), 1);
        let (_, blue) = buckets.iter().find(|(name, _)| *name == "Blue").unwrap();
        assert_eq!(blue[0].content, "kept");
    }

    #[test]
    fn same_color_records_keep_scan_order_across_pages() {
        let make_page = |text: &'static str| MockPage {
            size: (100.0, 100.0),
            annotations: vec![Annotation::Highlight {
                color: [0, 250, 250],
                quads: vec![full_page_quad()],
            }],
            regions: vec![(Rect::from_diagonal((0.0, 100.0), (100.0, 0.0)), text)],
        };
        let source = MockSource {
            pages: vec![make_page("first"), make_page("second")],
        };

        let buckets = collect(&source).unwrap();
        let (_, cyan) = buckets.iter().find(|(name, _)| *name == "Cyan").unwrap();
        assert_eq!(cyan.len(), 2);
        assert_eq!((cyan[0].page, cyan[0].content.as_str()), (1, "first "));
        assert_eq!((cyan[1].page, cyan[1].content.as_str()), (2, "second "));
    }
}
