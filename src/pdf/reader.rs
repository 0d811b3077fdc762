//! lopdf-backed [`AnnotationSource`] for documents on disk.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use super::{
    Annotation, AnnotationSource, PdfError, Quad, Rect,
    text::{self, decode_text, number},
};

pub struct PdfFile {
    doc: Document,
    pages: Vec<ObjectId>,
}

impl PdfFile {
    pub fn open(path: &Path) -> Result<Self, PdfError> {
        let doc = Document::load(path)?;
        let pages = doc.get_pages().into_values().collect();
        Ok(Self { doc, pages })
    }

    fn page_id(&self, index: usize) -> Result<ObjectId, PdfError> {
        self.pages
            .get(index)
            .copied()
            .ok_or(PdfError::PageOutOfRange(index))
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(object),
            _ => object,
        }
    }

    /// MediaBox extents, following the Parent chain for inherited boxes.
    fn media_box(&self, page_id: ObjectId) -> Result<(f64, f64), PdfError> {
        let mut dict = self.doc.get_dictionary(page_id)?;
        loop {
            if let Ok(object) = dict.get(b"MediaBox") {
                let values: Vec<f64> = self
                    .resolve(object)
                    .as_array()?
                    .iter()
                    .filter_map(number)
                    .collect();
                let [x0, y0, x1, y1] = values[..] else {
                    return Err(PdfError::Malformed(
                        "MediaBox must hold four numbers".into(),
                    ));
                };
                return Ok(((x1 - x0).abs(), (y1 - y0).abs()));
            }
            match dict.get(b"Parent") {
                Ok(Object::Reference(id)) => dict = self.doc.get_dictionary(*id)?,
                _ => return Err(PdfError::Malformed("page has no MediaBox".into())),
            }
        }
    }

    fn parse_annotation(&self, annot: &Dictionary, width: f64, height: f64) -> Annotation {
        let subtype = annot
            .get(b"Subtype")
            .ok()
            .and_then(|o| self.resolve(o).as_name().ok())
            .unwrap_or(b"");
        let color = self.annotation_color(annot);

        match subtype {
            b"Highlight" => Annotation::Highlight {
                color,
                quads: self.highlight_quads(annot, width, height),
            },
            // Poppler's TextAnnotation covers both sticky notes (/Text) and
            // inline notes (/FreeText).
            b"Text" | b"FreeText" => Annotation::Text {
                color,
                contents: self.annotation_contents(annot),
            },
            other => Annotation::Other {
                subtype: String::from_utf8_lossy(other).into_owned(),
            },
        }
    }

    /// RGB from the `/C` entry; components are in [0, 1]. A single component
    /// is gray, four are CMYK. Absent or unexpected arity reads as black.
    fn annotation_color(&self, annot: &Dictionary) -> [u8; 3] {
        let components: Vec<f64> = match annot
            .get(b"C")
            .ok()
            .and_then(|o| self.resolve(o).as_array().ok())
        {
            Some(values) => values.iter().filter_map(number).collect(),
            None => return [0, 0, 0],
        };

        match components[..] {
            [gray] => {
                let g = channel(gray);
                [g, g, g]
            }
            [r, g, b] => [channel(r), channel(g), channel(b)],
            [c, m, y, k] => [
                channel((1.0 - c) * (1.0 - k)),
                channel((1.0 - m) * (1.0 - k)),
                channel((1.0 - y) * (1.0 - k)),
            ],
            _ => [0, 0, 0],
        }
    }

    fn annotation_contents(&self, annot: &Dictionary) -> String {
        match annot.get(b"Contents").ok().map(|o| self.resolve(o)) {
            Some(Object::String(bytes, _)) => decode_text(bytes),
            _ => String::new(),
        }
    }

    /// QuadPoints come in groups of eight in the zigzag order (top edge pair,
    /// then bottom edge pair); reorder to corner order so opposite corners
    /// sit at indices 0 and 2, and normalize by the page dimensions.
    fn highlight_quads(&self, annot: &Dictionary, width: f64, height: f64) -> Vec<Quad> {
        let coords: Vec<f64> = match annot
            .get(b"QuadPoints")
            .ok()
            .and_then(|o| self.resolve(o).as_array().ok())
        {
            Some(values) => values.iter().filter_map(number).collect(),
            None => return Vec::new(),
        };

        coords
            .chunks_exact(8)
            .map(|q| Quad {
                points: [
                    [q[0] / width, q[1] / height],
                    [q[2] / width, q[3] / height],
                    [q[6] / width, q[7] / height],
                    [q[4] / width, q[5] / height],
                ],
            })
            .collect()
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl AnnotationSource for PdfFile {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, index: usize) -> Result<(f64, f64), PdfError> {
        self.media_box(self.page_id(index)?)
    }

    fn annotations(&self, index: usize) -> Result<Vec<Annotation>, PdfError> {
        let page_id = self.page_id(index)?;
        let (width, height) = self.media_box(page_id)?;
        let dict = self.doc.get_dictionary(page_id)?;

        let Ok(annots) = dict.get(b"Annots") else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for entry in self.resolve(annots).as_array()? {
            if let Ok(annot) = self.resolve(entry).as_dict() {
                out.push(self.parse_annotation(annot, width, height));
            }
        }
        Ok(out)
    }

    fn text_in_region(&self, index: usize, rect: Rect) -> Result<String, PdfError> {
        let runs = text::text_runs(&self.doc, self.page_id(index)?)?;
        let parts: Vec<&str> = runs
            .iter()
            .filter(|run| rect.contains(run.x, run.y))
            .map(|run| run.text.as_str())
            .collect();
        Ok(parts.join(" "))
    }
}
