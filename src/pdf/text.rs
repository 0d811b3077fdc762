//! Positional text runs from a page content stream.
//!
//! This is a deliberately small extractor: it tracks the text matrix through
//! the positioning operators and records each show-text operation together
//! with its origin. Glyph widths, CMap-driven font decoding and the `cm`
//! transform are not modeled; strings decode as UTF-16BE when BOM-prefixed
//! and byte-per-char otherwise.

use lopdf::{Document, Object, ObjectId, content::Content};

use super::PdfError;

/// A show-text operation and the text-space origin it was painted at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextRun {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translated(self, tx: f64, ty: f64) -> Matrix {
        Matrix {
            e: tx * self.a + ty * self.c + self.e,
            f: tx * self.b + ty * self.d + self.f,
            ..self
        }
    }
}

pub(crate) fn text_runs(doc: &Document, page_id: ObjectId) -> Result<Vec<TextRun>, PdfError> {
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut runs = Vec::new();
    let mut tm = Matrix::IDENTITY;
    // Line matrix; Td/TD/T* move this one, shown text starts from it.
    let mut tlm = Matrix::IDENTITY;
    let mut leading = 0.0;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                tm = Matrix::IDENTITY;
                tlm = Matrix::IDENTITY;
            }
            "Tm" => {
                if let [a, b, c, d, e, f] = numbers(&op.operands)[..] {
                    tlm = Matrix { a, b, c, d, e, f };
                    tm = tlm;
                }
            }
            "Td" => {
                if let [tx, ty] = numbers(&op.operands)[..] {
                    tlm = tlm.translated(tx, ty);
                    tm = tlm;
                }
            }
            "TD" => {
                if let [tx, ty] = numbers(&op.operands)[..] {
                    leading = -ty;
                    tlm = tlm.translated(tx, ty);
                    tm = tlm;
                }
            }
            "TL" => {
                if let [l] = numbers(&op.operands)[..] {
                    leading = l;
                }
            }
            "T*" => {
                tlm = tlm.translated(0.0, -leading);
                tm = tlm;
            }
            "Tj" => push_run(&mut runs, tm, shown_text(op.operands.first())),
            "'" => {
                tlm = tlm.translated(0.0, -leading);
                tm = tlm;
                push_run(&mut runs, tm, shown_text(op.operands.first()));
            }
            "\"" => {
                tlm = tlm.translated(0.0, -leading);
                tm = tlm;
                push_run(&mut runs, tm, shown_text(op.operands.get(2)));
            }
            "TJ" => {
                let text = op
                    .operands
                    .first()
                    .and_then(|o| o.as_array().ok())
                    .map(|parts| {
                        parts
                            .iter()
                            .filter_map(|part| match part {
                                Object::String(bytes, _) => Some(decode_text(bytes)),
                                _ => None,
                            })
                            .collect::<String>()
                    })
                    .unwrap_or_default();
                push_run(&mut runs, tm, text);
            }
            _ => {}
        }
    }

    Ok(runs)
}

fn push_run(runs: &mut Vec<TextRun>, tm: Matrix, text: String) {
    if !text.is_empty() {
        runs.push(TextRun {
            x: tm.e,
            y: tm.f,
            text,
        });
    }
}

fn shown_text(operand: Option<&Object>) -> String {
    match operand {
        Some(Object::String(bytes, _)) => decode_text(bytes),
        _ => String::new(),
    }
}

fn numbers(operands: &[Object]) -> Vec<f64> {
    operands.iter().filter_map(number).collect()
}

pub(crate) fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(v) => Some(*v as f64),
        Object::Real(v) => Some(f64::from(*v)),
        _ => None,
    }
}

/// UTF-16BE when BOM-prefixed, otherwise one char per byte (the printable
/// range of PDFDocEncoding matches Latin-1).
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| char::from(b)).collect()
    }
}
