//! OfficeDocumentParser -- concrete [`DocumentParser`] for OOXML files.
//!
//! Spreadsheets (`.xlsx`) are read with umya-spreadsheet, word-processor
//! documents (`.docx`) with docx-rs. Legacy binary formats (`.xls`, `.doc`)
//! are not understood and surface as parse errors.
//!
//! Sheets are read sparsely: only cells stored in the file are visited, and
//! the rendered table is capped at [`MAX_SHEET_ROWS`] x [`MAX_SHEET_COLUMNS`].

use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;

use docx_rs::{DocumentChild, InsertChild, ParagraphChild, Run, RunChild};
use umya_spreadsheet::Worksheet;

use lionbot_core::attachment::extract::{DocumentParser, ParseError, SheetTable};

/// Non-empty rows kept per sheet.
pub const MAX_SHEET_ROWS: usize = 500;

/// Non-empty columns kept per sheet.
pub const MAX_SHEET_COLUMNS: usize = 50;

/// Reads xlsx workbooks and docx documents from memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficeDocumentParser;

impl OfficeDocumentParser {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for OfficeDocumentParser {
    fn read_spreadsheet(&self, bytes: &[u8]) -> Result<Vec<SheetTable>, ParseError> {
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
            .map_err(|e| ParseError(format!("failed to read spreadsheet: {e}")))?;

        Ok(book.get_sheet_collection().iter().map(read_sheet).collect())
    }

    fn read_document(&self, bytes: &[u8]) -> Result<Vec<String>, ParseError> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ParseError(format!("failed to read document: {e}")))?;

        let paragraphs = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
                _ => None,
            })
            .collect();

        Ok(paragraphs)
    }
}

fn read_sheet(sheet: &Worksheet) -> SheetTable {
    // row -> column -> value, non-blank cells only
    let mut cells: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
    for cell in sheet.get_cell_collection() {
        let value = cell.get_value();
        if value.trim().is_empty() {
            continue;
        }
        let coordinate = cell.get_coordinate();
        cells
            .entry(*coordinate.get_row_num())
            .or_default()
            .insert(*coordinate.get_col_num(), value.to_string());
    }

    let columns: BTreeSet<u32> = cells.values().flat_map(|row| row.keys().copied()).collect();
    let mut truncated = columns.len() > MAX_SHEET_COLUMNS;
    let columns: Vec<u32> = columns.into_iter().take(MAX_SHEET_COLUMNS).collect();

    let mut rows: Vec<Vec<String>> = cells
        .values()
        .map(|row| {
            columns
                .iter()
                .map(|col| row.get(col).cloned().unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();
    if rows.len() > MAX_SHEET_ROWS {
        rows.truncate(MAX_SHEET_ROWS);
        truncated = true;
    }

    SheetTable {
        name: sheet.get_name().to_string(),
        rows,
        truncated,
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    push_paragraph_children(children, &mut text);
    text
}

fn push_paragraph_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
