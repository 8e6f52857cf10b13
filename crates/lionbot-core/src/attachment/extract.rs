//! Content extraction policy for attachments.
//!
//! Images, PDFs, and unknown types go to the remote model untouched.
//! Spreadsheets and word-processor documents are converted to text first,
//! through a [`DocumentParser`] implemented in the infrastructure layer.
//! Extraction never fails the request: a parse error becomes
//! [`ExtractionResult::ExtractionFailed`].

/// Coarse attachment category derived from its mime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Pdf,
    Spreadsheet,
    Document,
    Text,
    Other,
}

/// What to put in the user turn for one attachment.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    /// Forward the payload unchanged.
    Inline { mime_type: String, data: Vec<u8> },
    /// Human-readable rendering of the document.
    ExtractedText(String),
    /// The document could not be parsed; carries the parser's error text.
    ExtractionFailed(String),
}

/// Error returned by a [`DocumentParser`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// One worksheet read from a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    pub name: String,
    /// Cell values, row-major. The first row is rendered as the header.
    pub rows: Vec<Vec<String>>,
    /// Set when the reader dropped rows or columns beyond its limits.
    pub truncated: bool,
}

/// Black-box binary document reader.
///
/// Implementations live in lionbot-infra (e.g., `OfficeDocumentParser`).
pub trait DocumentParser: Send + Sync {
    /// Read every worksheet of a spreadsheet file.
    fn read_spreadsheet(&self, bytes: &[u8]) -> Result<Vec<SheetTable>, ParseError>;

    /// Read the paragraph texts of a word-processor document, in order.
    fn read_document(&self, bytes: &[u8]) -> Result<Vec<String>, ParseError>;
}

/// Classify a mime type. Matching is case-insensitive and substring based,
/// since clients report office formats under many different names.
pub fn classify(mime_type: &str) -> AttachmentKind {
    let mime = mime_type.to_ascii_lowercase();

    if mime.contains("image") {
        AttachmentKind::Image
    } else if mime.contains("pdf") {
        AttachmentKind::Pdf
    } else if mime.contains("sheet") || mime.contains("excel") {
        AttachmentKind::Spreadsheet
    } else if mime.contains("word") {
        AttachmentKind::Document
    } else if mime.starts_with("text/") {
        AttachmentKind::Text
    } else {
        AttachmentKind::Other
    }
}

/// Short human label for an attachment, used in context notes.
pub fn describe(mime_type: &str) -> String {
    match classify(mime_type) {
        AttachmentKind::Image => "image".to_string(),
        AttachmentKind::Pdf => "PDF document".to_string(),
        AttachmentKind::Spreadsheet => "Excel spreadsheet".to_string(),
        AttachmentKind::Document => "Word document".to_string(),
        AttachmentKind::Text => "text file".to_string(),
        AttachmentKind::Other if mime_type.trim().is_empty() => "file".to_string(),
        AttachmentKind::Other => format!("file of type {mime_type}"),
    }
}

/// Apply the extraction policy to one decoded attachment.
pub fn extract(parser: &dyn DocumentParser, mime_type: &str, bytes: &[u8]) -> ExtractionResult {
    match classify(mime_type) {
        AttachmentKind::Spreadsheet => match parser.read_spreadsheet(bytes) {
            Ok(sheets) => ExtractionResult::ExtractedText(render_workbook(&sheets)),
            Err(err) => ExtractionResult::ExtractionFailed(err.to_string()),
        },
        AttachmentKind::Document => match parser.read_document(bytes) {
            Ok(paragraphs) => ExtractionResult::ExtractedText(paragraphs.join("\n").trim().to_string()),
            Err(err) => ExtractionResult::ExtractionFailed(err.to_string()),
        },
        AttachmentKind::Image | AttachmentKind::Pdf | AttachmentKind::Text | AttachmentKind::Other => {
            ExtractionResult::Inline {
                mime_type: mime_type.to_string(),
                data: bytes.to_vec(),
            }
        }
    }
}

/// Appended below a sheet whose reader hit its row or column limit.
pub const TRUNCATION_NOTE: &str = "(sheet truncated: further rows or columns were omitted)";

/// Render all sheets of a workbook, each under its own heading.
pub fn render_workbook(sheets: &[SheetTable]) -> String {
    if sheets.is_empty() {
        return "(empty workbook)".to_string();
    }

    sheets
        .iter()
        .map(|sheet| {
            let table = render_markdown_table(&sheet.rows);
            if sheet.truncated {
                format!("### Sheet: {}\n\n{table}\n\n{TRUNCATION_NOTE}", sheet.name)
            } else {
                format!("### Sheet: {}\n\n{table}", sheet.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render rows as a markdown table. The first row is the header; ragged rows
/// are padded to the widest row.
pub fn render_markdown_table(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return "(empty sheet)".to_string();
    }

    let render_row = |row: &[String]| {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).map(|c| escape_cell(c)).unwrap_or_default())
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(&rows[0]));
    lines.push(format!("|{}", " --- |".repeat(width)));
    for row in &rows[1..] {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

fn escape_cell(cell: &str) -> String {
    cell.trim()
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubParser {
        sheets: Result<Vec<SheetTable>, ParseError>,
        paragraphs: Result<Vec<String>, ParseError>,
    }

    impl DocumentParser for StubParser {
        fn read_spreadsheet(&self, _bytes: &[u8]) -> Result<Vec<SheetTable>, ParseError> {
            self.sheets.clone()
        }

        fn read_document(&self, _bytes: &[u8]) -> Result<Vec<String>, ParseError> {
            self.paragraphs.clone()
        }
    }

    fn failing_parser() -> StubParser {
        StubParser {
            sheets: Err(ParseError("invalid zip header".to_string())),
            paragraphs: Err(ParseError("invalid zip header".to_string())),
        }
    }

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("image/png"), AttachmentKind::Image);
        assert_eq!(classify("application/pdf"), AttachmentKind::Pdf);
        assert_eq!(
            classify("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            AttachmentKind::Spreadsheet
        );
        assert_eq!(classify("application/vnd.ms-excel"), AttachmentKind::Spreadsheet);
        assert_eq!(
            classify("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            AttachmentKind::Document
        );
        assert_eq!(classify("application/msword"), AttachmentKind::Document);
        assert_eq!(classify("text/plain"), AttachmentKind::Text);
        assert_eq!(classify("application/zip"), AttachmentKind::Other);
        assert_eq!(classify("IMAGE/JPEG"), AttachmentKind::Image);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("image/png"), "image");
        assert_eq!(describe("application/pdf"), "PDF document");
        assert_eq!(describe("application/zip"), "file of type application/zip");
        assert_eq!(describe(""), "file");
    }

    #[test]
    fn test_image_and_pdf_pass_through_unchanged() {
        let parser = failing_parser();
        for mime in ["image/png", "application/pdf"] {
            let result = extract(&parser, mime, &[0x89, 0x50, 0x4e]);
            assert_eq!(
                result,
                ExtractionResult::Inline {
                    mime_type: mime.to_string(),
                    data: vec![0x89, 0x50, 0x4e],
                }
            );
        }
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let result = extract(&failing_parser(), "application/octet-stream", b"raw");
        assert!(matches!(result, ExtractionResult::Inline { .. }));
    }

    #[test]
    fn test_spreadsheet_renders_markdown_table() {
        let parser = StubParser {
            sheets: Ok(vec![SheetTable {
                name: "Sheet1".to_string(),
                rows: rows(&[&["Name", "Qty"], &["Apple", "3"]]),
                truncated: false,
            }]),
            paragraphs: Ok(Vec::new()),
        };
        let result = extract(&parser, "application/vnd.ms-excel", b"xlsx");
        let ExtractionResult::ExtractedText(text) = result else {
            panic!("expected extracted text, got {result:?}");
        };
        assert!(text.contains("### Sheet: Sheet1"));
        assert!(text.contains("| Name | Qty |"));
        assert!(text.contains("| --- | --- |"));
        assert!(text.contains("| Apple | 3 |"));
        assert!(!text.contains(TRUNCATION_NOTE));
    }

    #[test]
    fn test_truncated_sheet_carries_note() {
        let sheets = vec![
            SheetTable {
                name: "Big".to_string(),
                rows: rows(&[&["id"], &["1"]]),
                truncated: true,
            },
            SheetTable {
                name: "Small".to_string(),
                rows: rows(&[&["id"]]),
                truncated: false,
            },
        ];
        let text = render_workbook(&sheets);
        assert_eq!(text.matches(TRUNCATION_NOTE).count(), 1);
        let note_at = text.find(TRUNCATION_NOTE).unwrap();
        assert!(note_at < text.find("### Sheet: Small").unwrap());
    }

    #[test]
    fn test_corrupt_spreadsheet_is_a_value_not_a_panic() {
        let result = extract(&failing_parser(), "application/vnd.ms-excel", b"garbage");
        assert_eq!(
            result,
            ExtractionResult::ExtractionFailed("invalid zip header".to_string())
        );
    }

    #[test]
    fn test_document_paragraphs_joined_with_newlines() {
        let parser = StubParser {
            sheets: Ok(Vec::new()),
            paragraphs: Ok(vec!["First".to_string(), "".to_string(), "Second".to_string()]),
        };
        let result = extract(&parser, "application/msword", b"docx");
        assert_eq!(
            result,
            ExtractionResult::ExtractedText("First\n\nSecond".to_string())
        );
    }

    #[test]
    fn test_markdown_table_pads_ragged_rows_and_escapes_pipes() {
        let table = render_markdown_table(&rows(&[&["a", "b", "c"], &["x|y"], &["1", "2\nline"]]));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "| a | b | c |");
        assert_eq!(lines[1], "| --- | --- | --- |");
        assert_eq!(lines[2], "| x\\|y |  |  |");
        assert_eq!(lines[3], "| 1 | 2 line |  |");
    }

    #[test]
    fn test_empty_inputs_render_placeholders() {
        assert_eq!(render_markdown_table(&[]), "(empty sheet)");
        assert_eq!(render_workbook(&[]), "(empty workbook)");
    }
}
