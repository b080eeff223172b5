//! Spreadsheet export: validated records -> a single-worksheet XLSX workbook.
//!
//! Column order comes from `domain::COLUMN_ORDER` and never varies. Columns
//! are auto-sized to the widest rendered cell plus padding, capped so one
//! long explanation cannot blow up the layout.

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::{QuestionRecord, COLUMN_ORDER};
use crate::util::sanitize_file_fragment;

pub const XLSX_MIME: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "MCQ Questions";
const WIDTH_PADDING: usize = 2;
const MAX_COLUMN_WIDTH: usize = 50;

/// Serialize the record sequence into workbook bytes: a bold header row in
/// the fixed column order, one row per record, auto-sized columns.
pub fn write_workbook(records: &[QuestionRecord]) -> Result<Vec<u8>, XlsxError> {
  let mut workbook = Workbook::new();
  let worksheet = workbook.add_worksheet();
  worksheet.set_name(SHEET_NAME)?;

  let header_format = Format::new().set_bold();
  for (col, title) in COLUMN_ORDER.iter().enumerate() {
    worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
  }

  for (i, rec) in records.iter().enumerate() {
    let row = i as u32 + 1;
    worksheet.write_number(row, 0, f64::from(rec.sequence_number))?;
    worksheet.write_string(row, 1, &rec.question_text)?;
    for (j, option) in rec.options.iter().enumerate() {
      worksheet.write_string(row, 2 + j as u16, option)?;
    }
    worksheet.write_number(row, 6, f64::from(rec.correct_answer_index))?;
    worksheet.write_string(row, 7, &rec.explanation)?;
  }

  for (col, width) in column_widths(records).iter().enumerate() {
    worksheet.set_column_width(col as u16, *width)?;
  }

  workbook.save_to_buffer()
}

/// Download filename: sanitized chapter and class plus a timestamp.
pub fn export_filename(chapter: &str, class_name: &str, at: DateTime<Local>) -> String {
  format!(
    "MCQ_{}_{}_{}.xlsx",
    sanitize_file_fragment(chapter),
    sanitize_file_fragment(class_name),
    at.format("%Y%m%d_%H%M%S"),
  )
}

/// Per-column width: widest rendered cell (header included) + padding,
/// capped at `MAX_COLUMN_WIDTH` characters.
fn column_widths(records: &[QuestionRecord]) -> [f64; COLUMN_ORDER.len()] {
  let mut max_len = COLUMN_ORDER.map(|h| h.chars().count());
  for rec in records {
    for (i, cell) in rendered_cells(rec).iter().enumerate() {
      max_len[i] = max_len[i].max(cell.chars().count());
    }
  }
  max_len.map(|n| (n + WIDTH_PADDING).min(MAX_COLUMN_WIDTH) as f64)
}

/// Cells as the spreadsheet renders them, in column order.
fn rendered_cells(rec: &QuestionRecord) -> [String; COLUMN_ORDER.len()] {
  [
    rec.sequence_number.to_string(),
    rec.question_text.clone(),
    rec.options[0].clone(),
    rec.options[1].clone(),
    rec.options[2].clone(),
    rec.options[3].clone(),
    rec.correct_answer_index.to_string(),
    rec.explanation.clone(),
  ]
}
