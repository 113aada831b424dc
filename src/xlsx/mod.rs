//! Styled single-sheet XLSX export.
//!
//! One data row per ledger/analytic line, cell styles selected by the
//! column's value kind, analytic rows highlighted with a background
//! color, column widths taken from the column configuration. The
//! workbook is a finished artifact: widths and order are fixed at
//! generation time.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

use crate::core::{CellValue, ExportError, ExportOptions, LedgerEntry, ValueKind, rows};

const SHEET_NAME: &str = "Ledger";
const HEADER_ROW_HEIGHT: f64 = 24.0;
const DEFAULT_ANALYTIC_BG: u32 = 0xFF9999;

/// Per-kind cell formats, with analytic-highlight variants.
struct Styles {
    header: Format,
    date: Format,
    money: Format,
    number: Format,
    text: Format,
    ana_date: Format,
    ana_money: Format,
    ana_number: Format,
    ana_text: Format,
}

impl Styles {
    fn new(opts: &ExportOptions) -> Self {
        let font_size = opts.config.xlsx_font_size as f64;
        let bg = parse_color(&opts.config.xlsx_analytic_bg_color).unwrap_or(DEFAULT_ANALYTIC_BG);

        let money_format = format!("# ### ##0.00 {}", opts.company_currency.symbol);
        let date = Format::new().set_num_format("dd/mm/yyyy").set_font_size(font_size);
        let money = Format::new().set_num_format(money_format).set_font_size(font_size);
        let number = Format::new().set_num_format("# ### ##0.00").set_font_size(font_size);
        let text = Format::new().set_text_wrap().set_font_size(font_size);

        Self {
            header: Format::new()
                .set_bold()
                .set_text_wrap()
                .set_align(FormatAlign::Center)
                .set_font_size(font_size),
            ana_date: date.clone().set_background_color(Color::RGB(bg)),
            ana_money: money.clone().set_background_color(Color::RGB(bg)),
            ana_number: number.clone().set_background_color(Color::RGB(bg)),
            ana_text: text.clone().set_background_color(Color::RGB(bg)),
            date,
            money,
            number,
            text,
        }
    }

    fn for_kind(&self, kind: ValueKind, is_analytic: bool) -> &Format {
        match (kind, is_analytic) {
            (ValueKind::Date, false) => &self.date,
            (ValueKind::Money, false) => &self.money,
            (ValueKind::Number, false) => &self.number,
            (ValueKind::Text, false) => &self.text,
            (ValueKind::Date, true) => &self.ana_date,
            (ValueKind::Money, true) => &self.ana_money,
            (ValueKind::Number, true) => &self.ana_number,
            (ValueKind::Text, true) => &self.ana_text,
        }
    }
}

/// Render the entries as a styled XLSX workbook.
pub fn to_xlsx(entries: &[LedgerEntry], opts: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let styles = Styles::new(opts);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(codec_err)?;

    for (col, spec) in opts.columns.iter().enumerate() {
        sheet
            .set_column_width(col as u16, spec.width as f64)
            .map_err(codec_err)?;
    }

    let mut row_num: u32 = 0;
    if opts.config.header_line {
        sheet.set_row_height(0, HEADER_ROW_HEIGHT).map_err(codec_err)?;
        for (col, spec) in opts.columns.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, spec.header_label.as_str(), &styles.header)
                .map_err(codec_err)?;
        }
        row_num = 1;
    }

    for row in rows(entries, opts) {
        for (col, (cell, spec)) in row.cells.iter().zip(&opts.columns).enumerate() {
            let format = styles.for_kind(spec.kind, row.is_analytic);
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    sheet
                        .write_with_format(row_num, col as u16, s.as_str(), format)
                        .map_err(codec_err)?;
                }
                CellValue::Date(d) => {
                    sheet
                        .write_with_format(row_num, col as u16, d, format)
                        .map_err(codec_err)?;
                }
                CellValue::Money(amount, _) | CellValue::Number(amount) => {
                    sheet
                        .write_with_format(
                            row_num,
                            col as u16,
                            amount.to_f64().unwrap_or(0.0),
                            format,
                        )
                        .map_err(codec_err)?;
                }
            }
        }
        row_num += 1;
    }

    workbook.save_to_buffer().map_err(codec_err)
}

/// Parse an `#rrggbb` color string.
fn parse_color(color: &str) -> Option<u32> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

fn codec_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Codec(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parsing() {
        assert_eq!(parse_color("#ff9999"), Some(0xFF9999));
        assert_eq!(parse_color("#000000"), Some(0));
        assert_eq!(parse_color("ff9999"), None);
        assert_eq!(parse_color("#ff99"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }
}
