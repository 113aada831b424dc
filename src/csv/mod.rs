//! Delimited-text (CSV-style) export.
//!
//! Renders the row stream with a configurable delimiter, quoting mode,
//! decimal separator and date pattern, then encodes the finished text
//! into the configured charset. Output uses CRLF row terminators.
//!
//! # Example
//!
//! ```ignore
//! use ecriture::core::*;
//! use ecriture::csv::to_delimited;
//!
//! let config = ExportConfigBuilder::new(ExportFormat::DelimitedText)
//!     .delimiter(Delimiter::Semicolon)
//!     .build();
//! let options = ExportOptions::new(config, Currency::eur())?;
//! let bytes = to_delimited(&entries, &options)?;
//! ```

use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;

use crate::core::{
    CellValue, DecimalSeparator, ExportError, ExportOptions, LedgerEntry, Quoting, encode_text,
    rows,
};

/// Render the entries as delimited text and encode the result.
///
/// Deterministic for a given record batch and configuration.
pub fn to_delimited(entries: &[LedgerEntry], opts: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(opts.config.delimiter.as_byte())
        .quote_style(quote_style(opts.config.quoting))
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    if opts.config.header_line {
        writer
            .write_record(opts.columns.iter().map(|c| c.header_label.as_str()))
            .map_err(codec_err)?;
    }

    for row in rows(entries, opts) {
        writer
            .write_record(row.cells.iter().map(|cell| format_cell(cell, opts)))
            .map_err(codec_err)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| ExportError::Codec(e.to_string()))?;
    let text = String::from_utf8(data).map_err(codec_err)?;
    Ok(encode_text(&text, opts.config.encoding))
}

fn quote_style(quoting: Quoting) -> QuoteStyle {
    match quoting {
        Quoting::All => QuoteStyle::Always,
        Quoting::Minimal => QuoteStyle::Necessary,
        Quoting::None => QuoteStyle::Never,
    }
}

/// Render one cell as a text field. Empty cells become blank fields.
fn format_cell(cell: &CellValue, opts: &ExportOptions) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Date(d) => d.format(&opts.config.date_format).to_string(),
        CellValue::Money(amount, _) | CellValue::Number(amount) => format_amount(
            *amount,
            opts.company_currency.decimal_places,
            opts.config.decimal_separator,
        ),
    }
}

/// Fixed-decimal amount formatting with the configured separator.
fn format_amount(amount: Decimal, decimal_places: u32, separator: DecimalSeparator) -> String {
    let rounded = amount.round_dp(decimal_places);
    let s = format!("{rounded:.prec$}", prec = decimal_places as usize);
    match separator {
        DecimalSeparator::Dot => s,
        DecimalSeparator::Comma => s.replace('.', ","),
    }
}

fn codec_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Codec(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_formatting_dot() {
        assert_eq!(format_amount(dec!(100), 2, DecimalSeparator::Dot), "100.00");
        assert_eq!(
            format_amount(dec!(24.946), 2, DecimalSeparator::Dot),
            "24.95"
        );
    }

    #[test]
    fn amount_formatting_comma() {
        assert_eq!(
            format_amount(dec!(1190.5), 2, DecimalSeparator::Comma),
            "1190,50"
        );
    }

    #[test]
    fn zero_precision_currency() {
        assert_eq!(format_amount(dec!(1190.4), 0, DecimalSeparator::Dot), "1190");
    }
}
