//! Quadra fixed-width positional export.
//!
//! One physical record per ledger line, fields at fixed character
//! positions with no delimiters, newline-terminated. Text and dates are
//! silently padded or truncated to their width; numeric fields that do
//! not fit raise [`ExportError::FieldOverflow`] — numeric truncation is
//! never silently accepted.
//!
//! # Example
//!
//! ```ignore
//! use ecriture::core::*;
//! use ecriture::quadra::to_quadra;
//!
//! let config = ExportConfigBuilder::new(ExportFormat::FixedWidth).build();
//! let options = ExportOptions::new(config, Currency::eur())?;
//! let bytes = to_quadra(&entries, &options)?;
//! ```

mod layout;

pub use layout::{QuadraColumn, QuadraField, columns, total_width};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::{
    Attachment, ExportError, ExportOptions, LedgerEntry, LedgerLine, LineKind, encode_text,
};

/// A fixed-width token before padding.
#[derive(Debug, Clone)]
enum Token {
    Blank,
    Text(String),
    Date(NaiveDate),
    /// Unsigned amount, rendered in centimes and zero-padded.
    Amount(Decimal),
    /// Signed amount: sign character plus centimes (v1 layouts).
    SignedAmount(Decimal),
    /// Unsigned integer, zero-padded.
    Integer(i64),
}

/// Render the entries as Quadra fixed-width text and encode the result.
pub fn to_quadra(entries: &[LedgerEntry], opts: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let layout = layout::columns(opts.config.quadra_layout);
    let mut out = String::new();
    for entry in entries {
        for line in entry.lines.iter().filter(|l| l.kind == LineKind::Normal) {
            for column in layout {
                let token = field_token(entry, line, column.field, opts);
                push_token(&mut out, &token, column.width, column.field.name())?;
            }
            out.push('\n');
        }
    }
    Ok(encode_text(&out, opts.config.encoding))
}

/// Resolve one positional field for a ledger line.
fn field_token(
    entry: &LedgerEntry,
    line: &LedgerLine,
    field: QuadraField,
    opts: &ExportOptions,
) -> Token {
    match field {
        QuadraField::RecordType => Token::Text("M".into()),
        QuadraField::AccountNumber => Token::Text(line.account_code.clone()),
        QuadraField::JournalCode | QuadraField::JournalCode3 => {
            Token::Text(entry.journal_code.clone())
        }
        QuadraField::Folio => Token::Text("000".into()),
        QuadraField::EntryDate => Token::Date(entry.date),
        QuadraField::DebitCreditSense => {
            if line.debit > Decimal::ZERO {
                Token::Text("D".into())
            } else {
                Token::Text("C".into())
            }
        }
        QuadraField::Sign => {
            if line.balance() >= Decimal::ZERO {
                Token::Text("+".into())
            } else {
                Token::Text("-".into())
            }
        }
        QuadraField::AmountCentimes => {
            Token::Amount(opts.company_currency.round(line.balance()).abs())
        }
        QuadraField::SignedAmountCentimes => {
            Token::SignedAmount(opts.company_currency.round(line.balance()))
        }
        QuadraField::DueDate => line.due_date.map(Token::Date).unwrap_or(Token::Blank),
        QuadraField::ReconcileCode => text_or_blank(line.reconcile_ref.clone()),
        QuadraField::PieceNumber => Token::Integer(entry.id),
        QuadraField::PieceRef => text_or_blank(entry.reference.clone()),
        QuadraField::CurrencyCode => {
            text_or_blank(line.origin_currency.as_ref().map(|c| c.code.clone()))
        }
        QuadraField::Label30 => text_or_blank(line.label.clone()),
        QuadraField::PieceAlnum => Token::Text(entry.number.clone()),
        QuadraField::CurrencyAmount => match (&line.origin_currency, line.origin_currency_amount) {
            (Some(currency), Some(amount)) => Token::Amount(currency.round(amount).abs()),
            _ => Token::Blank,
        },
        QuadraField::AttachmentName => {
            text_or_blank(opts.attachment_names.get(&entry.id).cloned())
        }
        _ => Token::Blank,
    }
}

fn text_or_blank(value: Option<String>) -> Token {
    match value {
        Some(s) if !s.is_empty() => Token::Text(s),
        _ => Token::Blank,
    }
}

/// Append one fixed-length token.
fn push_token(
    out: &mut String,
    token: &Token,
    width: usize,
    field: &'static str,
) -> Result<(), ExportError> {
    match token {
        Token::Blank => push_padded(out, "", width),
        Token::Text(s) => push_padded(out, &collapse_newlines(s), width),
        Token::Date(d) => push_padded(out, &d.format("%d%m%y").to_string(), width),
        Token::Amount(amount) => {
            let digits = centimes(*amount, field)?.to_string();
            push_numeric(out, &digits, width, field)?;
        }
        Token::SignedAmount(amount) => {
            out.push(if amount.is_sign_negative() { '-' } else { '+' });
            let digits = centimes(amount.abs(), field)?.to_string();
            push_numeric(out, &digits, width - 1, field)?;
        }
        Token::Integer(n) => {
            push_numeric(out, &n.unsigned_abs().to_string(), width, field)?;
        }
    }
    Ok(())
}

/// Left-justify, space-pad, silently truncate to width.
fn push_padded(out: &mut String, s: &str, width: usize) {
    let mut count = 0;
    for c in s.chars().take(width) {
        out.push(c);
        count += 1;
    }
    for _ in count..width {
        out.push(' ');
    }
}

/// Right-justify and zero-pad a digit string; overflow is fatal.
fn push_numeric(
    out: &mut String,
    digits: &str,
    width: usize,
    field: &'static str,
) -> Result<(), ExportError> {
    if digits.len() > width {
        return Err(ExportError::FieldOverflow {
            field,
            value: digits.to_string(),
            width,
        });
    }
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(digits);
    Ok(())
}

/// Amount in minor units (centimes): |value| × 100, rounded.
fn centimes(amount: Decimal, field: &'static str) -> Result<u128, ExportError> {
    let cents = (amount * Decimal::ONE_HUNDRED).round();
    cents
        .to_u128()
        .ok_or_else(|| ExportError::FieldOverflow {
            field,
            value: cents.to_string(),
            width: 0,
        })
}

/// Collapse embedded newlines to single spaces.
fn collapse_newlines(s: &str) -> String {
    if s.contains(['\n', '\r']) {
        s.lines().collect::<Vec<_>>().join(" ")
    } else {
        s.to_string()
    }
}

/// Archive filename of an attachment: `{id}{extension}`, the extension
/// derived from the stored MIME type. Unknown MIME types degrade to an
/// empty extension rather than aborting the export.
pub fn attachment_filename(attachment: &Attachment) -> String {
    format!(
        "{}{}",
        attachment.id,
        extension_for_mime(&attachment.mime_type)
    )
}

/// Map a MIME type to a file extension. Returns an empty string for
/// unknown types.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "application/pdf" => ".pdf",
        "image/png" => ".png",
        "image/jpeg" => ".jpg",
        "image/gif" => ".gif",
        "image/tiff" => ".tiff",
        "text/plain" => ".txt",
        "text/csv" => ".csv",
        "text/html" => ".html",
        "application/xml" | "text/xml" => ".xml",
        "application/zip" => ".zip",
        _ => "",
    }
}

/// Select and name at most one attachment per entry: the one with the
/// lowest attachment id, a stable tie-break.
pub fn attachment_names(attachments: &[Attachment]) -> BTreeMap<i64, String> {
    select_attachments(attachments)
        .into_iter()
        .map(|(entry_id, att)| (entry_id, attachment_filename(att)))
        .collect()
}

/// At most one attachment per entry id, keeping the lowest attachment
/// id.
pub(crate) fn select_attachments(attachments: &[Attachment]) -> BTreeMap<i64, &Attachment> {
    let mut selected: BTreeMap<i64, &Attachment> = BTreeMap::new();
    for att in attachments {
        selected
            .entry(att.entry_id)
            .and_modify(|kept| {
                if att.id < kept.id {
                    *kept = att;
                }
            })
            .or_insert(att);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn padded_text_truncates_and_pads() {
        let mut out = String::new();
        push_padded(&mut out, "abc", 5);
        assert_eq!(out, "abc  ");
        out.clear();
        push_padded(&mut out, "abcdef", 3);
        assert_eq!(out, "abc");
    }

    #[test]
    fn numeric_token_zero_pads() {
        let mut out = String::new();
        push_numeric(&mut out, "999", 3, "test").unwrap();
        assert_eq!(out, "999");
        out.clear();
        push_numeric(&mut out, "42", 5, "test").unwrap();
        assert_eq!(out, "00042");
    }

    #[test]
    fn numeric_token_overflow_is_fatal() {
        let mut out = String::new();
        let err = push_numeric(&mut out, "1000", 3, "test").unwrap_err();
        assert!(matches!(err, ExportError::FieldOverflow { width: 3, .. }));
    }

    #[test]
    fn amount_token_in_centimes() {
        let mut out = String::new();
        push_token(&mut out, &Token::Amount(dec!(9.99)), 3, "test").unwrap();
        assert_eq!(out, "999");
        out.clear();
        let err = push_token(&mut out, &Token::Amount(dec!(10.00)), 3, "test").unwrap_err();
        assert!(matches!(err, ExportError::FieldOverflow { .. }));
    }

    #[test]
    fn signed_amount_token() {
        let mut out = String::new();
        push_token(&mut out, &Token::SignedAmount(dec!(-12.34)), 6, "test").unwrap();
        assert_eq!(out, "-01234");
        out.clear();
        push_token(&mut out, &Token::SignedAmount(dec!(12.34)), 6, "test").unwrap();
        assert_eq!(out, "+01234");
    }

    #[test]
    fn newlines_collapsed() {
        assert_eq!(collapse_newlines("a\nb\r\nc"), "a b c");
        assert_eq!(collapse_newlines("plain"), "plain");
    }

    #[test]
    fn mime_extensions() {
        assert_eq!(extension_for_mime("application/pdf"), ".pdf");
        assert_eq!(extension_for_mime("application/x-unknown"), "");
    }

    #[test]
    fn one_attachment_per_entry_lowest_id_wins() {
        let atts = vec![
            Attachment {
                id: 9,
                entry_id: 1,
                mime_type: "application/pdf".into(),
                data: vec![],
            },
            Attachment {
                id: 3,
                entry_id: 1,
                mime_type: "image/png".into(),
                data: vec![],
            },
            Attachment {
                id: 5,
                entry_id: 2,
                mime_type: "application/pdf".into(),
                data: vec![],
            },
        ];
        let names = attachment_names(&atts);
        assert_eq!(names.len(), 2);
        assert_eq!(names[&1], "3.png");
        assert_eq!(names[&2], "5.pdf");
    }
}
