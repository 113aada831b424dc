#![cfg(feature = "archive")]

mod common;

use common::*;
use ecriture::archive::to_zip;
use ecriture::core::*;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn pdf(id: i64, entry_id: i64) -> Attachment {
    Attachment {
        id,
        entry_id,
        mime_type: "application/pdf".into(),
        data: b"%PDF-1.4 stub".to_vec(),
    }
}

fn archive_options() -> ExportOptions {
    options_for(ExportConfigBuilder::new(ExportFormat::FixedWidthArchive).build())
}

#[test]
fn archive_holds_export_and_attachments() {
    let entries = vec![sale_entry()];
    let opts = archive_options().with_attachment_names([(1, "4.pdf".to_string())].into());
    let bytes = to_zip(&entries, &opts, &[pdf(4, 1)]).unwrap();

    assert_eq!(&bytes[0..4], b"PK\x03\x04");
    // Filenames are stored verbatim in the local headers.
    assert!(contains(&bytes, b"export.txt"));
    assert!(contains(&bytes, b"4.pdf"));
}

#[test]
fn one_attachment_per_entry() {
    let entries = vec![sale_entry()];
    let atts = vec![pdf(9, 1), pdf(4, 1)];
    let bytes = to_zip(&entries, &archive_options(), &atts).unwrap();
    assert!(contains(&bytes, b"4.pdf"));
    assert!(!contains(&bytes, b"9.pdf"));
}

#[test]
fn unknown_mime_type_degrades_to_no_extension() {
    let entries = vec![sale_entry()];
    let atts = vec![Attachment {
        id: 7,
        entry_id: 1,
        mime_type: "application/x-unknown".into(),
        data: vec![1, 2, 3],
    }];
    let bytes = to_zip(&entries, &archive_options(), &atts).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn no_attachments_still_produces_the_export() {
    let bytes = to_zip(&[sale_entry()], &archive_options(), &[]).unwrap();
    assert!(contains(&bytes, b"export.txt"));
}

#[test]
fn codec_errors_propagate_through_the_archive() {
    let entry = LedgerEntryBuilder::new(1, "BIG/0001", date(2024, 1, 1), "OD")
        .line(
            LedgerLineBuilder::new(1, 100, "10000000", "Capital")
                .debit(rust_decimal_macros::dec!(10000000000))
                .build(),
        )
        .build();
    let err = to_zip(&[entry], &archive_options(), &[]).unwrap_err();
    assert!(matches!(err, ExportError::FieldOverflow { .. }));
}
