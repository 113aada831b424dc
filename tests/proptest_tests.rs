#![cfg(all(feature = "csv", feature = "quadra"))]

mod common;

use common::*;
use ecriture::core::*;
use ecriture::csv::to_delimited;
use ecriture::quadra::{to_quadra, total_width};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn entry_with_amount(cents: i64, label: &str) -> LedgerEntry {
    let amount = Decimal::new(cents, 2);
    LedgerEntryBuilder::new(1, "OD/0001", date(2024, 1, 1), "OD")
        .line(
            LedgerLineBuilder::new(1, 100, "471000", "Suspense")
                .label(label)
                .debit(amount)
                .build(),
        )
        .line(
            LedgerLineBuilder::new(2, 101, "471100", "Suspense 2")
                .credit(amount)
                .build(),
        )
        .build()
}

fn quadra_options() -> ExportOptions {
    options_for(ExportConfigBuilder::new(ExportFormat::FixedWidth).build())
}

proptest! {
    /// Any representable amount survives the fixed-width round trip.
    #[test]
    fn amount_centimes_round_trip(cents in 1i64..=999_999_999_999) {
        let entry = entry_with_amount(cents, "x");
        let out = to_quadra(&[entry], &quadra_options()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        let parsed: i64 = first[43..55].parse().unwrap();
        prop_assert_eq!(parsed, cents);
        prop_assert_eq!(&first[41..43], "D+");
    }

    /// Text fields never disturb the record width, whatever the label.
    #[test]
    fn record_width_is_invariant(label in "\\PC{0,80}") {
        let entry = entry_with_amount(100, &label);
        let out = to_quadra(&[entry], &quadra_options()).unwrap();
        let text: String = out.iter().map(|b| *b as char).collect();
        for rec in text.lines() {
            prop_assert_eq!(rec.chars().count(), total_width(QuadraLayoutVersion::V2));
        }
    }

    /// The delimited codec emits one terminated record per row plus the
    /// header, regardless of content.
    #[test]
    fn delimited_line_count(cents in 1i64..=1_000_000, label in "[a-zA-Z0-9 ,;\"]{0,40}") {
        let entry = entry_with_amount(cents, &label);
        let out = to_delimited(&[entry], &default_options()).unwrap();
        let text = String::from_utf8(out).unwrap();
        prop_assert_eq!(text.matches("\r\n").count(), 3);
        prop_assert!(text.ends_with("\r\n"));
    }

    /// Same input, same bytes.
    #[test]
    fn delimited_output_is_deterministic(cents in 1i64..=1_000_000) {
        let entry = entry_with_amount(cents, "stable");
        let first = to_delimited(&[entry.clone()], &default_options()).unwrap();
        let second = to_delimited(&[entry], &default_options()).unwrap();
        prop_assert_eq!(first, second);
    }
}
