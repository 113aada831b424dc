use chrono::NaiveDate;
use ecriture::core::*;
use ecriture::csv::to_delimited;
use rust_decimal_macros::dec;

fn main() {
    // Build a sale entry
    let entry = LedgerEntryBuilder::new(
        1,
        "INV/2024/0001",
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        "VTE",
    )
    .reference("SO0042")
    .line(
        LedgerLineBuilder::new(10, 411, "411100", "Clients")
            .partner(7, "Acme SARL")
            .label("Invoice INV/2024/0001")
            .debit(dec!(120.00))
            .due_date(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap())
            .build(),
    )
    .line(
        LedgerLineBuilder::new(11, 706, "706000", "Services")
            .label("Consulting")
            .credit(dec!(100.00))
            .build(),
    )
    .line(
        LedgerLineBuilder::new(12, 445, "445710", "Collected VAT")
            .credit(dec!(20.00))
            .build(),
    )
    .build();

    // Semicolon-delimited, comma decimals, the common French import dialect
    let config = ExportConfigBuilder::new(ExportFormat::DelimitedText)
        .delimiter(Delimiter::Semicolon)
        .decimal_separator(DecimalSeparator::Comma)
        .partner_account_ids([411])
        .build();
    let options = ExportOptions::new(config, Currency::eur()).expect("config valid");

    let bytes = to_delimited(&[entry], &options).expect("export rendered");
    std::fs::write("entries.csv", &bytes).expect("file written");
    println!("Wrote entries.csv ({} bytes)", bytes.len());
}
