use chrono::NaiveDate;
use ecriture::core::*;
use ecriture::quadra::to_quadra;
use rust_decimal_macros::dec;

fn main() {
    let entry = LedgerEntryBuilder::new(
        42,
        "BILL/2024/0007",
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        "ACH",
    )
    .line(
        LedgerLineBuilder::new(20, 601, "60100000", "Purchases")
            .label("Raw material")
            .debit(dec!(250.00))
            .build(),
    )
    .line(
        LedgerLineBuilder::new(21, 401, "40110000", "Suppliers")
            .partner(9, "Fournier SA")
            .credit(dec!(250.00))
            .due_date(NaiveDate::from_ymd_opt(2024, 4, 20).unwrap())
            .build(),
    )
    .build();

    let config = ExportConfigBuilder::new(ExportFormat::FixedWidth).build();
    let options = ExportOptions::new(config, Currency::eur()).expect("config valid");

    let bytes = to_quadra(&[entry], &options).expect("export rendered");
    std::fs::write("export.txt", &bytes).expect("file written");

    for record in String::from_utf8_lossy(&bytes).lines() {
        println!("{record}");
    }
}
