//! # ecriture
//!
//! Accounting journal-entry export library: resolves configurable
//! logical columns over ledger records and renders them into the byte
//! formats third-party accounting software ingests — delimited text,
//! styled XLSX, Quadra-class fixed-width positional text, and a
//! fixed-width-plus-attachments ZIP archive.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Artifacts are deterministic: the same records and the same
//! configuration produce byte-identical output.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ecriture::core::*;
//! use rust_decimal_macros::dec;
//!
//! let entry = LedgerEntryBuilder::new(
//!     1,
//!     "INV/2024/0001",
//!     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
//!     "VTE",
//! )
//! .line(
//!     LedgerLineBuilder::new(10, 411, "411100", "Clients")
//!         .partner(7, "Acme SARL")
//!         .debit(dec!(120.00))
//!         .build(),
//! )
//! .build();
//!
//! let config = ExportConfigBuilder::new(ExportFormat::DelimitedText).build();
//! let options = ExportOptions::new(config, Currency::eur()).unwrap();
//! let rows: Vec<Row> = rows(&[entry], &options).collect();
//! assert_eq!(rows.len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Ledger types, configuration, field resolution, export jobs |
//! | `csv` | Delimited-text codec |
//! | `xlsx` | Styled spreadsheet codec |
//! | `quadra` | Quadra fixed-width positional codec |
//! | `archive` | Quadra ZIP packaging with attachments |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "csv")]
pub mod csv;

#[cfg(feature = "xlsx")]
pub mod xlsx;

#[cfg(feature = "quadra")]
pub mod quadra;

#[cfg(feature = "archive")]
pub mod archive;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
