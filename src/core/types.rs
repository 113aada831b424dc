use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A currency with its rounding precision.
///
/// Every monetary amount in an export is rounded to the decimal precision
/// of its owning currency before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code (e.g. "EUR").
    pub code: String,
    /// Display symbol (e.g. "€"), used by the spreadsheet cell format.
    pub symbol: String,
    /// Number of decimal places.
    pub decimal_places: u32,
}

impl Currency {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>, decimal_places: u32) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            decimal_places,
        }
    }

    /// The euro, 2 decimal places.
    pub fn eur() -> Self {
        Self::new("EUR", "€", 2)
    }

    /// Round an amount to this currency's precision.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.decimal_places)
    }
}

/// The closed set of value kinds a column can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Free text.
    Text,
    /// Calendar date.
    Date,
    /// Amount in the company currency.
    Money,
    /// Precision-free number (e.g. an origin-currency amount).
    Number,
}

/// A single resolved cell value, used uniformly by all codecs.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Nothing to render; codecs emit a blank field.
    Empty,
    Text(String),
    Date(NaiveDate),
    /// Amount already rounded to the owning currency's precision,
    /// together with that currency's code.
    Money(Decimal, String),
    Number(Decimal),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Posting state of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    Draft,
    Posted,
}

/// A business partner referenced by a ledger or analytic line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    /// Database identifier.
    pub id: i64,
    pub name: String,
    /// External reference code, if maintained.
    pub reference: Option<String>,
}

/// Display role of a ledger line. Section and note lines carry no
/// amounts and are skipped by every codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Normal,
    Section,
    Note,
}

/// A cost-accounting sub-allocation of a ledger line's amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticLine {
    pub date: NaiveDate,
    /// Name of the analytic plan this allocation belongs to.
    pub plan_name: String,
    /// Analytic account code; some analytic accounts only have a name.
    pub account_code: Option<String>,
    pub account_name: String,
    pub partner: Option<Partner>,
    pub label: Option<String>,
    /// Signed allocation amount: a positive allocation credits the line.
    pub amount: Decimal,
}

/// One debit/credit movement belonging to a journal entry.
///
/// Read-only to the export engine; the record provider owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    pub id: i64,
    pub kind: LineKind,
    pub account_id: i64,
    pub account_code: String,
    pub account_name: String,
    pub partner: Option<Partner>,
    pub label: Option<String>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub due_date: Option<NaiveDate>,
    /// Full reconciliation reference, if the line is reconciled.
    pub reconcile_ref: Option<String>,
    /// Amount in the originating currency, when different from the
    /// company currency.
    pub origin_currency_amount: Option<Decimal>,
    pub origin_currency: Option<Currency>,
    pub analytic_lines: Vec<AnalyticLine>,
}

impl LedgerLine {
    /// Debit minus credit.
    pub fn balance(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A journal entry: a dated, numbered set of balanced ledger lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    /// Entry number (e.g. "INV/2024/0042").
    pub number: String,
    pub date: NaiveDate,
    pub journal_code: String,
    /// Free-text reference of the entry.
    pub reference: Option<String>,
    pub state: EntryState,
    /// Owning company identifier, used by the export filter.
    pub company: String,
    pub lines: Vec<LedgerLine>,
}

/// A binary attachment physically linked to a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    /// The journal entry this attachment belongs to.
    pub entry_id: i64,
    pub mime_type: String,
    pub data: Vec<u8>,
}
