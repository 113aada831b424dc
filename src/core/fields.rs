//! Logical field registry and per-row field resolution.
//!
//! Every configurable column names a [`FieldKey`]. The registry maps each
//! key to its value kind, default width, label and position; it is a
//! static table, built once, never a per-call lookup. Resolution is a
//! pure function of the row source and the export options.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::{ColumnSpec, ExportOptions, PartnerCodeField, PartnerOption};
use super::types::{AnalyticLine, CellValue, Currency, LedgerEntry, LedgerLine, Partner, ValueKind};

/// Logical field identifiers a column configuration can reference.
///
/// Keys a given row source does not carry resolve to [`CellValue::Empty`]
/// rather than failing, so configurations stay forward-compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FieldKey {
    /// Always blank; a spacer column.
    Empty,
    /// "G" for ledger rows, "A" for analytic rows.
    LineType,
    EntryNumber,
    Date,
    JournalCode,
    AccountCode,
    AccountName,
    PartnerCode,
    PartnerName,
    AnalyticAccountCode,
    AnalyticAccountName,
    ItemLabel,
    Debit,
    Credit,
    /// Debit minus credit.
    Balance,
    EntryRef,
    ReconcileRef,
    DueDate,
    OriginCurrencyAmount,
    OriginCurrencyCode,
}

/// The static field registry: kind, default width, default header label
/// and default position of every known field.
const REGISTRY: &[(FieldKey, ValueKind, u32, &str, i32)] = &[
    (FieldKey::Empty, ValueKind::Text, 5, "Empty", 10),
    (FieldKey::LineType, ValueKind::Text, 4, "Type", 15),
    (FieldKey::EntryNumber, ValueKind::Text, 14, "Entry Number", 20),
    (FieldKey::Date, ValueKind::Date, 10, "Date", 30),
    (FieldKey::JournalCode, ValueKind::Text, 10, "Journal Code", 40),
    (FieldKey::AccountCode, ValueKind::Text, 12, "Account Code", 50),
    (FieldKey::AccountName, ValueKind::Text, 30, "Account Name", 60),
    (FieldKey::PartnerCode, ValueKind::Text, 12, "Partner Code", 70),
    (FieldKey::PartnerName, ValueKind::Text, 30, "Partner Name", 80),
    (
        FieldKey::AnalyticAccountCode,
        ValueKind::Text,
        11,
        "Analytic Account Code",
        90,
    ),
    (
        FieldKey::AnalyticAccountName,
        ValueKind::Text,
        30,
        "Analytic Account Name",
        100,
    ),
    (
        FieldKey::ItemLabel,
        ValueKind::Text,
        50,
        "Journal Item Label",
        110,
    ),
    (FieldKey::Debit, ValueKind::Money, 10, "Debit", 120),
    (FieldKey::Credit, ValueKind::Money, 10, "Credit", 130),
    (
        FieldKey::Balance,
        ValueKind::Money,
        12,
        "Balance (Debit - Credit)",
        140,
    ),
    (
        FieldKey::EntryRef,
        ValueKind::Text,
        20,
        "Journal Entry Ref",
        150,
    ),
    (
        FieldKey::ReconcileRef,
        ValueKind::Text,
        10,
        "Reconcile Ref",
        160,
    ),
    (FieldKey::DueDate, ValueKind::Date, 10, "Due Date", 170),
    (
        FieldKey::OriginCurrencyAmount,
        ValueKind::Number,
        12,
        "Origin Currency Amount",
        180,
    ),
    (
        FieldKey::OriginCurrencyCode,
        ValueKind::Text,
        12,
        "Origin Currency Code",
        190,
    ),
];

impl FieldKey {
    fn registry_entry(&self) -> Option<&'static (FieldKey, ValueKind, u32, &'static str, i32)> {
        REGISTRY.iter().find(|(key, ..)| key == self)
    }

    pub fn kind(&self) -> ValueKind {
        self.registry_entry().map(|e| e.1).unwrap_or(ValueKind::Text)
    }

    pub fn default_width(&self) -> u32 {
        self.registry_entry().map(|e| e.2).unwrap_or(20)
    }

    pub fn default_label(&self) -> &'static str {
        self.registry_entry().map(|e| e.3).unwrap_or("")
    }

    pub fn default_order(&self) -> i32 {
        self.registry_entry().map(|e| e.4).unwrap_or(i32::MAX)
    }

    /// Build a [`ColumnSpec`] with this field's registry defaults.
    pub fn column(&self) -> ColumnSpec {
        ColumnSpec {
            key: *self,
            kind: self.kind(),
            width: self.default_width(),
            header_label: self.default_label().to_string(),
            order: self.default_order(),
        }
    }
}

/// The default generic column set, in registry order.
pub fn default_columns() -> Vec<ColumnSpec> {
    [
        FieldKey::LineType,
        FieldKey::EntryNumber,
        FieldKey::Date,
        FieldKey::JournalCode,
        FieldKey::AccountCode,
        FieldKey::PartnerCode,
        FieldKey::ItemLabel,
        FieldKey::Debit,
        FieldKey::Credit,
        FieldKey::EntryRef,
        FieldKey::ReconcileRef,
        FieldKey::DueDate,
        FieldKey::OriginCurrencyAmount,
        FieldKey::OriginCurrencyCode,
    ]
    .iter()
    .map(FieldKey::column)
    .collect()
}

/// The source a row is resolved from: either a ledger line or one of its
/// analytic sub-lines.
#[derive(Debug, Clone, Copy)]
pub enum RowSource<'a> {
    Ledger {
        entry: &'a LedgerEntry,
        line: &'a LedgerLine,
    },
    Analytic {
        entry: &'a LedgerEntry,
        line: &'a LedgerLine,
        analytic: &'a AnalyticLine,
    },
}

impl RowSource<'_> {
    pub fn is_analytic(&self) -> bool {
        matches!(self, Self::Analytic { .. })
    }
}

/// Resolve one logical field against a row source. Pure: no side
/// effects, deterministic for identical inputs.
///
/// Zero debit/credit/balance amounts resolve to [`CellValue::Empty`] so
/// that zero-valued monetary fields render as blank, never as "0.00".
pub fn resolve(source: &RowSource<'_>, key: FieldKey, opts: &ExportOptions) -> CellValue {
    match source {
        RowSource::Ledger { entry, line } => resolve_ledger(entry, line, key, opts),
        RowSource::Analytic {
            entry,
            line,
            analytic,
        } => resolve_analytic(entry, line, analytic, key, opts),
    }
}

fn resolve_ledger(
    entry: &LedgerEntry,
    line: &LedgerLine,
    key: FieldKey,
    opts: &ExportOptions,
) -> CellValue {
    match key {
        FieldKey::LineType => CellValue::Text("G".into()),
        FieldKey::EntryNumber => CellValue::Text(entry.number.clone()),
        FieldKey::Date => CellValue::Date(entry.date),
        FieldKey::JournalCode => CellValue::Text(entry.journal_code.clone()),
        FieldKey::AccountCode => CellValue::Text(line.account_code.clone()),
        FieldKey::AccountName => CellValue::Text(line.account_name.clone()),
        FieldKey::PartnerCode => partner_code(line.partner.as_ref(), line.account_id, opts),
        FieldKey::PartnerName => text_opt(line.partner.as_ref().map(|p| p.name.clone())),
        FieldKey::ItemLabel => text_opt(line.label.clone()),
        FieldKey::Debit => money_or_empty(line.debit, &opts.company_currency),
        FieldKey::Credit => money_or_empty(line.credit, &opts.company_currency),
        FieldKey::Balance => money_or_empty(line.balance(), &opts.company_currency),
        FieldKey::EntryRef => text_opt(entry.reference.clone()),
        FieldKey::ReconcileRef => text_opt(line.reconcile_ref.clone()),
        FieldKey::DueDate => line.due_date.map(CellValue::Date).unwrap_or(CellValue::Empty),
        FieldKey::OriginCurrencyAmount => match (&line.origin_currency, line.origin_currency_amount)
        {
            (Some(currency), Some(amount)) => number_or_empty(currency.round(amount)),
            _ => CellValue::Empty,
        },
        FieldKey::OriginCurrencyCode => {
            text_opt(line.origin_currency.as_ref().map(|c| c.code.clone()))
        }
        _ => CellValue::Empty,
    }
}

fn resolve_analytic(
    entry: &LedgerEntry,
    line: &LedgerLine,
    analytic: &AnalyticLine,
    key: FieldKey,
    opts: &ExportOptions,
) -> CellValue {
    let currency = &opts.company_currency;
    match key {
        FieldKey::LineType => CellValue::Text("A".into()),
        FieldKey::EntryNumber => CellValue::Text(entry.number.clone()),
        FieldKey::Date => CellValue::Date(analytic.date),
        // An analytic row's journal is its plan.
        FieldKey::JournalCode => CellValue::Text(analytic.plan_name.clone()),
        FieldKey::AccountCode => CellValue::Text(
            analytic
                .account_code
                .clone()
                .unwrap_or_else(|| analytic.account_name.clone()),
        ),
        FieldKey::AccountName => CellValue::Text(analytic.account_name.clone()),
        // Visibility follows the backing ledger line's account.
        FieldKey::PartnerCode => partner_code(analytic.partner.as_ref(), line.account_id, opts),
        FieldKey::PartnerName => text_opt(analytic.partner.as_ref().map(|p| p.name.clone())),
        FieldKey::AnalyticAccountCode => text_opt(analytic.account_code.clone()),
        FieldKey::AnalyticAccountName => CellValue::Text(analytic.account_name.clone()),
        FieldKey::ItemLabel => text_opt(analytic.label.clone()),
        // A positive allocation credits the line.
        FieldKey::Credit if analytic.amount > Decimal::ZERO => {
            money_or_empty(analytic.amount, currency)
        }
        FieldKey::Debit if analytic.amount < Decimal::ZERO => {
            money_or_empty(-analytic.amount, currency)
        }
        FieldKey::Balance => money_or_empty(-analytic.amount, currency),
        _ => CellValue::Empty,
    }
}

/// Apply the partner-code visibility policy.
///
/// A code is emitted only if the line has a partner and either the
/// policy is `All`, or the backing account is in the configured set.
fn partner_code(partner: Option<&Partner>, account_id: i64, opts: &ExportOptions) -> CellValue {
    let Some(partner) = partner else {
        return CellValue::Empty;
    };
    let visible = match opts.config.partner_option {
        PartnerOption::All => true,
        PartnerOption::Accounts | PartnerOption::ReceivablePayable => {
            opts.config.partner_account_ids.contains(&account_id)
        }
    };
    if !visible {
        return CellValue::Empty;
    }
    match opts.config.partner_code_field {
        PartnerCodeField::Id => CellValue::Text(partner.id.to_string()),
        PartnerCodeField::Ref => text_opt(partner.reference.clone()),
    }
}

fn money_or_empty(amount: Decimal, currency: &Currency) -> CellValue {
    let rounded = currency.round(amount);
    if rounded.is_zero() {
        CellValue::Empty
    } else {
        CellValue::Money(rounded, currency.code.clone())
    }
}

fn number_or_empty(amount: Decimal) -> CellValue {
    if amount.is_zero() {
        CellValue::Empty
    } else {
        CellValue::Number(amount)
    }
}

fn text_opt(value: Option<String>) -> CellValue {
    match value {
        Some(s) if !s.is_empty() => CellValue::Text(s),
        _ => CellValue::Empty,
    }
}
