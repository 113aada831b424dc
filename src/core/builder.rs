//! Builders for the ledger data model.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    AnalyticLine, Currency, EntryState, LedgerEntry, LedgerLine, LineKind, Partner,
};

/// Builder for [`LedgerEntry`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ecriture::core::*;
/// use rust_decimal_macros::dec;
///
/// let entry = LedgerEntryBuilder::new(
///     1,
///     "INV/2024/0001",
///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     "VTE",
/// )
/// .reference("SO0042")
/// .line(
///     LedgerLineBuilder::new(10, 411, "411100", "Clients")
///         .debit(dec!(120.00))
///         .build(),
/// )
/// .build();
/// assert_eq!(entry.lines.len(), 1);
/// ```
pub struct LedgerEntryBuilder {
    entry: LedgerEntry,
}

impl LedgerEntryBuilder {
    pub fn new(
        id: i64,
        number: impl Into<String>,
        date: NaiveDate,
        journal_code: impl Into<String>,
    ) -> Self {
        Self {
            entry: LedgerEntry {
                id,
                number: number.into(),
                date,
                journal_code: journal_code.into(),
                reference: None,
                state: EntryState::Posted,
                company: String::new(),
                lines: Vec::new(),
            },
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.entry.reference = Some(reference.into());
        self
    }

    pub fn state(mut self, state: EntryState) -> Self {
        self.entry.state = state;
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.entry.company = company.into();
        self
    }

    pub fn line(mut self, line: LedgerLine) -> Self {
        self.entry.lines.push(line);
        self
    }

    pub fn build(self) -> LedgerEntry {
        self.entry
    }
}

/// Builder for [`LedgerLine`].
pub struct LedgerLineBuilder {
    line: LedgerLine,
}

impl LedgerLineBuilder {
    pub fn new(
        id: i64,
        account_id: i64,
        account_code: impl Into<String>,
        account_name: impl Into<String>,
    ) -> Self {
        Self {
            line: LedgerLine {
                id,
                kind: LineKind::Normal,
                account_id,
                account_code: account_code.into(),
                account_name: account_name.into(),
                partner: None,
                label: None,
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
                due_date: None,
                reconcile_ref: None,
                origin_currency_amount: None,
                origin_currency: None,
                analytic_lines: Vec::new(),
            },
        }
    }

    pub fn kind(mut self, kind: LineKind) -> Self {
        self.line.kind = kind;
        self
    }

    pub fn partner(mut self, id: i64, name: impl Into<String>) -> Self {
        self.line.partner = Some(Partner {
            id,
            name: name.into(),
            reference: None,
        });
        self
    }

    pub fn partner_ref(mut self, id: i64, name: impl Into<String>, reference: impl Into<String>) -> Self {
        self.line.partner = Some(Partner {
            id,
            name: name.into(),
            reference: Some(reference.into()),
        });
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.line.label = Some(label.into());
        self
    }

    pub fn debit(mut self, debit: Decimal) -> Self {
        self.line.debit = debit;
        self
    }

    pub fn credit(mut self, credit: Decimal) -> Self {
        self.line.credit = credit;
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.line.due_date = Some(due_date);
        self
    }

    pub fn reconcile_ref(mut self, reconcile_ref: impl Into<String>) -> Self {
        self.line.reconcile_ref = Some(reconcile_ref.into());
        self
    }

    pub fn origin_amount(mut self, amount: Decimal, currency: Currency) -> Self {
        self.line.origin_currency_amount = Some(amount);
        self.line.origin_currency = Some(currency);
        self
    }

    pub fn analytic(mut self, analytic: AnalyticLine) -> Self {
        self.line.analytic_lines.push(analytic);
        self
    }

    pub fn build(self) -> LedgerLine {
        self.line
    }
}

/// Builder for [`AnalyticLine`].
pub struct AnalyticLineBuilder {
    line: AnalyticLine,
}

impl AnalyticLineBuilder {
    pub fn new(
        date: NaiveDate,
        plan_name: impl Into<String>,
        account_name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            line: AnalyticLine {
                date,
                plan_name: plan_name.into(),
                account_code: None,
                account_name: account_name.into(),
                partner: None,
                label: None,
                amount,
            },
        }
    }

    pub fn account_code(mut self, code: impl Into<String>) -> Self {
        self.line.account_code = Some(code.into());
        self
    }

    pub fn partner(mut self, id: i64, name: impl Into<String>) -> Self {
        self.line.partner = Some(Partner {
            id,
            name: name.into(),
            reference: None,
        });
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.line.label = Some(label.into());
        self
    }

    pub fn build(self) -> AnalyticLine {
        self.line
    }
}
