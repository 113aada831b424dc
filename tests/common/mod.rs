//! Shared fixtures: an in-memory record provider and sample entries.

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::NaiveDate;
use ecriture::core::*;
use rust_decimal_macros::dec;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory [`MoveProvider`] with check-and-set claim semantics.
pub struct MemoryProvider {
    pub entries: Vec<LedgerEntry>,
    pub attachments: Vec<Attachment>,
    /// entry id -> claiming job id
    pub claims: HashMap<i64, i64>,
}

impl MemoryProvider {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries,
            attachments: Vec::new(),
            claims: HashMap::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    fn unclaimed(&self, entry: &LedgerEntry) -> bool {
        !self.claims.contains_key(&entry.id)
    }
}

impl MoveProvider for MemoryProvider {
    fn find(&self, filter: &MoveFilter) -> Result<Vec<LedgerEntry>, ExportError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| filter.matches(e) && self.unclaimed(e))
            .cloned()
            .collect())
    }

    fn fetch(&self, ids: &[i64]) -> Result<Vec<LedgerEntry>, ExportError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| ids.contains(&e.id) && self.unclaimed(e))
            .cloned()
            .collect())
    }

    fn claim(&mut self, ids: &[i64], job_id: i64) -> Result<(), ExportError> {
        let conflicts: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| self.claims.get(id).is_some_and(|owner| *owner != job_id))
            .collect();
        if !conflicts.is_empty() {
            return Err(ExportError::AlreadyClaimed(conflicts));
        }
        for id in ids {
            self.claims.insert(*id, job_id);
        }
        Ok(())
    }

    fn release(&mut self, ids: &[i64]) -> Result<(), ExportError> {
        for id in ids {
            self.claims.remove(id);
        }
        Ok(())
    }

    fn attachments(&self, entry_ids: &[i64]) -> Result<Vec<Attachment>, ExportError> {
        Ok(self
            .attachments
            .iter()
            .filter(|a| entry_ids.contains(&a.entry_id))
            .cloned()
            .collect())
    }
}

/// A sale: 100.00 debit on the customer account, 100.00 credit on the
/// revenue account.
pub fn sale_entry() -> LedgerEntry {
    LedgerEntryBuilder::new(1, "INV/2024/0001", date(2024, 3, 15), "VTE")
        .company("main")
        .reference("SO0042")
        .line(
            LedgerLineBuilder::new(10, 411, "411100", "Clients")
                .partner(7, "Acme SARL")
                .label("Invoice INV/2024/0001")
                .debit(dec!(100.00))
                .due_date(date(2024, 4, 15))
                .build(),
        )
        .line(
            LedgerLineBuilder::new(11, 706, "706000", "Services")
                .label("Consulting")
                .credit(dec!(100.00))
                .build(),
        )
        .build()
}

/// A purchase with one analytic allocation on the expense line.
pub fn purchase_entry_with_analytic() -> LedgerEntry {
    LedgerEntryBuilder::new(2, "BILL/2024/0007", date(2024, 3, 20), "ACH")
        .company("main")
        .line(
            LedgerLineBuilder::new(20, 601, "601000", "Purchases")
                .label("Raw material")
                .debit(dec!(250.00))
                .analytic(
                    AnalyticLineBuilder::new(date(2024, 3, 20), "Projects", "PRJ-A", dec!(-250.00))
                        .account_code("PA")
                        .label("Raw material")
                        .build(),
                )
                .build(),
        )
        .line(
            LedgerLineBuilder::new(21, 401, "401100", "Suppliers")
                .partner(9, "Fournier SA")
                .credit(dec!(250.00))
                .build(),
        )
        .build()
}

pub fn default_options() -> ExportOptions {
    ExportOptions::new(ExportConfig::default(), Currency::eur()).unwrap()
}

pub fn options_for(config: ExportConfig) -> ExportOptions {
    ExportOptions::new(config, Currency::eur()).unwrap()
}
