use std::collections::HashMap;

use chrono::NaiveDate;
use ecriture::core::*;
use rust_decimal_macros::dec;

/// Minimal in-memory provider; a real integration backs this with a
/// database.
struct InMemory {
    entries: Vec<LedgerEntry>,
    claims: HashMap<i64, i64>,
}

impl MoveProvider for InMemory {
    fn find(&self, filter: &MoveFilter) -> Result<Vec<LedgerEntry>, ExportError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| filter.matches(e) && !self.claims.contains_key(&e.id))
            .cloned()
            .collect())
    }

    fn fetch(&self, ids: &[i64]) -> Result<Vec<LedgerEntry>, ExportError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| ids.contains(&e.id) && !self.claims.contains_key(&e.id))
            .cloned()
            .collect())
    }

    fn claim(&mut self, ids: &[i64], job_id: i64) -> Result<(), ExportError> {
        let taken: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| self.claims.get(id).is_some_and(|owner| *owner != job_id))
            .collect();
        if !taken.is_empty() {
            return Err(ExportError::AlreadyClaimed(taken));
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
}

fn main() {
    let entry = LedgerEntryBuilder::new(
        1,
        "INV/2024/0001",
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        "VTE",
    )
    .line(
        LedgerLineBuilder::new(10, 411, "411100", "Clients")
            .debit(dec!(100.00))
            .build(),
    )
    .line(
        LedgerLineBuilder::new(11, 706, "706000", "Services")
            .credit(dec!(100.00))
            .build(),
    )
    .build();

    let mut provider = InMemory {
        entries: vec![entry],
        claims: HashMap::new(),
    };

    let filter = MoveFilter {
        date_start: NaiveDate::from_ymd_opt(2024, 3, 1),
        date_end: NaiveDate::from_ymd_opt(2024, 3, 31),
        ..Default::default()
    };
    let mut job = ExportJob::new(1, "march_sales", ExportConfig::default(), Currency::eur(), filter);

    job.finalize(&mut provider).expect("finalized");
    let artifact = job.artifact().expect("artifact stored");
    println!("{} -> {} bytes", artifact.filename, artifact.bytes.len());

    // A second run over the same period finds nothing: the entries are claimed.
    let mut again = ExportJob::new(2, "march_again", ExportConfig::default(), Currency::eur(), job.filter.clone());
    match again.finalize(&mut provider) {
        Err(ExportError::NoMatchingRecords) => println!("period already exported"),
        other => println!("unexpected: {other:?}"),
    }

    // Reopening releases the claim for a corrected re-export.
    job.reopen(&mut provider).expect("reopened");
    println!("claims after reopen: {}", provider.claims.len());
}
