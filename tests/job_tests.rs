#![cfg(feature = "csv")]

mod common;

use common::*;
use ecriture::core::*;

fn csv_job(id: i64, name: &str) -> ExportJob {
    ExportJob::new(
        id,
        name,
        ExportConfig::default(),
        Currency::eur(),
        MoveFilter::default(),
    )
}

#[test]
fn finalize_claims_and_stores_the_artifact() {
    let mut provider = MemoryProvider::new(vec![sale_entry(), purchase_entry_with_analytic()]);
    let mut job = csv_job(1, "export_2024_03");

    job.finalize(&mut provider).unwrap();

    assert_eq!(job.state(), JobState::Done);
    assert_eq!(job.claimed_ids(), &[1, 2]);
    assert_eq!(provider.claims.len(), 2);
    let artifact = job.artifact().unwrap();
    assert_eq!(artifact.filename, "export202403.csv");
    assert!(!artifact.bytes.is_empty());
}

#[test]
fn finalize_without_matches_keeps_the_job_draft() {
    let mut provider = MemoryProvider::new(vec![]);
    let mut job = csv_job(1, "empty");
    assert!(matches!(
        job.finalize(&mut provider),
        Err(ExportError::NoMatchingRecords)
    ));
    assert_eq!(job.state(), JobState::Draft);
    assert!(job.artifact().is_none());
    assert!(provider.claims.is_empty());
}

#[test]
fn finalize_is_one_shot() {
    let mut provider = MemoryProvider::new(vec![sale_entry()]);
    let mut job = csv_job(1, "once");
    job.finalize(&mut provider).unwrap();
    assert!(matches!(
        job.finalize(&mut provider),
        Err(ExportError::InvalidState(_))
    ));
}

#[test]
fn reopen_releases_every_claim() {
    let mut provider = MemoryProvider::new(vec![sale_entry(), purchase_entry_with_analytic()]);
    let mut job = csv_job(1, "cycle");
    job.finalize(&mut provider).unwrap();

    job.reopen(&mut provider).unwrap();
    assert_eq!(job.state(), JobState::Draft);
    assert!(job.artifact().is_none());
    assert!(job.claimed_ids().is_empty());
    assert!(provider.claims.is_empty());

    // And the same records can be exported again.
    job.finalize(&mut provider).unwrap();
    assert_eq!(job.state(), JobState::Done);
}

#[test]
fn reopen_requires_done() {
    let mut provider = MemoryProvider::new(vec![sale_entry()]);
    let mut job = csv_job(1, "draft");
    assert!(matches!(
        job.reopen(&mut provider),
        Err(ExportError::InvalidState(_))
    ));
}

#[test]
fn claimed_entries_are_invisible_to_other_jobs() {
    let mut provider = MemoryProvider::new(vec![sale_entry(), purchase_entry_with_analytic()]);
    let mut first = csv_job(1, "first");
    first.finalize(&mut provider).unwrap();

    // Filter-based and manual selections both see nothing left.
    let mut second = csv_job(2, "second");
    assert!(matches!(
        second.finalize(&mut provider),
        Err(ExportError::NoMatchingRecords)
    ));
    let mut third = csv_job(3, "third").with_selection(vec![1, 2]);
    assert!(matches!(
        third.finalize(&mut provider),
        Err(ExportError::NoMatchingRecords)
    ));
}

/// Provider whose reads do not see claims, modeling the window between
/// filter evaluation and the claim in which another job can get there
/// first.
struct StaleReadProvider(MemoryProvider);

impl MoveProvider for StaleReadProvider {
    fn find(&self, filter: &MoveFilter) -> Result<Vec<LedgerEntry>, ExportError> {
        Ok(self
            .0
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    fn fetch(&self, ids: &[i64]) -> Result<Vec<LedgerEntry>, ExportError> {
        Ok(self
            .0
            .entries
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    fn claim(&mut self, ids: &[i64], job_id: i64) -> Result<(), ExportError> {
        self.0.claim(ids, job_id)
    }

    fn release(&mut self, ids: &[i64]) -> Result<(), ExportError> {
        self.0.release(ids)
    }
}

#[test]
fn finalize_losing_the_claim_race_reports_the_conflict() {
    let mut inner = MemoryProvider::new(vec![sale_entry(), purchase_entry_with_analytic()]);
    // Entry 1 was claimed by another job after this job's filter ran.
    inner.claims.insert(1, 99);
    let mut provider = StaleReadProvider(inner);

    let mut job = csv_job(2, "raced");
    let err = job.finalize(&mut provider).unwrap_err();
    assert!(matches!(err, ExportError::AlreadyClaimed(ids) if ids == [1]));

    assert_eq!(job.state(), JobState::Draft);
    assert!(job.artifact().is_none());
    assert!(job.claimed_ids().is_empty());
    // The failed claim touched nothing: entry 2 stays free, entry 1
    // stays with its owner.
    assert!(!provider.0.claims.contains_key(&2));
    assert_eq!(provider.0.claims.get(&1), Some(&99));
}

#[test]
fn provider_claim_is_all_or_nothing() {
    let mut provider = MemoryProvider::new(vec![sale_entry(), purchase_entry_with_analytic()]);
    provider.claim(&[1], 1).unwrap();

    let err = provider.claim(&[1, 2], 2).unwrap_err();
    assert!(matches!(err, ExportError::AlreadyClaimed(ids) if ids == [1]));
    // Entry 2 must not have been claimed by the failed call.
    assert!(!provider.claims.contains_key(&2));
}

#[test]
fn manual_selection_limits_the_batch() {
    let mut provider = MemoryProvider::new(vec![sale_entry(), purchase_entry_with_analytic()]);
    let mut job = csv_job(1, "partial").with_selection(vec![2]);
    job.finalize(&mut provider).unwrap();

    assert_eq!(job.claimed_ids(), &[2]);
    let out = String::from_utf8(job.artifact().unwrap().bytes.clone()).unwrap();
    assert!(out.contains("BILL/2024/0007"));
    assert!(!out.contains("INV/2024/0001"));
}

#[test]
fn invalid_configuration_fails_before_claiming() {
    let mut provider = MemoryProvider::new(vec![sale_entry()]);
    let config = ExportConfigBuilder::new(ExportFormat::DelimitedText)
        .columns(vec![])
        .build();
    let mut job = ExportJob::new(1, "bad", config, Currency::eur(), MoveFilter::default());

    assert!(matches!(
        job.finalize(&mut provider),
        Err(ExportError::Configuration(_))
    ));
    assert!(provider.claims.is_empty());
    assert_eq!(job.state(), JobState::Draft);
}

#[test]
fn filter_narrows_the_batch() {
    let mut provider = MemoryProvider::new(vec![sale_entry(), purchase_entry_with_analytic()]);
    let mut job = ExportJob::new(
        1,
        "sales",
        ExportConfig::default(),
        Currency::eur(),
        MoveFilter {
            journal_codes: vec!["VTE".into()],
            ..Default::default()
        },
    );
    job.finalize(&mut provider).unwrap();
    assert_eq!(job.claimed_ids(), &[1]);
}

#[cfg(feature = "quadra")]
#[test]
fn render_failure_rolls_back_the_claim() {
    use rust_decimal_macros::dec;

    let entry = LedgerEntryBuilder::new(1, "BIG/0001", date(2024, 1, 1), "OD")
        .line(
            LedgerLineBuilder::new(1, 100, "10000000", "Capital")
                .debit(dec!(10000000000))
                .build(),
        )
        .build();
    let mut provider = MemoryProvider::new(vec![entry]);
    let config = ExportConfigBuilder::new(ExportFormat::FixedWidth).build();
    let mut job = ExportJob::new(1, "quadra", config, Currency::eur(), MoveFilter::default());

    assert!(matches!(
        job.finalize(&mut provider),
        Err(ExportError::FieldOverflow { .. })
    ));
    assert_eq!(job.state(), JobState::Draft);
    assert!(provider.claims.is_empty());
}

#[cfg(feature = "archive")]
#[test]
fn archive_job_names_attachments_in_the_export() {
    let provider_entries = vec![sale_entry()];
    let mut provider = MemoryProvider::new(provider_entries).with_attachments(vec![Attachment {
        id: 4,
        entry_id: 1,
        mime_type: "application/pdf".into(),
        data: b"%PDF".to_vec(),
    }]);
    let config = ExportConfigBuilder::new(ExportFormat::FixedWidthArchive).build();
    let mut job = ExportJob::new(1, "zip_export", config, Currency::eur(), MoveFilter::default());

    job.finalize(&mut provider).unwrap();
    let artifact = job.artifact().unwrap();
    assert_eq!(artifact.filename, "zipexport.zip");
    assert_eq!(&artifact.bytes[0..2], b"PK");
    assert!(
        artifact
            .bytes
            .windows(5)
            .any(|w| w == b"4.pdf")
    );
}
