//! Export job state machine.
//!
//! A job claims a set of journal entries, renders exactly one artifact
//! through the codec selected by its configuration, and can later be
//! reopened, which discards the artifact and releases the claim.
//! Finalization is all-or-nothing: any error leaves the job in `Draft`
//! with no stored artifact and no claim held.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::{ExportConfig, ExportFormat, ExportOptions};
use super::error::ExportError;
use super::types::{Attachment, Currency, EntryState, LedgerEntry};

/// Lifecycle state of an export job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Draft,
    Done,
}

/// Which posting states an export filter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetMoves {
    /// Posted entries only.
    Posted,
    /// Draft and posted entries.
    All,
}

/// Filter predicate evaluated by the record provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFilter {
    pub company: Option<String>,
    /// Empty means all journals.
    pub journal_codes: Vec<String>,
    /// Inclusive.
    pub date_start: Option<NaiveDate>,
    /// Inclusive.
    pub date_end: Option<NaiveDate>,
    pub target: TargetMoves,
}

impl Default for MoveFilter {
    fn default() -> Self {
        Self {
            company: None,
            journal_codes: Vec::new(),
            date_start: None,
            date_end: None,
            target: TargetMoves::Posted,
        }
    }
}

impl MoveFilter {
    /// Whether an entry satisfies this filter. Providers may use this
    /// directly; claim exclusion is theirs to enforce.
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if self.company.as_deref().is_some_and(|c| entry.company != c) {
            return false;
        }
        if !self.journal_codes.is_empty() && !self.journal_codes.contains(&entry.journal_code) {
            return false;
        }
        if self.date_start.is_some_and(|start| entry.date < start) {
            return false;
        }
        if self.date_end.is_some_and(|end| entry.date > end) {
            return false;
        }
        match self.target {
            TargetMoves::Posted => entry.state == EntryState::Posted,
            TargetMoves::All => true,
        }
    }
}

/// How the job's record set is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Apply the job's filter at finalization time.
    Filtered,
    /// An explicit, caller-chosen set of entry ids.
    Manual(Vec<i64>),
}

/// A finalized export artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// External record provider: the persistence layer the engine reads
/// journal entries from and registers claims with.
///
/// `claim` must be an atomic check-and-set over the whole id set: if any
/// id is already claimed by another job, nothing is claimed and
/// [`ExportError::AlreadyClaimed`] is returned.
pub trait MoveProvider {
    /// Entries matching the filter, excluding already-claimed ones.
    fn find(&self, filter: &MoveFilter) -> Result<Vec<LedgerEntry>, ExportError>;

    /// Entries by id, excluding already-claimed ones.
    fn fetch(&self, ids: &[i64]) -> Result<Vec<LedgerEntry>, ExportError>;

    fn claim(&mut self, ids: &[i64], job_id: i64) -> Result<(), ExportError>;

    fn release(&mut self, ids: &[i64]) -> Result<(), ExportError>;

    /// Attachments physically linked to the given entries. Only queried
    /// for the fixed-width formats.
    fn attachments(&self, entry_ids: &[i64]) -> Result<Vec<Attachment>, ExportError> {
        let _ = entry_ids;
        Ok(Vec::new())
    }
}

/// An export job: configuration, record selection and lifecycle.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub id: i64,
    /// Job name; underscores are stripped from the artifact filename.
    pub name: String,
    pub config: ExportConfig,
    pub company_currency: Currency,
    pub filter: MoveFilter,
    pub selection: Selection,
    state: JobState,
    claimed_ids: Vec<i64>,
    artifact: Option<Artifact>,
}

impl ExportJob {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        config: ExportConfig,
        company_currency: Currency,
        filter: MoveFilter,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            config,
            company_currency,
            filter,
            selection: Selection::Filtered,
            state: JobState::Draft,
            claimed_ids: Vec::new(),
            artifact: None,
        }
    }

    /// Restrict the job to an explicit entry set instead of the filter.
    pub fn with_selection(mut self, ids: Vec<i64>) -> Self {
        self.selection = Selection::Manual(ids);
        self
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn claimed_ids(&self) -> &[i64] {
        &self.claimed_ids
    }

    /// Artifact filename: the job name with underscores stripped, or
    /// "export" when the name is empty, plus the format extension.
    pub fn filename(&self) -> String {
        let base = self.name.replace('_', "");
        let base = if base.is_empty() { "export" } else { &base };
        format!("{base}{}", self.config.extension())
    }

    /// Transition `draft → done`: resolve the record set, validate the
    /// configuration, claim the entries, render the artifact.
    ///
    /// On any error the claim is rolled back and the job stays `Draft`
    /// with no artifact.
    pub fn finalize(&mut self, provider: &mut dyn MoveProvider) -> Result<(), ExportError> {
        if self.state != JobState::Draft {
            return Err(ExportError::InvalidState(
                "only a draft job can be finalized".into(),
            ));
        }

        let entries = match &self.selection {
            Selection::Manual(ids) => provider.fetch(ids)?,
            Selection::Filtered => provider.find(&self.filter)?,
        };
        if entries.is_empty() {
            return Err(ExportError::NoMatchingRecords);
        }
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();

        #[cfg_attr(not(feature = "quadra"), allow(unused_mut))]
        let mut opts = ExportOptions::new(self.config.clone(), self.company_currency.clone())?;

        let mut attachments = Vec::new();
        if matches!(
            self.config.format,
            ExportFormat::FixedWidth | ExportFormat::FixedWidthArchive
        ) {
            attachments = provider.attachments(&ids)?;
            #[cfg(feature = "quadra")]
            {
                opts = opts.with_attachment_names(crate::quadra::attachment_names(&attachments));
            }
        }

        provider.claim(&ids, self.id)?;
        match render(&entries, &opts, &attachments) {
            Ok(bytes) => {
                self.artifact = Some(Artifact {
                    filename: self.filename(),
                    bytes,
                });
                self.claimed_ids = ids;
                self.state = JobState::Done;
                Ok(())
            }
            Err(err) => {
                // Roll back the claim; the generation error takes
                // precedence over any release failure.
                let _ = provider.release(&ids);
                Err(err)
            }
        }
    }

    /// Transition `done → draft`: discard the artifact and release the
    /// claim on every entry of the job, whether filter-derived or
    /// manually selected.
    pub fn reopen(&mut self, provider: &mut dyn MoveProvider) -> Result<(), ExportError> {
        if self.state != JobState::Done {
            return Err(ExportError::InvalidState(
                "only a done job can be reopened".into(),
            ));
        }
        provider.release(&self.claimed_ids)?;
        self.claimed_ids.clear();
        self.artifact = None;
        self.state = JobState::Draft;
        Ok(())
    }
}

/// Dispatch to the codec selected by the configuration's format.
#[allow(unused_variables)]
fn render(
    entries: &[LedgerEntry],
    opts: &ExportOptions,
    attachments: &[Attachment],
) -> Result<Vec<u8>, ExportError> {
    match opts.config.format {
        ExportFormat::DelimitedText => {
            #[cfg(feature = "csv")]
            {
                crate::csv::to_delimited(entries, opts)
            }
            #[cfg(not(feature = "csv"))]
            {
                Err(feature_missing("csv"))
            }
        }
        ExportFormat::Spreadsheet => {
            #[cfg(feature = "xlsx")]
            {
                crate::xlsx::to_xlsx(entries, opts)
            }
            #[cfg(not(feature = "xlsx"))]
            {
                Err(feature_missing("xlsx"))
            }
        }
        ExportFormat::FixedWidth => {
            #[cfg(feature = "quadra")]
            {
                crate::quadra::to_quadra(entries, opts)
            }
            #[cfg(not(feature = "quadra"))]
            {
                Err(feature_missing("quadra"))
            }
        }
        ExportFormat::FixedWidthArchive => {
            #[cfg(feature = "archive")]
            {
                crate::archive::to_zip(entries, opts, attachments)
            }
            #[cfg(not(feature = "archive"))]
            {
                Err(feature_missing("archive"))
            }
        }
    }
}

#[allow(dead_code)]
fn feature_missing(feature: &str) -> ExportError {
    ExportError::Configuration(format!(
        "this format requires the '{feature}' crate feature"
    ))
}
