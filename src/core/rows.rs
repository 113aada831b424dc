//! Row materialization.
//!
//! Expands a batch of journal entries into the ordered row stream the
//! codecs consume: one row per ledger line in stream order, each
//! followed by zero or more analytic rows when analytic inclusion is
//! enabled. The stream is lazy, finite and non-restartable.

use super::config::{AnalyticScope, ExportOptions};
use super::fields::{RowSource, resolve};
use super::types::{CellValue, LedgerEntry, LineKind};

/// One materialized output row: the ordered projection of the resolver's
/// output over the configured columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
    /// True for rows derived from analytic sub-lines; the spreadsheet
    /// codec highlights these.
    pub is_analytic: bool,
}

/// Lazy iterator over the export rows of a batch of entries.
pub struct Rows<'a> {
    entries: &'a [LedgerEntry],
    opts: &'a ExportOptions,
    entry_idx: usize,
    line_idx: usize,
    /// Index of the next analytic line of the current ledger line, once
    /// its own row has been emitted.
    analytic_idx: Option<usize>,
}

/// Materialize the row stream for `entries` under `opts`.
pub fn rows<'a>(entries: &'a [LedgerEntry], opts: &'a ExportOptions) -> Rows<'a> {
    Rows {
        entries,
        opts,
        entry_idx: 0,
        line_idx: 0,
        analytic_idx: None,
    }
}

impl Rows<'_> {
    fn project(&self, source: RowSource<'_>) -> Row {
        let cells = self
            .opts
            .columns
            .iter()
            .map(|col| resolve(&source, col.key, self.opts))
            .collect();
        Row {
            cells,
            is_analytic: source.is_analytic(),
        }
    }

    fn plan_included(&self, plan_name: &str) -> bool {
        match &self.opts.config.analytic {
            AnalyticScope::None => false,
            AnalyticScope::All => true,
            AnalyticScope::Plans(plans) => plans.contains(plan_name),
        }
    }
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        loop {
            let entry = self.entries.get(self.entry_idx)?;
            let Some(line) = entry.lines.get(self.line_idx) else {
                self.entry_idx += 1;
                self.line_idx = 0;
                self.analytic_idx = None;
                continue;
            };

            if let Some(start) = self.analytic_idx {
                // Emit the remaining analytic rows of the current line.
                for (offset, analytic) in line.analytic_lines[start..].iter().enumerate() {
                    if self.plan_included(&analytic.plan_name) {
                        self.analytic_idx = Some(start + offset + 1);
                        return Some(self.project(RowSource::Analytic {
                            entry,
                            line,
                            analytic,
                        }));
                    }
                }
                self.analytic_idx = None;
                self.line_idx += 1;
                continue;
            }

            if line.kind != LineKind::Normal {
                self.line_idx += 1;
                continue;
            }

            if self.opts.config.analytic == AnalyticScope::None {
                self.line_idx += 1;
            } else {
                self.analytic_idx = Some(0);
            }
            return Some(self.project(RowSource::Ledger { entry, line }));
        }
    }
}
