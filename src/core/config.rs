use std::collections::{BTreeMap, BTreeSet};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::encoding::TextEncoding;
use super::error::ExportError;
use super::fields::{FieldKey, default_columns};
use super::types::{Currency, ValueKind};

/// Target file format of an export. Closed set: adding a format means
/// adding a variant and a codec implementation, never a runtime lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Delimited text (CSV-style), configurable delimiter and quoting.
    DelimitedText,
    /// Styled single-sheet XLSX workbook.
    Spreadsheet,
    /// Quadra-class fixed-width positional text.
    FixedWidth,
    /// Fixed-width text plus per-entry attachments in a ZIP container.
    FixedWidthArchive,
}

/// Field delimiter of the delimited-text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Pipe,
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Pipe => '|',
            Self::Tab => '\t',
        }
    }

    pub fn as_byte(&self) -> u8 {
        self.as_char() as u8
    }
}

/// Quoting mode of the delimited-text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quoting {
    /// Quote every field.
    All,
    /// Quote only fields that need it.
    Minimal,
    /// Never quote. Requires the delimiter and the decimal separator to
    /// differ, otherwise the output would be ambiguous.
    None,
}

/// Decimal separator used for amounts in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecimalSeparator {
    Dot,
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(&self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }
}

/// File extension of a delimited-text export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileExtension {
    Csv,
    Txt,
}

impl FileExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Txt => ".txt",
        }
    }
}

/// Which partner identifier is emitted as the partner code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerCodeField {
    /// The partner's database id.
    Id,
    /// The partner's external reference code.
    Ref,
}

/// Partner-code visibility policy: on which accounts a partner code is
/// emitted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerOption {
    /// Only on receivable and payable accounts (the caller supplies
    /// their ids in `partner_account_ids`).
    ReceivablePayable,
    /// Only on the explicitly configured account set.
    Accounts,
    /// On every line that has a partner.
    All,
}

/// Whether analytic sub-lines are expanded into extra rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticScope {
    /// No analytic rows.
    None,
    /// One row per analytic line.
    All,
    /// One row per analytic line whose plan is in the allow-list.
    Plans(BTreeSet<String>),
}

/// Versioned Quadra fixed-width layout. Two incompatible historical
/// orderings exist; they are selected explicitly and never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuadraLayoutVersion {
    /// Historical layout: sign folded into a 13-character amount field,
    /// 8-character piece number.
    V1,
    /// Current reference layout: separate sign field, 12-character
    /// unsigned amount in centimes, 5-character piece number.
    V2,
}

/// One logical output column: which field it carries, how wide it is and
/// where it sits in the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: FieldKey,
    pub kind: ValueKind,
    /// Display width in characters (spreadsheet column width).
    pub width: u32,
    /// Header label, unique within a configuration.
    pub header_label: String,
    /// Output position. Ties are broken by insertion order.
    pub order: i32,
}

/// Export configuration: the ordered column set plus every
/// format-level setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub columns: Vec<ColumnSpec>,
    /// Emit a header row (delimited text and spreadsheet only).
    pub header_line: bool,
    /// strftime pattern for date rendering in delimited text.
    pub date_format: String,
    pub delimiter: Delimiter,
    pub quoting: Quoting,
    pub decimal_separator: DecimalSeparator,
    pub encoding: TextEncoding,
    pub file_extension: FileExtension,
    pub partner_code_field: PartnerCodeField,
    pub partner_option: PartnerOption,
    /// Account ids for which a partner code is emitted, when the policy
    /// is account-based.
    pub partner_account_ids: BTreeSet<i64>,
    pub analytic: AnalyticScope,
    /// Spreadsheet font size.
    pub xlsx_font_size: u32,
    /// Background color of analytic-derived spreadsheet rows, as
    /// `#rrggbb`.
    pub xlsx_analytic_bg_color: String,
    pub quadra_layout: QuadraLayoutVersion,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::DelimitedText,
            columns: default_columns(),
            header_line: true,
            date_format: "%d/%m/%Y".into(),
            delimiter: Delimiter::Comma,
            quoting: Quoting::Minimal,
            decimal_separator: DecimalSeparator::Dot,
            encoding: TextEncoding::Iso8859_15,
            file_extension: FileExtension::Csv,
            partner_code_field: PartnerCodeField::Id,
            partner_option: PartnerOption::ReceivablePayable,
            partner_account_ids: BTreeSet::new(),
            analytic: AnalyticScope::None,
            xlsx_font_size: 10,
            xlsx_analytic_bg_color: "#ff9999".into(),
            quadra_layout: QuadraLayoutVersion::V2,
        }
    }
}

impl ExportConfig {
    /// Check the configuration for missing or contradictory settings.
    ///
    /// Run before any generation; a failure here leaves the job
    /// untouched.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.columns.is_empty() {
            return Err(ExportError::Configuration(
                "the configuration has no columns".into(),
            ));
        }
        let mut labels = BTreeSet::new();
        for col in &self.columns {
            if !labels.insert(col.header_label.as_str()) {
                return Err(ExportError::Configuration(format!(
                    "duplicate header label '{}'",
                    col.header_label
                )));
            }
        }
        if self.quoting == Quoting::None
            && self.delimiter.as_char() == self.decimal_separator.as_char()
        {
            return Err(ExportError::Configuration(
                "without quoting, the field delimiter and the decimal separator \
                 must be different"
                    .into(),
            ));
        }
        if self.partner_option == PartnerOption::Accounts && self.partner_account_ids.is_empty() {
            return Err(ExportError::Configuration(
                "the 'Selected Accounts' partner code option requires at least \
                 one account"
                    .into(),
            ));
        }
        if self.xlsx_font_size == 0 {
            return Err(ExportError::Configuration(
                "the font size must be strictly positive".into(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ExportError::Configuration(format!(
                "invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Columns sorted by `order`, ties broken by insertion order.
    pub fn sorted_columns(&self) -> Vec<ColumnSpec> {
        let mut cols = self.columns.clone();
        cols.sort_by_key(|c| c.order);
        cols
    }

    /// File extension of the generated artifact.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ExportFormat::DelimitedText => self.file_extension.as_str(),
            ExportFormat::Spreadsheet => ".xlsx",
            ExportFormat::FixedWidth => ".txt",
            ExportFormat::FixedWidthArchive => ".zip",
        }
    }
}

/// Builder for [`ExportConfig`].
///
/// # Example
///
/// ```
/// use ecriture::core::*;
///
/// let config = ExportConfigBuilder::new(ExportFormat::DelimitedText)
///     .delimiter(Delimiter::Semicolon)
///     .quoting(Quoting::All)
///     .encoding(TextEncoding::Ascii)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            config: ExportConfig {
                format,
                ..Default::default()
            },
        }
    }

    /// Replace the default column set.
    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.config.columns = columns;
        self
    }

    pub fn header_line(mut self, header_line: bool) -> Self {
        self.config.header_line = header_line;
        self
    }

    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.config.date_format = pattern.into();
        self
    }

    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    pub fn quoting(mut self, quoting: Quoting) -> Self {
        self.config.quoting = quoting;
        self
    }

    pub fn decimal_separator(mut self, separator: DecimalSeparator) -> Self {
        self.config.decimal_separator = separator;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    pub fn file_extension(mut self, extension: FileExtension) -> Self {
        self.config.file_extension = extension;
        self
    }

    pub fn partner_code_field(mut self, field: PartnerCodeField) -> Self {
        self.config.partner_code_field = field;
        self
    }

    pub fn partner_option(mut self, option: PartnerOption) -> Self {
        self.config.partner_option = option;
        self
    }

    pub fn partner_account_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.config.partner_account_ids = ids.into_iter().collect();
        self
    }

    pub fn analytic(mut self, scope: AnalyticScope) -> Self {
        self.config.analytic = scope;
        self
    }

    pub fn xlsx_font_size(mut self, size: u32) -> Self {
        self.config.xlsx_font_size = size;
        self
    }

    pub fn quadra_layout(mut self, layout: QuadraLayoutVersion) -> Self {
        self.config.quadra_layout = layout;
        self
    }

    pub fn build(self) -> ExportConfig {
        self.config
    }
}

/// Validated, immutable options passed by reference through the whole
/// generation pass. No ambient state: everything a codec needs is here.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub config: ExportConfig,
    pub company_currency: Currency,
    /// Columns in output order.
    pub columns: Vec<ColumnSpec>,
    /// Archive filename per entry id, for the fixed-width formats.
    pub attachment_names: BTreeMap<i64, String>,
}

impl ExportOptions {
    /// Validate the configuration and freeze the column order.
    pub fn new(config: ExportConfig, company_currency: Currency) -> Result<Self, ExportError> {
        config.validate()?;
        let columns = config.sorted_columns();
        Ok(Self {
            config,
            company_currency,
            columns,
            attachment_names: BTreeMap::new(),
        })
    }

    pub fn with_attachment_names(mut self, names: BTreeMap<i64, String>) -> Self {
        self.attachment_names = names;
        self
    }
}
