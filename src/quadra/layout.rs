//! Versioned Quadra field layouts.
//!
//! The field order and widths are a fixed external contract taken from
//! the Quadra ASCII import specification. Two incompatible historical
//! layouts exist; both are kept and selected explicitly.

use crate::core::QuadraLayoutVersion;

/// The positional fields of a Quadra record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadraField {
    /// Record type, always "M" for a movement.
    RecordType,
    AccountNumber,
    JournalCode,
    /// Always "000".
    Folio,
    EntryDate,
    LabelCode,
    FreeLabel,
    /// "D" or "C".
    DebitCreditSense,
    /// "+" or "-" (v2 only; v1 folds the sign into the amount field).
    Sign,
    /// Unsigned amount in centimes, zero-padded (v2).
    AmountCentimes,
    /// Sign character followed by the amount in centimes (v1).
    SignedAmountCentimes,
    ContraAccount,
    DueDate,
    ReconcileCode,
    StatsCode,
    /// Numeric piece number (the entry id).
    PieceNumber,
    BusinessCode,
    Quantity1,
    /// Free-text piece reference (the entry reference).
    PieceRef,
    CurrencyCode,
    /// The journal code again, on 3 characters.
    JournalCode3,
    VatFlag,
    VatMethod,
    VatCode,
    /// Line label on 30 characters.
    Label30,
    VatCode2,
    /// Alphanumeric piece number (the entry number).
    PieceAlnum,
    Reserved,
    /// Amount in the originating currency, in centimes.
    CurrencyAmount,
    /// Filename of the attachment linked to the entry.
    AttachmentName,
    Quantity2,
    UniqNum,
    OperatorCode,
    SystemDate,
}

impl QuadraField {
    /// Field name used in overflow errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecordType => "record type",
            Self::AccountNumber => "account number",
            Self::JournalCode => "journal code",
            Self::Folio => "folio",
            Self::EntryDate => "entry date",
            Self::LabelCode => "label code",
            Self::FreeLabel => "free label",
            Self::DebitCreditSense => "debit/credit sense",
            Self::Sign => "sign",
            Self::AmountCentimes => "amount in centimes",
            Self::SignedAmountCentimes => "signed amount in centimes",
            Self::ContraAccount => "contra account",
            Self::DueDate => "due date",
            Self::ReconcileCode => "reconcile code",
            Self::StatsCode => "stats code",
            Self::PieceNumber => "piece number",
            Self::BusinessCode => "business code",
            Self::Quantity1 => "quantity 1",
            Self::PieceRef => "piece reference",
            Self::CurrencyCode => "currency code",
            Self::JournalCode3 => "journal code (3)",
            Self::VatFlag => "VAT flag",
            Self::VatMethod => "VAT method",
            Self::VatCode => "VAT code",
            Self::Label30 => "label (30)",
            Self::VatCode2 => "VAT code 2",
            Self::PieceAlnum => "alphanumeric piece number",
            Self::Reserved => "reserved",
            Self::CurrencyAmount => "currency amount",
            Self::AttachmentName => "attachment name",
            Self::Quantity2 => "quantity 2",
            Self::UniqNum => "unique number",
            Self::OperatorCode => "operator code",
            Self::SystemDate => "system date",
        }
    }
}

/// One positional column: a field and its fixed character width.
#[derive(Debug, Clone, Copy)]
pub struct QuadraColumn {
    pub field: QuadraField,
    pub width: usize,
}

const fn col(field: QuadraField, width: usize) -> QuadraColumn {
    QuadraColumn { field, width }
}

use QuadraField as F;

/// Current reference layout: 33 fields, 232 characters per record.
const LAYOUT_V2: &[QuadraColumn] = &[
    col(F::RecordType, 1),
    col(F::AccountNumber, 8),
    col(F::JournalCode, 2),
    col(F::Folio, 3),
    col(F::EntryDate, 6),
    col(F::LabelCode, 1),
    col(F::FreeLabel, 20),
    col(F::DebitCreditSense, 1),
    col(F::Sign, 1),
    col(F::AmountCentimes, 12),
    col(F::ContraAccount, 8),
    col(F::DueDate, 6),
    col(F::ReconcileCode, 2),
    col(F::StatsCode, 3),
    col(F::PieceNumber, 5),
    col(F::BusinessCode, 10),
    col(F::Quantity1, 10),
    col(F::PieceRef, 8),
    col(F::CurrencyCode, 3),
    col(F::JournalCode3, 3),
    col(F::VatFlag, 1),
    col(F::VatMethod, 1),
    col(F::VatCode, 1),
    col(F::Label30, 30),
    col(F::VatCode2, 3),
    col(F::PieceAlnum, 10),
    col(F::Reserved, 10),
    col(F::CurrencyAmount, 13),
    col(F::AttachmentName, 12),
    col(F::Quantity2, 10),
    col(F::UniqNum, 10),
    col(F::OperatorCode, 4),
    col(F::SystemDate, 14),
];

/// Historical layout: no separate sign field (the sign is the first
/// character of a 13-wide amount) and an 8-character piece number.
const LAYOUT_V1: &[QuadraColumn] = &[
    col(F::RecordType, 1),
    col(F::AccountNumber, 8),
    col(F::JournalCode, 2),
    col(F::Folio, 3),
    col(F::EntryDate, 6),
    col(F::LabelCode, 1),
    col(F::FreeLabel, 20),
    col(F::DebitCreditSense, 1),
    col(F::SignedAmountCentimes, 13),
    col(F::ContraAccount, 8),
    col(F::DueDate, 6),
    col(F::ReconcileCode, 2),
    col(F::StatsCode, 3),
    col(F::PieceNumber, 8),
    col(F::BusinessCode, 10),
    col(F::Quantity1, 10),
    col(F::PieceRef, 8),
    col(F::CurrencyCode, 3),
    col(F::JournalCode3, 3),
    col(F::VatFlag, 1),
    col(F::VatMethod, 1),
    col(F::VatCode, 1),
    col(F::Label30, 30),
    col(F::VatCode2, 3),
    col(F::PieceAlnum, 10),
    col(F::Reserved, 10),
    col(F::CurrencyAmount, 13),
    col(F::AttachmentName, 12),
    col(F::Quantity2, 10),
    col(F::UniqNum, 10),
    col(F::OperatorCode, 4),
    col(F::SystemDate, 14),
];

/// The columns of a layout version, in positional order.
pub fn columns(version: QuadraLayoutVersion) -> &'static [QuadraColumn] {
    match version {
        QuadraLayoutVersion::V1 => LAYOUT_V1,
        QuadraLayoutVersion::V2 => LAYOUT_V2,
    }
}

/// Total record width of a layout version, excluding the newline.
pub fn total_width(version: QuadraLayoutVersion) -> usize {
    columns(version).iter().map(|c| c.width).sum()
}
