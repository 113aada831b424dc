//! Quadra ZIP packaging.
//!
//! Bundles the fixed-width export as `export.txt` together with one
//! attachment per exported entry into a deflate-compressed ZIP
//! container.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::{Attachment, ExportError, ExportOptions, LedgerEntry};
use crate::quadra::{attachment_filename, select_attachments, to_quadra};

/// Render the fixed-width export and wrap it, with the entries'
/// attachments, in a ZIP archive.
pub fn to_zip(
    entries: &[LedgerEntry],
    opts: &ExportOptions,
    attachments: &[Attachment],
) -> Result<Vec<u8>, ExportError> {
    let txt = to_quadra(entries, opts)?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (_entry_id, att) in select_attachments(attachments) {
        writer
            .start_file(attachment_filename(att), options)
            .map_err(codec_err)?;
        writer.write_all(&att.data).map_err(codec_err)?;
    }

    writer.start_file("export.txt", options).map_err(codec_err)?;
    writer.write_all(&txt).map_err(codec_err)?;

    let cursor = writer.finish().map_err(codec_err)?;
    Ok(cursor.into_inner())
}

fn codec_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Codec(e.to_string())
}
