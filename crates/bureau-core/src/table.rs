use serde::{Deserialize, Serialize};

use crate::document::ExtractionRecord;
use crate::error::{BureauError, Result};

/// One preview row, keyed by the Japanese column labels shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "区分")]
    pub category: String,
    #[serde(rename = "件名")]
    pub title: String,
    #[serde(rename = "局名")]
    pub bureau: String,
    #[serde(rename = "ファイル名")]
    pub file_name: String,
}

impl From<&ExtractionRecord> for DisplayRow {
    fn from(record: &ExtractionRecord) -> Self {
        Self {
            category: record.category.clone(),
            title: record.title.clone(),
            bureau: record.bureau.clone(),
            file_name: record.file_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOutput {
    /// Tab-separated rows (区分 / 件名 / 局名) ready to paste into a spreadsheet.
    pub tsv: String,
    pub rows: Vec<DisplayRow>,
}

pub fn format_table(records: &[ExtractionRecord]) -> Result<TableOutput> {
    Ok(TableOutput {
        tsv: to_tsv(records)?,
        rows: records.iter().map(DisplayRow::from).collect(),
    })
}

/// Column order is fixed: category, title, bureau. Changing it breaks existing sheets.
///
/// Values holding a tab, quote or line break are quoted by the writer, which
/// spreadsheet paste understands, so cell text is never altered.
pub fn to_tsv(records: &[ExtractionRecord]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    for r in records {
        wtr.write_record([&r.category, &r.title, &r.bureau])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| BureauError::Internal(format!("failed to flush TSV writer: {}", e.error())))?;
    let mut tsv = String::from_utf8(bytes)
        .map_err(|e| BureauError::Internal(format!("TSV output is not UTF-8: {e}")))?;

    if tsv.ends_with('\n') {
        tsv.pop();
    }
    Ok(tsv)
}
