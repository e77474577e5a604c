//! Lettura di cartelle di lavoro Excel (xlsx, xls): primo foglio, prima riga come header

use super::{ImportError, ImportedTransaction, normalize_rows};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use tracing::debug;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// true per contenitori xlsx (zip) o xls (OLE)
pub fn is_workbook(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC) || data.starts_with(OLE_MAGIC)
}

/// Le date Excel restano numeri seriali: `parse_date` li converte
fn cell_to_string(value: &Data) -> String {
    match value {
        Data::String(s) | Data::DateTimeIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        _ => String::new(),
    }
}

pub fn parse_workbook(data: &[u8]) -> Result<Vec<ImportedTransaction>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;

    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(ImportError::EmptyFile);
    };
    let range = range?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let Some(headers) = rows.next() else {
        return Err(ImportError::EmptyFile);
    };
    let records: Vec<Vec<String>> = rows.collect();
    debug!("Workbook sheet read: {} data rows", records.len());

    normalize_rows(&headers, records)
}
