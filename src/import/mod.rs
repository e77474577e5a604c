//! Import module - normalizzazione di file tabellari (CSV, xlsx, xls) in transazioni candidate
//!
//! Le colonne vengono riconosciute per sottostringa, senza distinzione tra
//! maiuscole e minuscole: `date`, `amount`, `category`, `desc`(ription).
//! Le righe senza data valida o senza importo positivo vengono scartate.
//! Il parser non tocca il database: ogni riga diventa poi una create singola.

pub mod dates;
pub mod workbook;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::debug;

pub use dates::{from_excel_serial, parse_date};
pub use workbook::{is_workbook, parse_workbook};

pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_DESCRIPTION: &str = "Imported Expense";

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File appears to be empty")]
    EmptyFile,

    #[error("Missing required columns: {0}. Please ensure your file has Date and Amount columns.")]
    MissingColumns(String),

    #[error("Failed to parse file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
}

/// Riga importata, già normalizzata allo schema delle transazioni
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Indici delle colonne riconosciute nell'header
#[derive(Debug)]
struct ColumnMap {
    date: usize,
    amount: usize,
    category: Option<usize>,
    description: Option<usize>,
    // prima colonna non riconosciuta come date/amount/category, usata come descrizione di riserva
    fallback: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self, ImportError> {
        let find = |needle: &str| headers.iter().position(|h| h.contains(needle));

        let date = find("date");
        let amount = find("amount");

        let missing: Vec<&str> = [("date", date), ("amount", amount)]
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect();

        let (Some(date), Some(amount)) = (date, amount) else {
            return Err(ImportError::MissingColumns(missing.join(", ")));
        };

        let category = find("category");
        let description = find("desc");
        let fallback = (0..headers.len())
            .find(|idx| *idx != date && *idx != amount && Some(*idx) != category);

        Ok(Self {
            date,
            amount,
            category,
            description,
            fallback,
        })
    }
}

/// Sceglie il separatore più frequente nella riga di header (`,` `;` o tab)
fn sniff_delimiter(data: &[u8]) -> u8 {
    let header = data.split(|b| *b == b'\n').next().unwrap_or_default();
    [b',', b';', b'\t']
        .into_iter()
        .max_by_key(|delimiter| header.iter().filter(|b| *b == delimiter).count())
        .unwrap_or(b',')
}

/// Interpreta un importo positivo.
///
/// Con entrambi i separatori l'ultimo è quello decimale ("1.234,50", "1,234.50");
/// una virgola sola è decimale ("45,5").
fn parse_amount(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = match (compact.rfind('.'), compact.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (None, Some(_)) => compact.replace(',', "."),
        _ => compact,
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

fn cell(record: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Applica la mappa delle colonne a header e righe già estratti dal file
fn normalize_rows(
    headers: &[String],
    records: Vec<Vec<String>>,
) -> Result<Vec<ImportedTransaction>, ImportError> {
    let headers: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let records: Vec<Vec<String>> = records
        .into_iter()
        .filter(|record| record.iter().any(|value| !value.trim().is_empty()))
        .collect();

    if records.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    let columns = ColumnMap::from_headers(&headers)?;
    debug!("Import columns resolved: {:?}", columns);

    let total = records.len();
    let rows: Vec<ImportedTransaction> = records
        .iter()
        .filter_map(|record| {
            let date = cell(record, Some(columns.date)).and_then(parse_date)?;
            let amount = cell(record, Some(columns.amount)).and_then(parse_amount)?;
            let category = cell(record, columns.category).unwrap_or(DEFAULT_CATEGORY);
            let description = cell(record, columns.description)
                .or_else(|| cell(record, columns.fallback))
                .unwrap_or(DEFAULT_DESCRIPTION);

            Some(ImportedTransaction {
                date,
                amount,
                category: category.to_string(),
                description: description.to_string(),
            })
        })
        .collect();

    debug!("Parsed {} of {} rows", rows.len(), total);
    Ok(rows)
}

/// Legge un file CSV e restituisce le transazioni candidate.
///
/// Errori: `EmptyFile` senza righe dati, `MissingColumns` senza colonne data/importo.
pub fn parse_csv(data: &[u8]) -> Result<Vec<ImportedTransaction>, ImportError> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    let mut reader = ReaderBuilder::new()
        .delimiter(sniff_delimiter(data))
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let records = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()?;

    normalize_rows(&headers, records)
}

/// Sceglie il parser in base al contenuto: cartella di lavoro Excel oppure testo CSV
pub fn parse_file(data: &[u8]) -> Result<Vec<ImportedTransaction>, ImportError> {
    if is_workbook(data) {
        parse_workbook(data)
    } else {
        parse_csv(data)
    }
}
