use crate::error::DatasetError;
use crate::parse;
use core_types::{Dataset, PromotionFlag, SalesRecord};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Columns every source file must provide, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "store_id",
    "category",
    "shelf_level",
    "date",
    "units_sold",
    "revenue",
    "price",
    "promotion",
    "foot_traffic",
];

/// Loads the sales dataset from a CSV file on disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = load_from_reader(file)?;
    info!(
        path = %path.display(),
        records = dataset.len(),
        "Loaded sales dataset"
    );
    Ok(dataset)
}

/// Loads the sales dataset from any CSV source with a header row.
///
/// Fails with `DatasetError::Schema` before reading any row if a required
/// column is absent, and with `DatasetError::DataFormat` on the first value
/// that does not parse.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;
    debug!(columns = headers.len(), "Header validated");

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let raw = result?;
        records.push(columns.parse_row(&raw, idx + 1)?);
    }

    Ok(Dataset::new(records))
}

/// Position of each required column within the source header.
#[derive(Debug)]
struct ColumnIndex {
    store_id: usize,
    category: usize,
    shelf_level: usize,
    date: usize,
    units_sold: usize,
    revenue: usize,
    price: usize,
    promotion: usize,
    foot_traffic: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|name| position(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::Schema { missing });
        }

        let index = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            store_id: index("store_id"),
            category: index("category"),
            shelf_level: index("shelf_level"),
            date: index("date"),
            units_sold: index("units_sold"),
            revenue: index("revenue"),
            price: index("price"),
            promotion: index("promotion"),
            foot_traffic: index("foot_traffic"),
        })
    }

    fn parse_row(&self, raw: &StringRecord, row: usize) -> Result<SalesRecord, DatasetError> {
        Ok(SalesRecord {
            store_id: self.text(raw, row, self.store_id, "store_id")?,
            category: self.text(raw, row, self.category, "category")?,
            shelf_level: self.text(raw, row, self.shelf_level, "shelf_level")?,
            date: field(raw, row, self.date, "date", parse::date)?,
            units_sold: field(raw, row, self.units_sold, "units_sold", parse::count)?,
            revenue: field(raw, row, self.revenue, "revenue", parse::non_negative_decimal)?,
            price: field(raw, row, self.price, "price", parse::positive_decimal)?,
            promotion: field(raw, row, self.promotion, "promotion", |value| {
                value
                    .parse::<PromotionFlag>()
                    .map_err(|_| "expected 0 or 1".to_string())
            })?,
            foot_traffic: field(raw, row, self.foot_traffic, "foot_traffic", parse::count)?,
        })
    }

    /// Categorical values must be non-empty; every record belongs to exactly one group.
    fn text(
        &self,
        raw: &StringRecord,
        row: usize,
        idx: usize,
        column: &'static str,
    ) -> Result<String, DatasetError> {
        field(raw, row, idx, column, |value| {
            if value.is_empty() {
                Err("must not be empty".to_string())
            } else {
                Ok(value.to_string())
            }
        })
    }
}

fn field<T, F>(
    raw: &StringRecord,
    row: usize,
    idx: usize,
    column: &'static str,
    parser: F,
) -> Result<T, DatasetError>
where
    F: Fn(&str) -> Result<T, String>,
{
    let value = raw.get(idx).unwrap_or_default();
    parser(value).map_err(|reason| DatasetError::DataFormat {
        row,
        column,
        value: value.to_string(),
        reason,
    })
}
