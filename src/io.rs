//! CSV persistence of a single matrix.
//!
//! The file starts with a `rows cols real` header line followed by one line
//! of space separated values per row. Values are read as `f64` and narrowed
//! to the requested precision.

use std::path::Path;

use crate::{
    error::{MatrustError, Result},
    matrix::Matrix,
    scalar::Scalar,
};

/// Writes `m` to `path`, replacing any existing file.
pub fn save_csv<T: Scalar, P: AsRef<Path>>(m: &Matrix<T>, path: P) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .flexible(true)
        .has_headers(false)
        .from_path(path.as_ref())?;

    writer.write_record(&[
        m.num_rows().to_string(),
        m.num_cols().to_string(),
        "real".to_string(),
    ])?;
    for row in m.as_slice().chunks(m.num_cols().max(1)).take(m.num_rows()) {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a matrix written by [`save_csv`].
pub fn load_csv<T: Scalar, P: AsRef<Path>>(path: P) -> Result<Matrix<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .flexible(true)
        .has_headers(false)
        .from_path(path.as_ref())?;
    let mut records = reader.records();

    let header = records
        .next()
        .ok_or_else(|| MatrustError::Parse("missing header line".to_string()))??;
    let fields: Vec<&str> = header.iter().filter(|f| !f.is_empty()).collect();
    if fields.len() != 3 {
        return Err(MatrustError::Parse(format!(
            "expected 'rows cols real' header, got {:?}",
            fields
        )));
    }
    let num_rows = parse_extent(fields[0])?;
    let num_cols = parse_extent(fields[1])?;
    if fields[2] != "real" {
        return Err(MatrustError::Parse(format!(
            "unsupported element type '{}'",
            fields[2]
        )));
    }

    let mut data = Vec::with_capacity(num_rows * num_cols);
    for (row, record) in records.enumerate() {
        let record = record?;
        if row >= num_rows {
            return Err(MatrustError::Parse(format!(
                "more than {} rows of data",
                num_rows
            )));
        }
        let before = data.len();
        for field in record.iter().filter(|f| !f.is_empty()) {
            let value: f64 = field.parse().map_err(|_| {
                MatrustError::Parse(format!("invalid value '{}' in row {}", field, row))
            })?;
            data.push(T::from_wide(value));
        }
        if data.len() - before != num_cols {
            return Err(MatrustError::Parse(format!(
                "row {} has {} values, expected {}",
                row,
                data.len() - before,
                num_cols
            )));
        }
    }
    if data.len() != num_rows * num_cols {
        return Err(MatrustError::Parse(format!(
            "expected {} rows of data",
            num_rows
        )));
    }
    Matrix::from_vec(num_rows, num_cols, data)
}

fn parse_extent(field: &str) -> Result<usize> {
    field
        .parse()
        .map_err(|_| MatrustError::Parse(format!("invalid dimension '{}'", field)))
}
