use std::io::Read;
use std::path::Path;

use crate::error::DataLoadError;

use super::model::{Record, Table, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the insurance table from a CSV file.
///
/// The file needs one header row naming at least
/// `age, sex, bmi, children, smoker, region, charges`; column order is free
/// and extra columns are ignored.
pub fn load_table(path: &Path) -> Result<Table, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file)
}

/// Parse CSV from any reader.  Used by [`load_table`] and by tests.
pub fn read_table<R: Read>(input: R) -> Result<Table, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    let mut raw = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut raw) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(malformed(&e)),
        }
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let record: Record =
            raw.deserialize(Some(&headers))
                .map_err(|e| DataLoadError::Malformed {
                    line,
                    reason: e.to_string(),
                })?;
        check_amounts(&record, line)?;
        records.push(record);
    }

    Ok(Table::from_records(records))
}

fn malformed(err: &csv::Error) -> DataLoadError {
    DataLoadError::Malformed {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        reason: err.to_string(),
    }
}

/// `bmi` and `charges` must be finite and not negative.
fn check_amounts(record: &Record, line: u64) -> Result<(), DataLoadError> {
    for (column, value) in [("bmi", record.bmi), ("charges", record.charges)] {
        if !value.is_finite() || value < 0.0 {
            return Err(DataLoadError::Malformed {
                line,
                reason: format!("{column} must be a finite, non-negative number, got {value}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
age,sex,bmi,children,smoker,region,charges
19,female,27.9,0,yes,southwest,16884.924
18,male,33.77,1,no,southeast,1725.5523
28,male,33,3,no,southeast,4449.462
";

    #[test]
    fn test_read_table_parses_every_row() {
        let table = read_table(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.records[0];
        assert_eq!(first.age, 19);
        assert_eq!(first.sex, "female");
        assert_eq!(first.smoker, "yes");
        assert_eq!(first.region, "southwest");
        assert!((first.bmi - 27.9).abs() < 1e-9);
        assert!((first.charges - 16884.924).abs() < 1e-9);
        assert_eq!(table.records[2].children, 3);
    }

    #[test]
    fn test_read_table_accepts_any_column_order() {
        let csv = "region,charges,smoker,age,children,bmi,sex,policy_id\n\
                   northeast,1200.5,no,45,2,31.2,male,P-1\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].region, "northeast");
        assert_eq!(table.records[0].age, 45);
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let csv = "age,sex,children,smoker,region\n30,male,0,no,southeast\n";
        match read_table(csv.as_bytes()) {
            Err(DataLoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["bmi".to_string(), "charges".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_missing_every_column() {
        match read_table("".as_bytes()) {
            Err(DataLoadError::MissingColumns(cols)) => assert_eq!(cols.len(), 7),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_cell_is_malformed() {
        let csv = "age,sex,bmi,children,smoker,region,charges\n\
                   thirty,male,22.0,0,no,southeast,100\n";
        match read_table(csv.as_bytes()) {
            Err(DataLoadError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_amounts_are_malformed() {
        for (bmi, charges) in [("22.0", "NaN"), ("22.0", "inf"), ("NaN", "100"), ("-inf", "100")] {
            let csv = format!(
                "age,sex,bmi,children,smoker,region,charges\n\
                 25,female,22.0,0,yes,southeast,100\n\
                 31,male,{bmi},0,no,northwest,{charges}\n"
            );
            match read_table(csv.as_bytes()) {
                Err(DataLoadError::Malformed { line, .. }) => assert_eq!(line, 3),
                other => panic!("bmi={bmi} charges={charges}: expected Malformed, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negative_charges_are_malformed() {
        let csv = "age,sex,bmi,children,smoker,region,charges\n\
                   31,male,22.0,0,no,northwest,-999\n";
        match read_table(csv.as_bytes()) {
            Err(DataLoadError::Malformed { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("charges"), "{reason}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(matches!(load_table(&path), Err(DataLoadError::Io { .. })));
    }
}
