//! Load worker types from CSV
//!
//! Expected header: `Name,K,Mu,Sigma,Benefit,Floor,EntryShare`

use super::WorkerType;
use crate::error::Result;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the worker-type file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "K")]
    k: f64,
    #[serde(rename = "Mu")]
    mu: f64,
    #[serde(rename = "Sigma")]
    sigma: f64,
    #[serde(rename = "Benefit")]
    benefit: f64,
    #[serde(rename = "Floor")]
    floor: f64,
    #[serde(rename = "EntryShare")]
    entry_share: f64,
}

impl CsvRow {
    fn to_worker_type(self) -> Result<WorkerType> {
        let worker = WorkerType {
            name: self.name.trim().to_string(),
            k: self.k,
            mu: self.mu,
            sigma: self.sigma,
            benefit_level: self.benefit,
            b_floor: self.floor,
            entry_share: self.entry_share,
        };
        worker.validate()?;
        Ok(worker)
    }
}

/// Load all worker types from a CSV file
pub fn load_worker_types<P: AsRef<Path>>(path: P) -> Result<Vec<WorkerType>> {
    let mut reader = Reader::from_path(path)?;
    let mut workers = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        workers.push(row.to_worker_type()?);
    }

    Ok(workers)
}

/// Load worker types from any reader (e.g., string buffer)
pub fn load_worker_types_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<WorkerType>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut workers = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        workers.push(row.to_worker_type()?);
    }

    Ok(workers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn test_load_worker_types() {
        let data = "\
Name,K,Mu,Sigma,Benefit,Floor,EntryShare
high,4,1.7167,0.5498,3.5251,2.0,0.6
low,8,1.5450,0.5498,3.1726,2.0,0.4
";
        let workers = load_worker_types_from_reader(data.as_bytes()).unwrap();
        assert_eq!(workers.len(), 2);
        assert_eq!(workers[0].name, "high");
        assert_eq!(workers[1].k, 8.0);
        assert!((workers[0].entry_share - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_invalid_row() {
        let data = "\
Name,K,Mu,Sigma,Benefit,Floor,EntryShare
broken,-1,1.0,0.5,3.0,2.0,1.0
";
        let err = load_worker_types_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_malformed_number() {
        let data = "\
Name,K,Mu,Sigma,Benefit,Floor,EntryShare
high,four,1.0,0.5,3.0,2.0,1.0
";
        let err = load_worker_types_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SearchError::Load(_)));
    }
}
