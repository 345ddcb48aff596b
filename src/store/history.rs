//! Persistent store for computed calculation sessions

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::error::Result;
use crate::types::CalculationRecord;

/// Persistent history of calculations, newest first
pub struct HistoryStore {
    store_path: PathBuf,
    records: Vec<CalculationRecord>,
}

impl HistoryStore {
    /// Create or load a history store in the given directory
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("calculations.json");

        let records = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self {
            store_path,
            records,
        })
    }

    fn save(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.records)?;
        Ok(())
    }

    /// Append a record and persist
    pub fn add(&mut self, record: CalculationRecord) -> Result<String> {
        let id = record.id.clone();
        self.records.push(record);
        self.save()?;
        Ok(id)
    }

    /// Get a record by ID
    pub fn get(&self, id: &str) -> Option<&CalculationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, most recent first
    pub fn recent(&self, limit: usize) -> Vec<&CalculationRecord> {
        let mut records: Vec<_> = self.records.iter().collect();
        records.sort_by(|a, b| b.computed_at.cmp(&a.computed_at));
        records.truncate(limit);
        records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RATES;
    use crate::domain::service::{compare_with_local_market, compute_breakdown};
    use crate::types::VehicleInput;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    fn record(year: i32) -> CalculationRecord {
        let input = VehicleInput {
            make: "Toyota".to_string(),
            model: "Harrier".to_string(),
            year,
            engine_size_liters: Decimal::new(20, 1),
            fob_value_usd: Decimal::from(15_000),
            freight_usd: Decimal::from(1_200),
            insurance_usd: Decimal::from(300),
        };
        let breakdown = compute_breakdown(&input, &RATES, 2026).unwrap();
        let comparison = compare_with_local_market(&breakdown, None, &RATES);
        CalculationRecord::new(input, breakdown, comparison)
    }

    #[test]
    fn add_and_reload() {
        let dir = tempdir().unwrap();

        let id = {
            let mut store = HistoryStore::open(dir.path().to_path_buf()).unwrap();
            assert_eq!(store.count(), 0);
            store.add(record(2022)).unwrap()
        };

        let store = HistoryStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.count(), 1);
        let loaded = store.get(&id).unwrap();
        assert_eq!(loaded.input.make, "Toyota");
        assert_eq!(loaded.breakdown.cif, Decimal::from(16_500));
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open(dir.path().to_path_buf()).unwrap();

        for year in [2020, 2021, 2022] {
            store.add(record(year)).unwrap();
        }

        let recent = store.recent(2);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].computed_at >= recent[1].computed_at);
    }
}
