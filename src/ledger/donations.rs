use anyhow::Result;
use rusqlite::Connection;

use crate::db::repository::{StorageRepo, DONATIONS_KEY};
use crate::models::DonationRecord;

/// Records shown before anyone has donated on this device.
pub fn seed_donations() -> Vec<DonationRecord> {
    let seed = [
        (
            "আরিফ হোসেন",
            "৫০০",
            "https://ui-avatars.com/api/?name=Arif+Hossen&background=059669&color=fff",
            "মসজিদ ফান্ডে দান",
        ),
        (
            "ফাতেমা জোহরা",
            "১০০০",
            "https://ui-avatars.com/api/?name=Fatema+Zohra&background=0891b2&color=fff",
            "এতিম সহায়তা",
        ),
        (
            "তানজিল আহমেদ",
            "২০০",
            "https://ui-avatars.com/api/?name=Tanjil+Ahmed&background=4f46e5&color=fff",
            "ইফতার বিতরণ",
        ),
    ];
    seed.iter()
        .map(|(name, amount, image, message)| DonationRecord {
            name: name.to_string(),
            amount: amount.to_string(),
            image: image.to_string(),
            message: message.to_string(),
        })
        .collect()
}

/// Most-recent-first list of donations made from this device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationLedger {
    records: Vec<DonationRecord>,
}

impl DonationLedger {
    #[cfg(test)]
    pub fn from_records(records: Vec<DonationRecord>) -> Self {
        Self { records }
    }

    /// Restore the persisted list, or the seed list if there is none (or
    /// the stored value no longer parses).
    pub fn load(conn: &Connection) -> Result<Self> {
        let records = StorageRepo::get_json::<Vec<DonationRecord>>(conn, DONATIONS_KEY)?
            .unwrap_or_else(seed_donations);
        Ok(Self { records })
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        StorageRepo::set_json(conn, DONATIONS_KEY, &self.records)
    }

    /// Put `record` at the front. No validation or dedup happens here.
    pub fn append(&mut self, record: DonationRecord) -> &[DonationRecord] {
        self.records.insert(0, record);
        &self.records
    }

    pub fn list(&self) -> &[DonationRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&DonationRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn record(name: &str, amount: &str) -> DonationRecord {
        DonationRecord {
            name: name.to_string(),
            amount: amount.to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
            message: "ইফতার তহবিলে দান".to_string(),
        }
    }

    #[test]
    fn append_prepends() {
        let older = record("করিম", "100");
        let mut ledger = DonationLedger::from_records(vec![older.clone()]);
        let newer = record("রহিম", "250");

        let list = ledger.append(newer.clone()).to_vec();
        assert_eq!(list, vec![newer, older]);
    }

    #[test]
    fn empty_store_loads_seed() {
        let conn = conn();
        let ledger = DonationLedger::load(&conn).unwrap();
        assert_eq!(ledger.list(), seed_donations().as_slice());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn order_and_fields_survive_persistence() {
        let conn = conn();
        let mut ledger = DonationLedger::from_records(vec![]);
        ledger.append(record("প্রথম", "10"));
        ledger.append(record("দ্বিতীয়", "20"));
        ledger.append(record("তৃতীয়", "৩০"));
        ledger.save(&conn).unwrap();

        let restored = DonationLedger::load(&conn).unwrap();
        assert_eq!(restored, ledger);
        assert_eq!(restored.get(0).map(|r| r.name.as_str()), Some("তৃতীয়"));
    }

    #[test]
    fn corrupted_store_falls_back_to_seed() {
        let conn = conn();
        StorageRepo::set(&conn, DONATIONS_KEY, "[{\"name\": 42}").unwrap();
        let ledger = DonationLedger::load(&conn).unwrap();
        assert_eq!(ledger.list(), seed_donations().as_slice());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut ledger = DonationLedger::default();
        ledger.append(record("একই", "10"));
        ledger.append(record("একই", "10"));
        assert_eq!(ledger.len(), 2);
    }
}
