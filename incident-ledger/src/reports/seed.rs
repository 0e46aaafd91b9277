//! Reference data seeding
//!
//! Zones and inventory are rewritten only when the schema version stored in
//! the `meta` table differs from the compiled one. Bump a version constant
//! when its seed list changes.

use super::storage::{Collection, LedgerStorage, StorageResult};
use shared::models::{InventoryItem, Zone};

/// Bump when the barangay list changes
pub const ZONES_SCHEMA_VERSION: u64 = 2;

/// Bump when the default inventory changes
pub const INVENTORY_SCHEMA_VERSION: u64 = 1;

const ZONES_VERSION_KEY: &str = "zones_version";
const INVENTORY_VERSION_KEY: &str = "inventory_version";

const BARANGAYS: &[(&str, &str)] = &[
    ("B01", "Aurora-del Pilar"),
    ("B02", "Bacay"),
    ("B03", "Bacong"),
    ("B04", "Balabag"),
    ("B05", "Balud"),
    ("B06", "Bantud"),
    ("B07", "Bantud Fabrica"),
    ("B08", "Baras"),
    ("B09", "Barasan"),
    ("B10", "Basa-Mabini Bonifacio"),
    ("B11", "Bolilao"),
    ("B12", "Buenaflor Embarkadero"),
    ("B13", "Burgos-Regidor"),
    ("B14", "Calao"),
    ("B15", "Cali"),
    ("B16", "Cansilayan"),
    ("B17", "Capaliz"),
    ("B18", "Cayos"),
    ("B19", "Compayan"),
    ("B20", "Dacutan"),
    ("B21", "Ermita"),
    ("B22", "Ilaya 1st"),
    ("B23", "Ilaya 2nd"),
    ("B24", "Ilaya 3rd"),
    ("B25", "Jardin"),
    ("B26", "Lacturan"),
    ("B27", "Lopez Jaena-Rizal"),
    ("B28", "Managuit"),
    ("B29", "Maquina"),
    ("B30", "Nanding Lopez"),
    ("B31", "Pagdugue"),
    ("B32", "Paloc Bigque"),
    ("B33", "Paloc Sool"),
    ("B34", "Patlad"),
    ("B35", "Pd Monfort North"),
    ("B36", "Pd Monfort South"),
    ("B37", "Pulao"),
    ("B38", "Rosario"),
    ("B39", "Sapao"),
    ("B40", "Sulangan"),
    ("B41", "Tabucan"),
    ("B42", "Talusan"),
    ("B43", "Tambobo"),
    ("B44", "Tamboilan"),
    ("B45", "Victorias"),
];

const DEFAULT_INVENTORY: &[(&str, &str, u32)] = &[
    ("I1", "Rice 5kg", 50),
    ("I2", "Bottled Water (500ml)", 200),
    ("I3", "Blankets", 80),
];

/// Which collections `ensure_seeded` rewrote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    pub zones_seeded: bool,
    pub inventory_seeded: bool,
}

pub fn default_zones() -> Vec<Zone> {
    BARANGAYS.iter().map(|&(id, name)| Zone::new(id, name)).collect()
}

pub fn default_inventory() -> Vec<InventoryItem> {
    DEFAULT_INVENTORY
        .iter()
        .map(|&(id, name, qty)| InventoryItem::new(id, name, qty))
        .collect()
}

/// Idempotent: a second call with unchanged versions writes nothing.
pub fn ensure_seeded(storage: &LedgerStorage) -> StorageResult<SeedOutcome> {
    let txn = storage.begin_write()?;
    let mut outcome = SeedOutcome::default();

    if storage.get_meta_txn(&txn, ZONES_VERSION_KEY)? != Some(ZONES_SCHEMA_VERSION) {
        storage.write_collection_txn(&txn, Collection::Zones, &default_zones())?;
        storage.set_meta_txn(&txn, ZONES_VERSION_KEY, ZONES_SCHEMA_VERSION)?;
        outcome.zones_seeded = true;
    }

    if storage.get_meta_txn(&txn, INVENTORY_VERSION_KEY)? != Some(INVENTORY_SCHEMA_VERSION) {
        storage.write_collection_txn(&txn, Collection::Inventory, &default_inventory())?;
        storage.set_meta_txn(&txn, INVENTORY_VERSION_KEY, INVENTORY_SCHEMA_VERSION)?;
        outcome.inventory_seeded = true;
    }

    if outcome == SeedOutcome::default() {
        txn.abort()?;
        tracing::debug!("Seed data up to date");
        return Ok(outcome);
    }

    storage.bump_revision(&txn)?;
    txn.commit()?;
    tracing::info!(
        zones = outcome.zones_seeded,
        inventory = outcome.inventory_seeded,
        "Reference data seeded"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_seeds_everything() {
        let storage = LedgerStorage::open_in_memory().unwrap();
        let outcome = ensure_seeded(&storage).unwrap();
        assert!(outcome.zones_seeded);
        assert!(outcome.inventory_seeded);

        let zones: Vec<Zone> = storage.read_collection(Collection::Zones).unwrap();
        assert_eq!(zones.len(), 45);
        assert_eq!(zones[0], Zone::new("B01", "Aurora-del Pilar"));
        assert_eq!(zones[44], Zone::new("B45", "Victorias"));

        let items: Vec<InventoryItem> = storage.read_collection(Collection::Inventory).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].qty, 200);
    }

    #[test]
    fn test_second_run_is_noop() {
        let storage = LedgerStorage::open_in_memory().unwrap();
        ensure_seeded(&storage).unwrap();
        let revision = storage.revision().unwrap();

        let outcome = ensure_seeded(&storage).unwrap();
        assert_eq!(outcome, SeedOutcome::default());
        assert_eq!(storage.revision().unwrap(), revision);
    }

    #[test]
    fn test_stale_version_reseeds_only_that_collection() {
        let storage = LedgerStorage::open_in_memory().unwrap();
        ensure_seeded(&storage).unwrap();

        // Simulate stock drawn down, then an older zone schema on disk
        let txn = storage.begin_write().unwrap();
        storage
            .write_collection_txn(&txn, Collection::Inventory, &[InventoryItem::new("I1", "Rice 5kg", 7)])
            .unwrap();
        storage.set_meta_txn(&txn, ZONES_VERSION_KEY, 1).unwrap();
        txn.commit().unwrap();

        let outcome = ensure_seeded(&storage).unwrap();
        assert!(outcome.zones_seeded);
        assert!(!outcome.inventory_seeded);

        let items: Vec<InventoryItem> = storage.read_collection(Collection::Inventory).unwrap();
        assert_eq!(items, vec![InventoryItem::new("I1", "Rice 5kg", 7)]);
    }
}
