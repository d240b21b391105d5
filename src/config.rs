//! Receipt configuration.
//!
//! Refunds of stock-creating invoices carry a "Receipts" operation type of
//! the invoice's warehouse. Which type that is comes from explicit
//! warehouse → picking type entries; warehouses without an entry fall back
//! to the first picking type whose name is one of the localized receipt
//! names. [`ReceiptTypeMap::resolve`] validates the entries once against the
//! store so that refunds only ever do a map lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PickingTypeCode, PickingTypeId, StockError, WarehouseId};
use crate::store::Store;

/// Localized names of the default receipt operation type.
pub const DEFAULT_RECEIPT_TYPE_NAMES: &[&str] = &["Receipts", "Ontvangsten", "Réceptions"];

/// Step between sequence numbers of moves created in one run.
pub const DEFAULT_MOVE_SEQUENCE_STEP: u32 = 5;

/// Explicit receipt picking type of a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptTypeEntry {
    pub warehouse_id: WarehouseId,
    pub picking_type_id: PickingTypeId,
}

/// Settings for receipt generation and refund mirroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    /// Explicit receipt types per warehouse.
    pub receipt_types: Vec<ReceiptTypeEntry>,
    /// Names matched for warehouses without an explicit entry.
    pub receipt_type_names: Vec<String>,
    /// Step between sequence numbers of generated moves.
    pub move_sequence_step: u32,
    /// Zero padding of generated picking names.
    pub picking_name_padding: usize,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            receipt_types: Vec::new(),
            receipt_type_names: DEFAULT_RECEIPT_TYPE_NAMES
                .iter()
                .map(|n| n.to_string())
                .collect(),
            move_sequence_step: DEFAULT_MOVE_SEQUENCE_STEP,
            picking_name_padding: 5,
        }
    }
}

impl StockConfig {
    /// Map `warehouse` to `picking_type` explicitly.
    pub fn receipt_type(mut self, warehouse_id: WarehouseId, picking_type_id: PickingTypeId) -> Self {
        self.receipt_types.push(ReceiptTypeEntry {
            warehouse_id,
            picking_type_id,
        });
        self
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, StockError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Receipt picking type per warehouse, resolved against a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptTypeMap {
    by_warehouse: BTreeMap<WarehouseId, PickingTypeId>,
}

impl ReceiptTypeMap {
    /// Resolve the configuration against the warehouses and picking types
    /// in `store`.
    ///
    /// Explicit entries must reference an existing warehouse and an incoming
    /// picking type of that warehouse; a warehouse may appear only once.
    pub fn resolve(store: &Store, config: &StockConfig) -> Result<Self, StockError> {
        let mut by_warehouse = BTreeMap::new();

        for entry in &config.receipt_types {
            let warehouse = store.warehouse(entry.warehouse_id)?;
            let picking_type = store.picking_type(entry.picking_type_id)?;
            if picking_type.code != PickingTypeCode::Incoming {
                return Err(StockError::Config(format!(
                    "picking type '{}' mapped to warehouse '{}' is not a receipt type",
                    picking_type.name, warehouse.name
                )));
            }
            if picking_type.warehouse_id != Some(warehouse.id) {
                return Err(StockError::Config(format!(
                    "picking type '{}' does not belong to warehouse '{}'",
                    picking_type.name, warehouse.name
                )));
            }
            if by_warehouse
                .insert(warehouse.id, picking_type.id)
                .is_some()
            {
                return Err(StockError::Config(format!(
                    "warehouse '{}' has more than one receipt type entry",
                    warehouse.name
                )));
            }
        }

        for warehouse in store.warehouses() {
            if by_warehouse.contains_key(&warehouse.id) {
                continue;
            }
            let by_name = store.picking_types().find(|pt| {
                pt.warehouse_id == Some(warehouse.id)
                    && config.receipt_type_names.iter().any(|n| *n == pt.name)
            });
            match by_name {
                Some(pt) => {
                    by_warehouse.insert(warehouse.id, pt.id);
                }
                None => debug!(warehouse = %warehouse.name, "no receipt picking type found"),
            }
        }

        Ok(Self { by_warehouse })
    }

    /// Receipt picking type of `warehouse`, if one was resolved.
    pub fn get(&self, warehouse: WarehouseId) -> Option<PickingTypeId> {
        self.by_warehouse.get(&warehouse).copied()
    }

    /// Receipt picking type of `warehouse`, or a configuration error.
    pub fn require(&self, warehouse: WarehouseId) -> Result<PickingTypeId, StockError> {
        self.get(warehouse).ok_or_else(|| {
            StockError::Config(format!(
                "no receipt picking type configured for warehouse #{warehouse}"
            ))
        })
    }
}
