//! Recharge voucher table.

use crate::errors::RegistryError;
use std::collections::BTreeMap;

/// Exact mapping from bank transaction id to recharge amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoucherTable {
    entries: BTreeMap<String, u64>,
}

impl Default for VoucherTable {
    fn default() -> Self {
        Self::empty()
            .with_voucher("upg100", 100)
            .with_voucher("upg500", 500)
            .with_voucher("upg1000", 1000)
    }
}

impl VoucherTable {
    /// A table accepting no vouchers.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace a voucher.
    #[must_use]
    pub fn with_voucher(mut self, transaction_id: impl Into<String>, amount: u64) -> Self {
        self.entries.insert(transaction_id.into(), amount);
        self
    }

    /// Recharge amount for `transaction_id`.
    pub fn amount_for(&self, transaction_id: &str) -> Result<u64, RegistryError> {
        self.entries
            .get(transaction_id)
            .copied()
            .ok_or_else(|| RegistryError::InvalidVoucher(transaction_id.to_string()))
    }
}
