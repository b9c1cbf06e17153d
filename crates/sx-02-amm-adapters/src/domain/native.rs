//! Native-currency balances.

use super::errors::AdapterError;
use shared_types::{Address, U256};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct NativeLedger {
    balances: BTreeMap<Address, U256>,
}

impl NativeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    /// Sum of all balances.
    pub fn total(&self) -> Result<U256, AdapterError> {
        self.balances.values().try_fold(U256::zero(), |acc, balance| {
            acc.checked_add(*balance)
                .ok_or(AdapterError::ArithmeticOverflow)
        })
    }

    /// Create `amount` out of thin air (genesis and simulations).
    pub fn credit(&mut self, holder: &Address, amount: U256) -> Result<(), AdapterError> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self
            .balance_of(holder)
            .checked_add(amount)
            .ok_or(AdapterError::ArithmeticOverflow)?;
        self.balances.insert(*holder, balance);
        Ok(())
    }

    /// Overwrite a balance with a previously read value.
    pub(crate) fn restore(&mut self, holder: &Address, balance: U256) {
        if balance.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }

    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AdapterError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(AdapterError::InsufficientBalance {
                holder: *from,
                required: amount,
                available,
            });
        }
        if amount.is_zero() || from == to {
            return Ok(());
        }

        let remaining = available - amount;
        if remaining.is_zero() {
            self.balances.remove(from);
        } else {
            self.balances.insert(*from, remaining);
        }
        self.credit(to, amount)
    }
}
