//! # Bridged Token Ledger
//!
//! Balances of the bridged asset. Supply grows only through
//! [`BridgedToken::mint_authorized`] and shrinks only through
//! [`BridgedToken::burn`]; transfers conserve it.
//!
//! Between [`BridgedToken::begin`] and `commit`/`rollback` every balance
//! write records the prior value once, so undoing a call costs only what the
//! call touched.

use super::errors::AuthorityError;
use super::nonce_ledger::ConsumedNonce;
use shared_types::{Address, U256};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct BridgedToken {
    balances: BTreeMap<Address, U256>,
    total_supply: U256,
    undo: Option<TokenUndo>,
}

/// Pre-call values of the balances a call wrote.
#[derive(Clone, Debug)]
struct TokenUndo {
    balances: BTreeMap<Address, U256>,
    total_supply: U256,
}

impl BridgedToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    /// Start recording prior balances.
    pub(crate) fn begin(&mut self) {
        self.undo = Some(TokenUndo {
            balances: BTreeMap::new(),
            total_supply: self.total_supply,
        });
    }

    /// Keep every write since `begin`.
    pub(crate) fn commit(&mut self) {
        self.undo = None;
    }

    /// Restore balances and supply to their values at `begin`.
    pub(crate) fn rollback(&mut self) {
        if let Some(undo) = self.undo.take() {
            for (holder, balance) in undo.balances {
                self.write(&holder, balance);
            }
            self.total_supply = undo.total_supply;
        }
    }

    /// Fail with `ArithmeticOverflow` if minting `amount` would overflow the
    /// supply. Callers check this before consuming a nonce.
    pub fn ensure_mintable(&self, amount: U256) -> Result<(), AuthorityError> {
        self.total_supply
            .checked_add(amount)
            .map(|_| ())
            .ok_or(AuthorityError::ArithmeticOverflow)
    }

    /// Credit `net` to `beneficiary` and the optional fee to its recipient.
    ///
    /// Requires the receipt of a freshly consumed nonce.
    pub fn mint_authorized(
        &mut self,
        _receipt: ConsumedNonce,
        beneficiary: &Address,
        net: U256,
        fee: Option<(Address, U256)>,
    ) -> Result<(), AuthorityError> {
        let fee_amount = fee.map(|(_, amount)| amount).unwrap_or_default();
        let total = net
            .checked_add(fee_amount)
            .ok_or(AuthorityError::ArithmeticOverflow)?;
        let supply = self
            .total_supply
            .checked_add(total)
            .ok_or(AuthorityError::ArithmeticOverflow)?;

        self.credit(beneficiary, net)?;
        if let Some((recipient, amount)) = fee {
            if !amount.is_zero() {
                self.credit(&recipient, amount)?;
            }
        }
        self.total_supply = supply;
        Ok(())
    }

    /// Destroy `amount` from `holder`.
    pub fn burn(&mut self, holder: &Address, amount: U256) -> Result<(), AuthorityError> {
        self.debit(holder, amount)?;
        self.total_supply -= amount;
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AuthorityError> {
        if amount.is_zero() || from == to {
            return self.ensure_balance(from, amount);
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    fn ensure_balance(&self, holder: &Address, amount: U256) -> Result<(), AuthorityError> {
        let available = self.balance_of(holder);
        if available < amount {
            return Err(AuthorityError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        Ok(())
    }

    fn debit(&mut self, holder: &Address, amount: U256) -> Result<(), AuthorityError> {
        self.ensure_balance(holder, amount)?;
        let remaining = self.balance_of(holder) - amount;
        self.write(holder, remaining);
        Ok(())
    }

    fn credit(&mut self, holder: &Address, amount: U256) -> Result<(), AuthorityError> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self
            .balance_of(holder)
            .checked_add(amount)
            .ok_or(AuthorityError::ArithmeticOverflow)?;
        self.write(holder, balance);
        Ok(())
    }

    fn write(&mut self, holder: &Address, balance: U256) {
        if let Some(undo) = self.undo.as_mut() {
            let balances = &self.balances;
            undo.balances
                .entry(*holder)
                .or_insert_with(|| balances.get(holder).copied().unwrap_or_default());
        }
        if balance.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nonce_ledger::ConsumedNonceSet;

    const ALICE: Address = [0xA1; 20];
    const BOB: Address = [0xB0; 20];
    const FEES: Address = [0xFE; 20];

    fn minted(amount: u64, fee: Option<(Address, U256)>) -> BridgedToken {
        let mut nonces = ConsumedNonceSet::new();
        let mut token = BridgedToken::new();
        let receipt = nonces.consume([1u8; 32]).unwrap();
        token
            .mint_authorized(receipt, &ALICE, U256::from(amount), fee)
            .unwrap();
        token
    }

    #[test]
    fn test_mint_credits_and_grows_supply() {
        let token = minted(100, None);
        assert_eq!(token.balance_of(&ALICE), U256::from(100u64));
        assert_eq!(token.total_supply(), U256::from(100u64));
    }

    #[test]
    fn test_mint_with_fee() {
        let token = minted(99, Some((FEES, U256::one())));
        assert_eq!(token.balance_of(&ALICE), U256::from(99u64));
        assert_eq!(token.balance_of(&FEES), U256::one());
        assert_eq!(token.total_supply(), U256::from(100u64));
    }

    #[test]
    fn test_burn_shrinks_supply() {
        let mut token = minted(100, None);
        token.burn(&ALICE, U256::from(40u64)).unwrap();
        assert_eq!(token.balance_of(&ALICE), U256::from(60u64));
        assert_eq!(token.total_supply(), U256::from(60u64));
    }

    #[test]
    fn test_burn_more_than_balance_fails() {
        let mut token = minted(10, None);
        assert_eq!(
            token.burn(&ALICE, U256::from(11u64)),
            Err(AuthorityError::InsufficientBalance {
                required: U256::from(11u64),
                available: U256::from(10u64),
            })
        );
        assert_eq!(token.total_supply(), U256::from(10u64));
    }

    #[test]
    fn test_transfer_conserves_supply() {
        let mut token = minted(100, None);
        token.transfer(&ALICE, &BOB, U256::from(30u64)).unwrap();
        assert_eq!(token.balance_of(&ALICE), U256::from(70u64));
        assert_eq!(token.balance_of(&BOB), U256::from(30u64));
        assert_eq!(token.total_supply(), U256::from(100u64));
    }

    #[test]
    fn test_self_transfer_checks_balance() {
        let mut token = minted(5, None);
        assert!(token.transfer(&ALICE, &ALICE, U256::from(5u64)).is_ok());
        assert!(token.transfer(&ALICE, &ALICE, U256::from(6u64)).is_err());
        assert_eq!(token.balance_of(&ALICE), U256::from(5u64));
    }

    #[test]
    fn test_rollback_restores_touched_balances() {
        let mut token = minted(100, None);
        token.begin();
        token.transfer(&ALICE, &BOB, U256::from(30u64)).unwrap();
        token.burn(&BOB, U256::from(10u64)).unwrap();
        token.rollback();

        assert_eq!(token.balance_of(&ALICE), U256::from(100u64));
        assert_eq!(token.balance_of(&BOB), U256::zero());
        assert_eq!(token.total_supply(), U256::from(100u64));
    }

    #[test]
    fn test_commit_keeps_writes() {
        let mut token = minted(100, None);
        token.begin();
        token.transfer(&ALICE, &BOB, U256::from(30u64)).unwrap();
        token.commit();
        token.rollback();

        assert_eq!(token.balance_of(&BOB), U256::from(30u64));
    }

    #[test]
    fn test_ensure_mintable_detects_overflow() {
        let token = minted(1, None);
        assert_eq!(
            token.ensure_mintable(U256::MAX),
            Err(AuthorityError::ArithmeticOverflow)
        );
        assert!(token.ensure_mintable(U256::from(5u64)).is_ok());
    }
}
