//! # Host
//!
//! Serialized, all-or-nothing execution environment for adapter calls.
//!
//! ```text
//! lock world ─► read clock ─► open journal ─► move attached value ─► run call
//!                                                      │
//!                          Ok  ◄───────────────────────┤──────────────► Err
//!                 drop journal, count events                  replay journal
//! ```
//!
//! The world lock is held for the whole call and the clock lives behind the
//! same lock, so no call observes a half-applied state or a stale time.
//! The journal records the pre-call value of each account, authority and
//! pool the first time a call touches it; reverting costs what the call
//! touched, not the size of the world.

use crate::domain::entities::{AdapterPair, Call, HostConfig, LedgerEvent, Reserves};
use crate::domain::errors::AdapterError;
use crate::domain::native::NativeLedger;
use crate::ports::outbound::LiquidityPool;
use crate::ReferencePool;
use parking_lot::Mutex;
use shared_types::{address_hex, Address, Timestamp, U256};
use std::collections::{BTreeMap, BTreeSet};
use sx_01_mint_authority::{AuthorityRegistry, MintAuthority, MintAuthorityApi};
use sx_telemetry::{log_event, metric_inc, time_histogram};
use sx_telemetry::{
    CALLS_COMMITTED, CALLS_REVERTED, CALL_DURATION, NONCES_CONSUMED, RELAY_FEES_PAID, SHIFT_INS,
    SHIFT_OUTS,
};

/// Everything an adapter call may touch.
#[derive(Debug)]
pub struct WorldState<P> {
    registry: AuthorityRegistry,
    native: NativeLedger,
    /// Pool per asset.
    pools: BTreeMap<Address, P>,
    /// Adapter addresses per asset.
    adapters: BTreeMap<Address, AdapterPair>,
    events: Vec<LedgerEvent>,
    clock: Timestamp,
    journal: Option<Journal<P>>,
}

/// Undo log of the open call.
#[derive(Debug)]
struct Journal<P> {
    events: usize,
    /// Native balances before the call's first write.
    native: BTreeMap<Address, U256>,
    /// Assets whose authority holds an open checkpoint.
    authorities: BTreeSet<Address>,
    /// Pools before the call's first write.
    pools: BTreeMap<Address, P>,
    /// Exchanges created by the call.
    installed: Vec<Address>,
}

impl<P: LiquidityPool + Clone> WorldState<P> {
    pub fn now(&self) -> Timestamp {
        self.clock
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn native_balance(&self, holder: &Address) -> U256 {
        self.native.balance_of(holder)
    }

    pub fn pool(&self, asset: &Address) -> Result<&P, AdapterError> {
        self.pools
            .get(asset)
            .ok_or(AdapterError::UnknownAsset(*asset))
    }

    pub fn pool_mut(&mut self, asset: &Address) -> Result<&mut P, AdapterError> {
        let pool = self
            .pools
            .get_mut(asset)
            .ok_or(AdapterError::UnknownAsset(*asset))?;
        if let Some(journal) = self.journal.as_mut() {
            journal.pools.entry(*asset).or_insert_with(|| pool.clone());
        }
        Ok(pool)
    }

    pub fn authority(&self, asset: &Address) -> Result<&MintAuthority, AdapterError> {
        Ok(self.registry.lookup(asset)?)
    }

    pub fn authority_mut(&mut self, asset: &Address) -> Result<&mut MintAuthority, AdapterError> {
        let authority = self.registry.lookup_mut(asset)?;
        if let Some(journal) = self.journal.as_mut() {
            if journal.authorities.insert(*asset) {
                authority.checkpoint();
            }
        }
        Ok(authority)
    }

    pub fn adapter_pair(&self, asset: &Address) -> Option<AdapterPair> {
        self.adapters.get(asset).copied()
    }

    /// Move bridged asset between ledger accounts.
    pub fn transfer_asset(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AdapterError> {
        Ok(self.authority_mut(asset)?.transfer(from, to, amount)?)
    }

    /// Move native currency between accounts.
    pub fn transfer_native(
        &mut self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AdapterError> {
        if let Some(journal) = self.journal.as_mut() {
            let native = &self.native;
            for holder in [from, to] {
                journal
                    .native
                    .entry(*holder)
                    .or_insert_with(|| native.balance_of(holder));
            }
        }
        self.native.transfer(from, to, amount)
    }

    /// Registration checks before it writes and ends its call, so it needs
    /// no journal entry.
    pub(crate) fn register_authority(
        &mut self,
        admin: &Address,
        authority: MintAuthority,
    ) -> Result<(), AdapterError> {
        Ok(self.registry.register(admin, authority)?)
    }

    /// Install a pool and adapter pair for `asset`.
    pub(crate) fn install_exchange(
        &mut self,
        asset: Address,
        pool: P,
        pair: AdapterPair,
    ) -> Result<(), AdapterError> {
        if self.adapters.contains_key(&asset) || self.pools.contains_key(&asset) {
            return Err(AdapterError::AdapterAlreadyExists(asset));
        }
        self.pools.insert(asset, pool);
        self.adapters.insert(asset, pair);
        if let Some(journal) = self.journal.as_mut() {
            journal.installed.push(asset);
        }
        Ok(())
    }

    fn begin(&mut self) {
        self.journal = Some(Journal {
            events: self.events.len(),
            native: BTreeMap::new(),
            authorities: BTreeSet::new(),
            pools: BTreeMap::new(),
            installed: Vec::new(),
        });
    }

    fn commit(&mut self) {
        if let Some(journal) = self.journal.take() {
            for asset in &journal.authorities {
                if let Ok(authority) = self.registry.lookup_mut(asset) {
                    authority.commit();
                }
            }
        }
    }

    fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        self.events.truncate(journal.events);
        for (holder, balance) in &journal.native {
            self.native.restore(holder, *balance);
        }
        for asset in &journal.authorities {
            if let Ok(authority) = self.registry.lookup_mut(asset) {
                authority.revert();
            }
        }
        for (asset, pool) in journal.pools {
            self.pools.insert(asset, pool);
        }
        for asset in &journal.installed {
            self.pools.remove(asset);
            self.adapters.remove(asset);
        }
    }
}

/// The live view of one call.
pub struct CallContext<'a, P> {
    pub state: &'a mut WorldState<P>,
    pub call: &'a Call,
    /// Contract being called; it already holds the attached value.
    pub callee: Address,
    /// Clock read under the world lock.
    pub now: Timestamp,
}

impl<P> CallContext<'_, P> {
    pub fn emit(&mut self, event: LedgerEvent) {
        self.state.events.push(event);
    }
}

/// Serialized world, clock included.
pub struct Host<P = ReferencePool> {
    state: Mutex<WorldState<P>>,
}

impl<P: LiquidityPool + Clone> Host<P> {
    /// New host whose registry is administered by `registry_owner`.
    pub fn new(registry_owner: Address, config: HostConfig) -> Result<Self, AdapterError> {
        let mut native = NativeLedger::new();
        for allocation in &config.genesis {
            native.credit(&allocation.address, allocation.amount)?;
        }

        Ok(Self {
            state: Mutex::new(WorldState {
                registry: AuthorityRegistry::new(registry_owner),
                native,
                pools: BTreeMap::new(),
                adapters: BTreeMap::new(),
                events: Vec::new(),
                clock: config.initial_timestamp,
                journal: None,
            }),
        })
    }

    // =========================================================================
    // Clock
    // =========================================================================

    pub fn now(&self) -> Timestamp {
        self.state.lock().clock
    }

    /// Waits for any call in flight, so a call sees the time before or after
    /// the change, never both.
    pub fn set_time(&self, time: Timestamp) {
        self.state.lock().clock = time;
    }

    pub fn advance_time(&self, secs: u64) {
        let mut state = self.state.lock();
        state.clock = state.clock.saturating_add(secs);
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Run `f` as one atomic call from `call.caller` to `callee`.
    ///
    /// Attached value moves to `callee` first. On any error the world is
    /// restored to its pre-call state, events included.
    pub fn execute<T, F>(
        &self,
        operation: &'static str,
        callee: Address,
        call: &Call,
        f: F,
    ) -> Result<T, AdapterError>
    where
        F: FnOnce(&mut CallContext<'_, P>) -> Result<T, AdapterError>,
    {
        let _timer = time_histogram!(CALL_DURATION, &[operation]);
        let mut guard = self.state.lock();
        let first_event = guard.events.len();
        let now = guard.clock;
        guard.begin();

        let state = &mut *guard;
        let result = state
            .transfer_native(&call.caller, &callee, call.value)
            .and_then(|()| {
                f(&mut CallContext {
                    state,
                    call,
                    callee,
                    now,
                })
            });

        match result {
            Ok(value) => {
                guard.commit();
                record_committed(&*guard, &guard.events[first_event..]);
                metric_inc!(CALLS_COMMITTED, &[operation]);
                log_event!(
                    info,
                    "host",
                    "Call committed",
                    operation = operation,
                    caller = %address_hex(&call.caller),
                    value = %call.value,
                    events = guard.events.len() - first_event
                );
                Ok(value)
            }
            Err(error) => {
                guard.rollback();
                metric_inc!(CALLS_REVERTED, &[operation, error.kind().as_str()]);
                log_event!(
                    warn,
                    "host",
                    "Call reverted",
                    operation = operation,
                    caller = %address_hex(&call.caller),
                    kind = %error.kind(),
                    error = %error
                );
                Err(error)
            }
        }
    }

    /// Read-only access to the committed world.
    pub fn with_state<R>(&self, f: impl FnOnce(&WorldState<P>) -> R) -> R {
        f(&*self.state.lock())
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Register a mint authority. Only the registry owner may do so.
    pub fn register_authority(
        &self,
        admin: &Address,
        authority: MintAuthority,
    ) -> Result<(), AdapterError> {
        self.execute("register_authority", *admin, &Call::new(*admin), |cx| {
            cx.state.register_authority(admin, authority)
        })
    }

    /// Credit native currency out of thin air (simulations and genesis top-ups).
    pub fn fund_native(&self, to: &Address, amount: U256) -> Result<(), AdapterError> {
        self.state.lock().native.credit(to, amount)
    }

    /// Let `spender` move up to `amount` of `owner`'s pool shares.
    pub fn approve_shares(
        &self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
        amount: U256,
    ) -> Result<(), AdapterError> {
        self.execute("approve_shares", *owner, &Call::new(*owner), |cx| {
            cx.state.pool_mut(asset)?.approve(owner, spender, amount);
            Ok(())
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn native_balance(&self, holder: &Address) -> U256 {
        self.with_state(|s| s.native_balance(holder))
    }

    pub fn asset_balance(&self, asset: &Address, holder: &Address) -> Result<U256, AdapterError> {
        self.with_state(|s| Ok(s.authority(asset)?.balance_of(holder)))
    }

    pub fn asset_supply(&self, asset: &Address) -> Result<U256, AdapterError> {
        self.with_state(|s| Ok(s.authority(asset)?.total_supply()))
    }

    pub fn share_balance(&self, asset: &Address, holder: &Address) -> Result<U256, AdapterError> {
        self.with_state(|s| Ok(s.pool(asset)?.share_balance(holder)))
    }

    pub fn total_shares(&self, asset: &Address) -> Result<U256, AdapterError> {
        self.with_state(|s| Ok(s.pool(asset)?.total_shares()))
    }

    pub fn reserves(&self, asset: &Address) -> Result<Reserves, AdapterError> {
        self.with_state(|s| Ok(s.pool(asset)?.reserves()))
    }

    /// Asset bought by `native_in` at current reserves.
    pub fn quote_buy(&self, asset: &Address, native_in: U256) -> Result<U256, AdapterError> {
        self.with_state(|s| Ok(s.pool(asset)?.quote_native_to_asset_input(native_in)?))
    }

    /// Native currency bought by `asset_in` at current reserves.
    pub fn quote_sell(&self, asset: &Address, asset_in: U256) -> Result<U256, AdapterError> {
        self.with_state(|s| Ok(s.pool(asset)?.quote_asset_to_native_input(asset_in)?))
    }

    /// Digest the custodian must sign for a mint of `value` to `beneficiary`.
    pub fn hash_for_signature(
        &self,
        asset: &Address,
        beneficiary: &Address,
        value: U256,
        nonce_hash: &shared_types::Hash,
        payload_hash: &shared_types::Hash,
    ) -> Result<shared_types::Hash, AdapterError> {
        self.with_state(|s| {
            Ok(s.authority(asset)?
                .hash_for_signature(beneficiary, value, nonce_hash, payload_hash))
        })
    }

    pub fn events(&self) -> Vec<LedgerEvent> {
        self.with_state(|s| s.events.clone())
    }
}

fn record_committed<P: LiquidityPool + Clone>(state: &WorldState<P>, events: &[LedgerEvent]) {
    let symbol = |asset: &Address| {
        state
            .registry
            .lookup(asset)
            .map(|a| a.symbol().to_string())
            .unwrap_or_else(|_| address_hex(asset))
    };

    for event in events {
        match event {
            LedgerEvent::ShiftIn { asset, .. } => {
                metric_inc!(NONCES_CONSUMED);
                metric_inc!(SHIFT_INS, &[symbol(asset).as_str()]);
            }
            LedgerEvent::ShiftOut { asset, .. } => {
                metric_inc!(SHIFT_OUTS, &[symbol(asset).as_str()]);
            }
            LedgerEvent::RelayFeePaid { .. } => metric_inc!(RELAY_FEES_PAID),
            _ => {}
        }
    }
}
