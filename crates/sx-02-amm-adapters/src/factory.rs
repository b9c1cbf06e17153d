//! # Adapter Factory
//!
//! One pool plus one reserve/exchange adapter pair per registered asset.
//! Adapter addresses are derived from the asset, so they are the same on
//! every host.

use crate::domain::entities::{
    derive_address, AdapterPair, Call, EXCHANGE_ADAPTER_TAG, RESERVE_ADAPTER_TAG,
};
use crate::domain::errors::AdapterError;
use crate::exchange::ExchangeAdapter;
use crate::host::Host;
use crate::ports::outbound::LiquidityPool;
use crate::reserve::ReserveAdapter;
use shared_types::{address_hex, Address, ZERO_ADDRESS};
use sx_telemetry::log_event;

impl<P: LiquidityPool + Clone> Host<P> {
    /// Install `pool` and an adapter pair for a registered asset.
    ///
    /// # Errors
    /// - `UnknownAsset` if no authority is registered for `asset`
    /// - `AdapterAlreadyExists` on a second call for the same asset
    pub fn create_exchange(&self, asset: Address, pool: P) -> Result<AdapterPair, AdapterError> {
        let creator = Call::new(ZERO_ADDRESS);
        self.execute("create_exchange", ZERO_ADDRESS, &creator, |cx| {
            if cx.state.authority(&asset).is_err() {
                return Err(AdapterError::UnknownAsset(asset));
            }

            let pair = AdapterPair {
                pool: pool.address(),
                reserve: derive_address(RESERVE_ADAPTER_TAG, &asset),
                exchange: derive_address(EXCHANGE_ADAPTER_TAG, &asset),
            };
            cx.state.install_exchange(asset, pool, pair)?;

            log_event!(
                info,
                "factory",
                "Exchange created",
                asset = %address_hex(&asset),
                pool = %address_hex(&pair.pool),
                reserve = %address_hex(&pair.reserve),
                exchange = %address_hex(&pair.exchange)
            );
            Ok(pair)
        })
    }

    /// Addresses installed for `asset`.
    pub fn adapters(&self, asset: &Address) -> Result<AdapterPair, AdapterError> {
        self.with_state(|s| {
            s.adapter_pair(asset)
                .ok_or(AdapterError::UnknownAsset(*asset))
        })
    }

    pub fn reserve_adapter(&self, asset: &Address) -> Result<ReserveAdapter<'_, P>, AdapterError> {
        let pair = self.adapters(asset)?;
        Ok(ReserveAdapter::new(self, *asset, pair.reserve))
    }

    pub fn exchange_adapter(
        &self,
        asset: &Address,
    ) -> Result<ExchangeAdapter<'_, P>, AdapterError> {
        let pair = self.adapters(asset)?;
        Ok(ExchangeAdapter::new(self, *asset, pair.exchange))
    }
}
