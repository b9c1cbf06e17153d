//! # Liquidity Scenarios
//!
//! Mint-and-provide through the reserve adapter and withdrawal back to the
//! foreign chain.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use shared_types::U256;
    use sx_02_amm_adapters::{LedgerEvent, Reserves};

    // =========================================================================
    // ADD / REMOVE
    // =========================================================================

    #[test]
    fn test_add_liquidity_mints_exact_supply() {
        let scenario = Scenario::new();
        let added = scenario
            .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(1))
            .unwrap();

        assert_eq!(scenario.supply(), U256::from(AMOUNT));
        assert_eq!(added.shares, U256::from(AMOUNT));
        assert_eq!(
            scenario.host.reserves(&ASSET).unwrap(),
            Reserves {
                native: U256::from(AMOUNT),
                asset: U256::from(AMOUNT),
            }
        );
    }

    #[test]
    fn test_full_removal_burns_all_supply() {
        let scenario = Scenario::new();
        let added = scenario
            .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(1))
            .unwrap();

        let removed = scenario
            .remove_liquidity(
                PROVIDER,
                added.shares,
                U256::from(AMOUNT),
                U256::from(AMOUNT),
            )
            .unwrap();

        assert_eq!(removed.asset_out, U256::from(AMOUNT));
        assert_eq!(removed.native_out, U256::from(AMOUNT));
        assert_eq!(scenario.supply(), U256::zero());
        assert_eq!(scenario.host.total_shares(&ASSET).unwrap(), U256::zero());
    }

    #[test]
    fn test_round_trip_returns_native_within_tolerance() {
        let scenario = Scenario::new();
        let before = scenario.native(&PROVIDER);

        let added = scenario
            .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(1))
            .unwrap();
        scenario
            .remove_liquidity(PROVIDER, added.shares, U256::one(), U256::one())
            .unwrap();

        let after = scenario.native(&PROVIDER);
        let drift = if after > before {
            after - before
        } else {
            before - after
        };
        assert!(drift <= U256::from(10_000u64));
        assert_eq!(scenario.supply(), U256::zero());
    }

    #[test]
    fn test_second_provider_gets_proportional_shares() {
        let scenario = Scenario::seeded();
        let half = AMOUNT / 2;

        let added = scenario
            .add_liquidity(TRADER, half, AMOUNT, nonce(1))
            .unwrap();

        assert_eq!(added.shares, U256::from(half));
        assert_eq!(added.asset_in, U256::from(half + 1));
        assert_eq!(
            scenario.host.asset_balance(&ASSET, &TRADER).unwrap(),
            added.leftover
        );
        assert_eq!(
            scenario.host.total_shares(&ASSET).unwrap(),
            U256::from(AMOUNT + half)
        );
    }

    #[test]
    fn test_min_liquidity_above_output_reverts() {
        let scenario = Scenario::seeded();
        let mut payload = scenario.reserve_payload();
        payload.min_liquidity = U256::from(AMOUNT);
        let sig = scenario.sign(
            &scenario.pair.reserve,
            U256::from(AMOUNT),
            &nonce(1),
            &payload.commitment(sx_02_amm_adapters::PayloadVersion::V1),
        );

        let err = scenario
            .submit_add(TRADER, AMOUNT / 2, AMOUNT, nonce(1), &payload, &sig)
            .unwrap_err();

        assert_eq!(err.kind(), sx_02_amm_adapters::ErrorKind::SlippageExceeded);
        assert_eq!(scenario.supply(), U256::from(AMOUNT));
        assert_eq!(scenario.native(&TRADER), U256::from(FUNDING));
    }

    #[test]
    fn test_withdraw_after_trading() {
        let scenario = Scenario::seeded();
        scenario.buy(TRADER, TRADE, U256::one()).unwrap();
        let quote = scenario
            .host
            .quote_sell(&ASSET, U256::from(TRADE))
            .unwrap();
        let payload = scenario.sell_payload(TRADER, RELAY_FEE, quote);
        scenario.sell(RELAYER, &payload, TRADE, nonce(1)).unwrap();

        let reserves = scenario.host.reserves(&ASSET).unwrap();
        let removed = scenario
            .remove_liquidity(PROVIDER, U256::from(AMOUNT), reserves.native, U256::one())
            .unwrap();

        assert_eq!(removed.native_out, reserves.native);
        assert_eq!(removed.asset_out, reserves.asset);
        assert_eq!(scenario.supply(), U256::zero());
    }

    #[test]
    fn test_events_follow_call_order() {
        let scenario = Scenario::seeded();
        scenario
            .remove_liquidity(PROVIDER, U256::from(AMOUNT), U256::one(), U256::one())
            .unwrap();

        let kinds: Vec<&str> = scenario
            .host
            .events()
            .iter()
            .map(|event| match event {
                LedgerEvent::ShiftIn { .. } => "shift_in",
                LedgerEvent::ShiftOut { .. } => "shift_out",
                LedgerEvent::LiquidityAdded(_) => "added",
                LedgerEvent::LiquidityRemoved(_) => "removed",
                LedgerEvent::AssetBought(_) => "bought",
                LedgerEvent::AssetSold(_) => "sold",
                LedgerEvent::RelayFeePaid { .. } => "relay_fee",
            })
            .collect();
        assert_eq!(kinds, ["shift_in", "added", "shift_out", "removed"]);

        let json = serde_json::to_string(&scenario.host.events()[3]).unwrap();
        assert!(json.contains(r#""type":"LiquidityRemoved""#));
    }
}
