//! # Swap Scenarios
//!
//! Buy (native in, asset burned to the foreign chain) and sell (asset minted
//! and swapped, proceeds split between beneficiary and relayer).

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use shared_types::U256;
    use sx_02_amm_adapters::{ErrorKind, LedgerEvent};

    #[test]
    fn test_buy_matches_quoted_input_price() {
        let scenario = Scenario::seeded();
        let quote = scenario
            .host
            .quote_buy(&ASSET, U256::from(TRADE))
            .unwrap();
        let supply = scenario.supply();

        let bought = scenario.buy(TRADER, TRADE, U256::one()).unwrap();

        assert_eq!(bought.asset_out, quote);
        assert_eq!(scenario.supply(), supply - quote);
        assert_eq!(
            scenario.native(&TRADER),
            U256::from(FUNDING) - U256::from(TRADE)
        );
    }

    #[test]
    fn test_relayed_sell_splits_proceeds() {
        let scenario = Scenario::seeded();
        let quote = scenario
            .host
            .quote_sell(&ASSET, U256::from(TRADE))
            .unwrap();
        let trader_before = scenario.native(&TRADER);
        let relayer_before = scenario.native(&RELAYER);

        let payload = scenario.sell_payload(TRADER, RELAY_FEE, quote);
        let sold = scenario.sell(RELAYER, &payload, TRADE, nonce(1)).unwrap();

        assert_eq!(sold.native_out, quote);
        assert_eq!(
            scenario.native(&RELAYER),
            relayer_before + U256::from(RELAY_FEE)
        );
        assert_eq!(
            scenario.native(&TRADER),
            trader_before + quote - U256::from(RELAY_FEE)
        );
        assert!(scenario.host.events().iter().any(|event| matches!(
            event,
            LedgerEvent::RelayFeePaid { relayer, amount, .. }
                if *relayer == RELAYER && *amount == U256::from(RELAY_FEE)
        )));
    }

    #[test]
    fn test_self_sell_keeps_relay_fee() {
        let scenario = Scenario::seeded();
        let quote = scenario
            .host
            .quote_sell(&ASSET, U256::from(TRADE))
            .unwrap();
        let before = scenario.native(&TRADER);

        let payload = scenario.sell_payload(TRADER, RELAY_FEE, quote);
        let sold = scenario.sell(TRADER, &payload, TRADE, nonce(1)).unwrap();

        assert_eq!(sold.relay_fee, U256::zero());
        assert_eq!(scenario.native(&TRADER), before + quote);
    }

    #[test]
    fn test_sell_floor_enforced() {
        let scenario = Scenario::seeded();
        let quote = scenario
            .host
            .quote_sell(&ASSET, U256::from(TRADE))
            .unwrap();

        let payload = scenario.sell_payload(TRADER, RELAY_FEE, quote + U256::one());
        let err = scenario
            .sell(RELAYER, &payload, TRADE, nonce(1))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SlippageExceeded);
        assert_eq!(scenario.supply(), U256::from(AMOUNT));
    }

    #[test]
    fn test_burn_fee_taken_on_buy() {
        let scenario = Scenario::with_fees(0, 100);
        scenario
            .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(0))
            .unwrap();
        let quote = scenario
            .host
            .quote_buy(&ASSET, U256::from(TRADE))
            .unwrap();

        scenario.buy(TRADER, TRADE, U256::one()).unwrap();

        let fee = quote / U256::from(100u64);
        assert_eq!(scenario.host.asset_balance(&ASSET, &FEES).unwrap(), fee);
        assert_eq!(scenario.supply(), U256::from(AMOUNT) - (quote - fee));
    }

    #[test]
    fn test_sell_after_buy_moves_price_back() {
        let scenario = Scenario::seeded();
        let initial = scenario.host.reserves(&ASSET).unwrap();

        scenario.buy(TRADER, TRADE, U256::one()).unwrap();
        let payload = scenario.sell_payload(TRADER, 0, U256::one());
        scenario.sell(TRADER, &payload, TRADE, nonce(1)).unwrap();

        let reserves = scenario.host.reserves(&ASSET).unwrap();
        assert!(reserves.asset > initial.asset);
        assert!(reserves.native > initial.native);
    }
}
