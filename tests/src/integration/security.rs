//! # Authorization Scenarios
//!
//! Replay, expiry, payload binding and atomicity of failed calls.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use shared_types::{abi_encode, keccak256, AbiToken, U256};
    use std::thread;
    use sx_02_amm_adapters::{ErrorKind, PayloadVersion};

    #[test]
    fn test_replay_rejected_even_with_new_payload() {
        let scenario = Scenario::seeded();
        let mut payload = scenario.reserve_payload();
        let sig = scenario.sign(
            &scenario.pair.reserve,
            U256::from(AMOUNT),
            &nonce(1),
            &payload.commitment(PayloadVersion::V1),
        );
        scenario
            .submit_add(TRADER, AMOUNT / 2, AMOUNT, nonce(1), &payload, &sig)
            .unwrap();

        let err = scenario
            .submit_add(TRADER, AMOUNT / 2, AMOUNT, nonce(1), &payload, &sig)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonceReused);

        payload.deadline = U256::from(DEADLINE - 1);
        let err = scenario
            .submit_add(TRADER, AMOUNT / 2, AMOUNT, nonce(1), &payload, &sig)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonceReused);
    }

    #[test]
    fn test_sell_nonce_cannot_be_replayed() {
        let scenario = Scenario::seeded();
        let payload = scenario.sell_payload(TRADER, 0, U256::one());
        scenario.sell(TRADER, &payload, TRADE, nonce(1)).unwrap();

        let err = scenario
            .sell(TRADER, &payload, TRADE, nonce(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonceReused);
    }

    #[test]
    fn test_expired_deadline_with_valid_signature() {
        let scenario = Scenario::new();
        scenario.host.set_time(DEADLINE + 1);

        let err = scenario
            .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(1))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Expired);
        assert_eq!(scenario.supply(), U256::zero());

        // The nonce survived, so the same authorization works once time allows.
        scenario.host.set_time(START);
        assert!(scenario
            .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(1))
            .is_ok());
    }

    #[test]
    fn test_drifted_payload_order_rejected() {
        let scenario = Scenario::new();
        let payload = scenario.reserve_payload();
        let drifted = keccak256(&abi_encode(&[
            AbiToken::Bytes(payload.refund.as_bytes().to_vec()),
            AbiToken::Uint(payload.deadline),
            AbiToken::Uint(payload.min_liquidity),
        ]));
        let sig = scenario.sign(
            &scenario.pair.reserve,
            U256::from(AMOUNT),
            &nonce(1),
            &drifted,
        );

        let err = scenario
            .submit_add(PROVIDER, AMOUNT, AMOUNT, nonce(1), &payload, &sig)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_unknown_custodian_rejected() {
        let scenario = Scenario::new();
        let payload = scenario.reserve_payload();
        let digest = scenario
            .host
            .hash_for_signature(
                &ASSET,
                &scenario.pair.reserve,
                U256::from(AMOUNT),
                &nonce(1),
                &payload.commitment(PayloadVersion::V1),
            )
            .unwrap();
        let impostor = sx_01_mint_authority::DevSigner::from_secret(&[0x77; 32]).unwrap();
        let sig = impostor.sign_digest_bytes(&digest).unwrap();

        let err = scenario
            .submit_add(PROVIDER, AMOUNT, AMOUNT, nonce(1), &payload, &sig)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_failed_call_leaves_no_trace() {
        let scenario = Scenario::seeded();
        let events = scenario.host.events().len();
        let reserves = scenario.host.reserves(&ASSET).unwrap();

        // Relay fee larger than the proceeds.
        let payload = scenario.sell_payload(TRADER, FUNDING, U256::one());
        let err = scenario
            .sell(RELAYER, &payload, TRADE, nonce(1))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ArithmeticOverflow);
        assert_eq!(scenario.host.events().len(), events);
        assert_eq!(scenario.host.reserves(&ASSET).unwrap(), reserves);
        assert_eq!(scenario.supply(), U256::from(AMOUNT));
        assert_eq!(scenario.native(&RELAYER), U256::from(FUNDING));
        assert!(!scenario
            .host
            .with_state(|s| s.authority(&ASSET).unwrap().is_nonce_consumed(&nonce(1))));
    }

    #[test]
    fn test_remove_requires_share_approval() {
        let scenario = Scenario::seeded();
        let err = scenario
            .host
            .reserve_adapter(&ASSET)
            .unwrap()
            .remove_liquidity(
                sx_02_amm_adapters::Call::new(PROVIDER),
                U256::from(AMOUNT),
                U256::one(),
                U256::one(),
                FOREIGN,
                deadline(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientAllowance);
    }

    // =========================================================================
    // CONCURRENT SUBMISSION
    // =========================================================================

    #[test]
    fn test_concurrent_replay_commits_once() {
        let scenario = Scenario::new();
        let payload = scenario.reserve_payload();
        let sig = scenario.sign(
            &scenario.pair.reserve,
            U256::from(AMOUNT),
            &nonce(1),
            &payload.commitment(PayloadVersion::V1),
        );

        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = [PROVIDER, TRADER]
                .into_iter()
                .map(|caller| {
                    let (scenario, payload, sig) = (&scenario, &payload, &sig);
                    scope.spawn(move || {
                        scenario.submit_add(caller, AMOUNT, AMOUNT, nonce(1), payload, sig)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        let rejected: Vec<_> = results
            .iter()
            .filter_map(|result| result.as_ref().err())
            .collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].kind(), ErrorKind::NonceReused);
        assert_eq!(scenario.supply(), U256::from(AMOUNT));
        assert_eq!(
            scenario.host.total_shares(&ASSET).unwrap(),
            U256::from(AMOUNT)
        );
    }

    #[test]
    fn test_concurrent_deposits_all_settle() {
        let scenario = Scenario::seeded();
        let callers = [PROVIDER, TRADER, RELAYER, PROVIDER, TRADER, RELAYER];

        thread::scope(|scope| {
            for (tag, caller) in callers.into_iter().enumerate() {
                let scenario = &scenario;
                scope.spawn(move || {
                    scenario
                        .add_liquidity(caller, AMOUNT / 2, AMOUNT, nonce(tag as u64 + 1))
                        .unwrap();
                });
            }
        });

        let deposits = callers.len() as u64;
        assert_eq!(scenario.supply(), U256::from(AMOUNT) * U256::from(deposits + 1));
        assert_eq!(
            scenario.host.total_shares(&ASSET).unwrap(),
            U256::from(AMOUNT) + U256::from(AMOUNT / 2) * U256::from(deposits)
        );
        assert_eq!(
            scenario.native(&scenario.pair.pool),
            U256::from(AMOUNT) + U256::from(AMOUNT / 2) * U256::from(deposits)
        );
    }
}
