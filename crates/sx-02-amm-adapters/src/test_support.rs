//! Shared fixture for adapter unit tests.

use crate::domain::entities::{derive_address, GenesisAllocation, HostConfig, POOL_TAG};
use crate::domain::payload::{PayloadVersion, ReservePayload, SellPayload};
use crate::{
    AdapterError, AdapterPair, AssetSold, Call, ExchangeAdapter, Host, LiquidityAdded, PoolConfig,
    ReferencePool, ReserveAdapter,
};
use shared_types::{keccak256, Address, ForeignAddress, Hash, U256};
use sx_01_mint_authority::{AuthorityConfig, DevSigner, MintAuthority};

pub(crate) const ADMIN: Address = [0xAD; 20];
pub(crate) const AUTHORITY: Address = [0xA0; 20];
pub(crate) const ASSET: Address = [0xB7; 20];
pub(crate) const FEES: Address = [0xFE; 20];
pub(crate) const PROVIDER: Address = [0x01; 20];
pub(crate) const TRADER: Address = [0x02; 20];
pub(crate) const RELAYER: Address = [0x03; 20];

pub(crate) const NOW: u64 = 1_000;
pub(crate) const DEADLINE: u64 = 100_000_000_000;
pub(crate) const AMOUNT: u64 = 200_000_000_000_000;
pub(crate) const FUNDING: u64 = 1_000_000_000_000_000_000;

pub(crate) fn nonce(tag: u8) -> Hash {
    keccak256(&[tag])
}

pub(crate) struct Fixture {
    pub host: Host,
    pub signer: DevSigner,
    pub pair: AdapterPair,
}

impl Fixture {
    pub fn new(mint_fee_bps: u16, burn_fee_bps: u16) -> Self {
        let signer = DevSigner::from_secret(&[0x42; 32]).unwrap();
        let genesis = [PROVIDER, TRADER, RELAYER]
            .into_iter()
            .map(|address| GenesisAllocation {
                address,
                amount: U256::from(FUNDING),
            })
            .collect();
        let host = Host::new(
            ADMIN,
            HostConfig {
                initial_timestamp: NOW,
                genesis,
            },
        )
        .unwrap();

        let config = AuthorityConfig {
            symbol: "zBTC".into(),
            signer: signer.address(),
            fee_recipient: FEES,
            mint_fee_bps,
            burn_fee_bps,
        };
        host.register_authority(&ADMIN, MintAuthority::new(AUTHORITY, ASSET, config).unwrap())
            .unwrap();

        let pool = ReferencePool::new(derive_address(POOL_TAG, &ASSET), PoolConfig::default());
        let pair = host.create_exchange(ASSET, pool).unwrap();

        Self { host, signer, pair }
    }

    pub fn reserve(&self) -> ReserveAdapter<'_, ReferencePool> {
        self.host.reserve_adapter(&ASSET).unwrap()
    }

    pub fn exchange(&self) -> ExchangeAdapter<'_, ReferencePool> {
        self.host.exchange_adapter(&ASSET).unwrap()
    }

    pub fn sign(&self, beneficiary: &Address, value: U256, nonce: &Hash, payload: &Hash) -> Vec<u8> {
        let digest = self
            .host
            .hash_for_signature(&ASSET, beneficiary, value, nonce, payload)
            .unwrap();
        self.signer.sign_digest_bytes(&digest).unwrap().to_vec()
    }

    /// Signed add-liquidity of `value` asset against `native` currency.
    pub fn add_liquidity(
        &self,
        caller: Address,
        native: u64,
        value: u64,
        nonce_hash: Hash,
        refund: &[u8],
    ) -> Result<LiquidityAdded, AdapterError> {
        let payload = ReservePayload {
            min_liquidity: U256::one(),
            refund: ForeignAddress::new(refund),
            deadline: U256::from(DEADLINE),
        };
        let sig = self.sign(
            &self.pair.reserve,
            U256::from(value),
            &nonce_hash,
            &payload.commitment(PayloadVersion::V1),
        );
        self.reserve().add_liquidity(
            Call::new(caller).with_value(native),
            payload.min_liquidity,
            refund,
            payload.deadline,
            U256::from(value),
            nonce_hash,
            &sig,
        )
    }

    /// Signed sell of `value` asset, submitted by `caller` for `beneficiary`.
    pub fn sell(
        &self,
        caller: Address,
        beneficiary: Address,
        relay_fee: u64,
        min_native_out: U256,
        value: u64,
        nonce_hash: Hash,
    ) -> Result<AssetSold, AdapterError> {
        let payload = SellPayload {
            relay_fee: U256::from(relay_fee),
            beneficiary,
            min_native_out,
            refund: ForeignAddress::new(vec![0x11]),
            deadline: U256::from(DEADLINE),
        };
        let sig = self.sign(
            &self.pair.exchange,
            U256::from(value),
            &nonce_hash,
            &payload.commitment(PayloadVersion::V1),
        );
        self.exchange().sell(
            Call::new(caller),
            payload.relay_fee,
            beneficiary,
            min_native_out,
            payload.refund.as_bytes(),
            payload.deadline,
            U256::from(value),
            nonce_hash,
            &sig,
        )
    }
}
