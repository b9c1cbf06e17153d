//! # Scenario Fixtures
//!
//! A host with one registered asset (`zBTC`), a reference pool, the adapter
//! pair and a custodian key. Liquidity is 200,000,000,000,000 units, trades
//! are 50,000 units and the relay fee is 1,000 units.

use shared_types::{keccak256, Address, ForeignAddress, Hash, U256};
use sx_01_mint_authority::{AuthorityConfig, DevSigner, MintAuthority};
use sx_02_amm_adapters::{
    derive_address, AdapterError, AdapterPair, AssetBought, AssetSold, Call, GenesisAllocation,
    Host, HostConfig, LiquidityAdded, LiquidityRemoved, PayloadVersion, PoolConfig,
    ReferencePool, ReservePayload, SellPayload, POOL_TAG,
};

pub const ADMIN: Address = [0xAD; 20];
pub const AUTHORITY: Address = [0xA0; 20];
pub const ASSET: Address = [0xB7; 20];
pub const FEES: Address = [0xFE; 20];
pub const PROVIDER: Address = [0x01; 20];
pub const TRADER: Address = [0x02; 20];
pub const RELAYER: Address = [0x03; 20];

pub const START: u64 = 1_700_000_000;
pub const DEADLINE: u64 = 100_000_000_000;
pub const AMOUNT: u64 = 200_000_000_000_000;
pub const TRADE: u64 = 50_000;
pub const RELAY_FEE: u64 = 1_000;
pub const FUNDING: u64 = 1_000_000_000_000_000_000;
pub const FOREIGN: &[u8] = &[0x11];

pub fn nonce(tag: u64) -> Hash {
    keccak256(&tag.to_be_bytes())
}

pub fn deadline() -> U256 {
    U256::from(DEADLINE)
}

/// One-asset world with a deterministic custodian.
pub struct Scenario {
    pub host: Host,
    pub custodian: DevSigner,
    pub pair: AdapterPair,
}

impl Scenario {
    pub fn new() -> Self {
        Self::with_fees(0, 0)
    }

    pub fn with_fees(mint_fee_bps: u16, burn_fee_bps: u16) -> Self {
        let custodian = DevSigner::from_secret(&[0x5A; 32]).expect("valid secret");
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
                initial_timestamp: START,
                genesis,
            },
        )
        .expect("host");

        let authority = MintAuthority::new(
            AUTHORITY,
            ASSET,
            AuthorityConfig {
                symbol: "zBTC".into(),
                signer: custodian.address(),
                fee_recipient: FEES,
                mint_fee_bps,
                burn_fee_bps,
            },
        )
        .expect("authority");
        host.register_authority(&ADMIN, authority)
            .expect("register");

        let pool = ReferencePool::new(derive_address(POOL_TAG, &ASSET), PoolConfig::default());
        let pair = host.create_exchange(ASSET, pool).expect("exchange");

        Self {
            host,
            custodian,
            pair,
        }
    }

    /// Scenario with the provider's 200e12 / 200e12 deposit already made.
    pub fn seeded() -> Self {
        let scenario = Self::new();
        scenario
            .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(0))
            .expect("seed liquidity");
        scenario
    }

    pub fn sign(&self, beneficiary: &Address, value: U256, nonce_hash: &Hash, payload_hash: &Hash) -> Vec<u8> {
        let digest = self
            .host
            .hash_for_signature(&ASSET, beneficiary, value, nonce_hash, payload_hash)
            .expect("digest");
        self.custodian
            .sign_digest_bytes(&digest)
            .expect("signature")
            .to_vec()
    }

    pub fn reserve_payload(&self) -> ReservePayload {
        ReservePayload {
            min_liquidity: U256::one(),
            refund: ForeignAddress::default(),
            deadline: deadline(),
        }
    }

    pub fn sell_payload(&self, beneficiary: Address, relay_fee: u64, min_native_out: U256) -> SellPayload {
        SellPayload {
            relay_fee: U256::from(relay_fee),
            beneficiary,
            min_native_out,
            refund: ForeignAddress::new(FOREIGN),
            deadline: deadline(),
        }
    }

    /// Signed add-liquidity with an empty refund address.
    pub fn add_liquidity(
        &self,
        caller: Address,
        native: u64,
        value: u64,
        nonce_hash: Hash,
    ) -> Result<LiquidityAdded, AdapterError> {
        let payload = self.reserve_payload();
        let sig = self.sign(
            &self.pair.reserve,
            U256::from(value),
            &nonce_hash,
            &payload.commitment(PayloadVersion::V1),
        );
        self.submit_add(caller, native, value, nonce_hash, &payload, &sig)
    }

    /// Submit an add-liquidity with an arbitrary payload and signature.
    pub fn submit_add(
        &self,
        caller: Address,
        native: u64,
        value: u64,
        nonce_hash: Hash,
        payload: &ReservePayload,
        sig: &[u8],
    ) -> Result<LiquidityAdded, AdapterError> {
        self.host.reserve_adapter(&ASSET)?.add_liquidity(
            Call::new(caller).with_value(native),
            payload.min_liquidity,
            payload.refund.as_bytes(),
            payload.deadline,
            U256::from(value),
            nonce_hash,
            sig,
        )
    }

    /// Approve and withdraw `shares` held by `provider`.
    pub fn remove_liquidity(
        &self,
        provider: Address,
        shares: U256,
        min_native: U256,
        min_asset: U256,
    ) -> Result<LiquidityRemoved, AdapterError> {
        self.host
            .approve_shares(&ASSET, &provider, &self.pair.reserve, shares)?;
        self.host.reserve_adapter(&ASSET)?.remove_liquidity(
            Call::new(provider),
            shares,
            min_asset,
            min_native,
            FOREIGN,
            deadline(),
        )
    }

    pub fn buy(&self, caller: Address, native: u64, min_asset_out: U256) -> Result<AssetBought, AdapterError> {
        self.host.exchange_adapter(&ASSET)?.buy(
            Call::new(caller).with_value(native),
            FOREIGN,
            min_asset_out,
            deadline(),
        )
    }

    /// Signed sell of `value`, submitted by `caller`.
    pub fn sell(
        &self,
        caller: Address,
        payload: &SellPayload,
        value: u64,
        nonce_hash: Hash,
    ) -> Result<AssetSold, AdapterError> {
        let sig = self.sign(
            &self.pair.exchange,
            U256::from(value),
            &nonce_hash,
            &payload.commitment(PayloadVersion::V1),
        );
        self.submit_sell(caller, payload, value, nonce_hash, &sig)
    }

    pub fn submit_sell(
        &self,
        caller: Address,
        payload: &SellPayload,
        value: u64,
        nonce_hash: Hash,
        sig: &[u8],
    ) -> Result<AssetSold, AdapterError> {
        self.host.exchange_adapter(&ASSET)?.sell(
            Call::new(caller),
            payload.relay_fee,
            payload.beneficiary,
            payload.min_native_out,
            payload.refund.as_bytes(),
            payload.deadline,
            U256::from(value),
            nonce_hash,
            sig,
        )
    }

    pub fn supply(&self) -> U256 {
        self.host.asset_supply(&ASSET).expect("registered asset")
    }

    pub fn native(&self, holder: &Address) -> U256 {
        self.host.native_balance(holder)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}
