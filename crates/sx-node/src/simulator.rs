//! # Simulator
//!
//! Wires one bridged asset, its mint authority, a reference pool and the
//! adapter pair into a host, then plays the demonstration sequence:
//!
//! ```text
//! add_liquidity (mint + deposit) → buy (swap + burn) → sell (mint + swap, relayed)
//!     → remove_liquidity (withdraw + burn)
//! ```

use crate::config::{SimulatorConfig, PROVIDER, RELAYER, TRADER};
use anyhow::{ensure, Context, Result};
use shared_types::{address_hex, keccak256, Address, ForeignAddress, Hash, U256};
use sx_01_mint_authority::{AuthorityConfig, DevSigner, MintAuthority};
use sx_02_amm_adapters::{
    derive_address, AdapterPair, AssetBought, AssetSold, Call, Host, LedgerEvent,
    LiquidityAdded, LiquidityRemoved, PayloadVersion, ReferencePool, ReservePayload,
    SellPayload, POOL_TAG,
};
use tracing::info;

/// Foreign address receiving bought and withdrawn asset in the demonstration.
const FOREIGN_RECIPIENT: &[u8] = &[0x11; 20];

/// Results of one demonstration run.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub added: LiquidityAdded,
    pub bought: AssetBought,
    pub sold: AssetSold,
    pub removed: LiquidityRemoved,
}

pub struct Simulator {
    host: Host,
    custodian: DevSigner,
    asset: Address,
    pair: AdapterPair,
    config: SimulatorConfig,
    next_nonce: u64,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        let custodian = match &config.asset.custodian_secret {
            Some(secret) => {
                let bytes = hex::decode(secret.trim_start_matches("0x"))
                    .context("custodian secret is not hex")?;
                let secret: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| anyhow::anyhow!("custodian secret must be 32 bytes"))?;
                DevSigner::from_secret(&secret)?
            }
            None => DevSigner::random(),
        };

        let host = Host::new(config.registry_owner, config.host.clone())?;
        let authority = MintAuthority::new(
            config.asset.authority,
            config.asset.asset,
            AuthorityConfig {
                symbol: config.asset.symbol.clone(),
                signer: custodian.address(),
                fee_recipient: config.asset.fee_recipient,
                mint_fee_bps: config.asset.mint_fee_bps,
                burn_fee_bps: config.asset.burn_fee_bps,
            },
        )?;
        host.register_authority(&config.registry_owner, authority)?;

        let asset = config.asset.asset;
        let pool = ReferencePool::new(derive_address(POOL_TAG, &asset), config.pool.clone());
        let pair = host.create_exchange(asset, pool)?;

        info!(
            symbol = %config.asset.symbol,
            asset = %address_hex(&asset),
            custodian = %address_hex(&custodian.address()),
            reserve = %address_hex(&pair.reserve),
            exchange = %address_hex(&pair.exchange),
            "Simulator ready"
        );

        Ok(Self {
            host,
            custodian,
            asset,
            pair,
            config,
            next_nonce: 0,
        })
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn asset(&self) -> Address {
        self.asset
    }

    /// Play the full sequence. Any failed step aborts the run.
    pub fn run(&mut self) -> Result<DemoReport> {
        let added = self.add_liquidity().context("add liquidity")?;
        let bought = self.buy().context("buy")?;
        let sold = self.sell().context("sell")?;
        let removed = self.remove_liquidity().context("remove liquidity")?;

        Ok(DemoReport {
            added,
            bought,
            sold,
            removed,
        })
    }

    /// Log balances of every demonstration actor.
    pub fn log_balances(&self) -> Result<()> {
        for (name, holder) in [
            ("provider", PROVIDER),
            ("trader", TRADER),
            ("relayer", RELAYER),
            ("fees", self.config.asset.fee_recipient),
        ] {
            info!(
                actor = name,
                address = %address_hex(&holder),
                native = %self.host.native_balance(&holder),
                asset = %self.host.asset_balance(&self.asset, &holder)?,
                "Balance"
            );
        }
        info!(
            supply = %self.host.asset_supply(&self.asset)?,
            shares = %self.host.total_shares(&self.asset)?,
            "Asset totals"
        );
        Ok(())
    }

    /// Log the committed event log as JSON lines.
    pub fn log_events(&self) -> Result<()> {
        for event in self.host.events() {
            info!(event = %serde_json::to_string(&event)?, "Ledger event");
        }
        Ok(())
    }

    pub fn events(&self) -> Vec<LedgerEvent> {
        self.host.events()
    }

    fn deadline(&self) -> U256 {
        U256::from(self.host.now() + self.config.demo.deadline_offset)
    }

    fn nonce(&mut self) -> Hash {
        self.next_nonce += 1;
        keccak256(&self.next_nonce.to_be_bytes())
    }

    /// Custodian signature over a mint to `beneficiary`.
    fn authorize(
        &self,
        beneficiary: &Address,
        value: U256,
        nonce_hash: &Hash,
        payload_hash: &Hash,
    ) -> Result<Vec<u8>> {
        let digest =
            self.host
                .hash_for_signature(&self.asset, beneficiary, value, nonce_hash, payload_hash)?;
        Ok(self.custodian.sign_digest_bytes(&digest)?.to_vec())
    }

    fn add_liquidity(&mut self) -> Result<LiquidityAdded> {
        let liquidity = self.config.demo.liquidity;
        let payload = ReservePayload {
            min_liquidity: U256::one(),
            refund: ForeignAddress::default(),
            deadline: self.deadline(),
        };
        let nonce_hash = self.nonce();
        let sig = self.authorize(
            &self.pair.reserve,
            liquidity,
            &nonce_hash,
            &payload.commitment(PayloadVersion::V1),
        )?;

        let added = self.host.reserve_adapter(&self.asset)?.add_liquidity(
            Call::new(PROVIDER).with_value(liquidity),
            payload.min_liquidity,
            payload.refund.as_bytes(),
            payload.deadline,
            liquidity,
            nonce_hash,
            &sig,
        )?;
        info!(shares = %added.shares, asset_in = %added.asset_in, "Liquidity added");
        Ok(added)
    }

    fn buy(&mut self) -> Result<AssetBought> {
        let trade = self.config.demo.trade;
        let quote = self.host.quote_buy(&self.asset, trade)?;
        let bought = self.host.exchange_adapter(&self.asset)?.buy(
            Call::new(TRADER).with_value(trade),
            FOREIGN_RECIPIENT,
            quote,
            self.deadline(),
        )?;
        ensure!(bought.asset_out == quote, "buy returned {} not {quote}", bought.asset_out);
        info!(native_in = %bought.native_in, asset_out = %bought.asset_out, "Asset bought");
        Ok(bought)
    }

    fn sell(&mut self) -> Result<AssetSold> {
        let trade = self.config.demo.trade;
        let quote = self.host.quote_sell(&self.asset, trade)?;
        let payload = SellPayload {
            relay_fee: self.config.demo.relay_fee,
            beneficiary: TRADER,
            min_native_out: quote,
            refund: ForeignAddress::new(FOREIGN_RECIPIENT),
            deadline: self.deadline(),
        };
        let nonce_hash = self.nonce();
        let sig = self.authorize(
            &self.pair.exchange,
            trade,
            &nonce_hash,
            &payload.commitment(PayloadVersion::V1),
        )?;

        let sold = self.host.exchange_adapter(&self.asset)?.sell(
            Call::new(RELAYER),
            payload.relay_fee,
            payload.beneficiary,
            payload.min_native_out,
            payload.refund.as_bytes(),
            payload.deadline,
            trade,
            nonce_hash,
            &sig,
        )?;
        info!(
            asset_in = %sold.asset_in,
            native_out = %sold.native_out,
            relay_fee = %sold.relay_fee,
            "Asset sold"
        );
        Ok(sold)
    }

    fn remove_liquidity(&mut self) -> Result<LiquidityRemoved> {
        let shares = self.host.share_balance(&self.asset, &PROVIDER)?;
        self.host
            .approve_shares(&self.asset, &PROVIDER, &self.pair.reserve, shares)?;

        let removed = self.host.reserve_adapter(&self.asset)?.remove_liquidity(
            Call::new(PROVIDER),
            shares,
            U256::one(),
            U256::one(),
            FOREIGN_RECIPIENT,
            self.deadline(),
        )?;
        info!(
            shares = %removed.shares,
            native_out = %removed.native_out,
            asset_out = %removed.asset_out,
            "Liquidity removed"
        );
        Ok(removed)
    }
}
