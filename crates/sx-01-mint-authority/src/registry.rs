//! # Authority Registry
//!
//! Maps each bridged asset to its mint authority. Entries are written once,
//! by the registry owner, and never replaced.

use crate::authority::MintAuthority;
use crate::domain::errors::AuthorityError;
use shared_types::{address_hex, Address};
use std::collections::BTreeMap;
use sx_telemetry::log_event;

#[derive(Clone, Debug)]
pub struct AuthorityRegistry {
    owner: Address,
    authorities: BTreeMap<Address, MintAuthority>,
    by_symbol: BTreeMap<String, Address>,
}

impl AuthorityRegistry {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            authorities: BTreeMap::new(),
            by_symbol: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Register `authority` under its asset and symbol.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the owner
    /// - `AlreadyRegistered` if the asset or the symbol is taken
    pub fn register(
        &mut self,
        caller: &Address,
        authority: MintAuthority,
    ) -> Result<(), AuthorityError> {
        if *caller != self.owner {
            return Err(AuthorityError::Unauthorized { caller: *caller });
        }

        let asset = authority.asset();
        if self.authorities.contains_key(&asset) || self.by_symbol.contains_key(authority.symbol())
        {
            return Err(AuthorityError::AlreadyRegistered(asset));
        }

        log_event!(
            info,
            "registry",
            "Registered mint authority",
            asset = %address_hex(&asset),
            symbol = %authority.symbol()
        );

        self.by_symbol.insert(authority.symbol().to_string(), asset);
        self.authorities.insert(asset, authority);
        Ok(())
    }

    pub fn lookup(&self, asset: &Address) -> Result<&MintAuthority, AuthorityError> {
        self.authorities
            .get(asset)
            .ok_or(AuthorityError::UnknownAsset(*asset))
    }

    pub fn lookup_mut(&mut self, asset: &Address) -> Result<&mut MintAuthority, AuthorityError> {
        self.authorities
            .get_mut(asset)
            .ok_or(AuthorityError::UnknownAsset(*asset))
    }

    /// Lookup by ticker, e.g. `zBTC`.
    pub fn lookup_by_symbol(&self, symbol: &str) -> Option<&MintAuthority> {
        self.by_symbol
            .get(symbol)
            .and_then(|asset| self.authorities.get(asset))
    }

    pub fn assets(&self) -> impl Iterator<Item = &Address> {
        self.authorities.keys()
    }
}
