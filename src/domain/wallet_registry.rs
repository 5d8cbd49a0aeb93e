//! 钱包注册表
//!
//! 持有当前助记词会话、每条链的钱包列表和派生计数器，
//! 负责把 add / delete / clear 同步到内存列表与缓存。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    chain_config::{Chain, PerChain},
    derivation::Wallet,
    mnemonic::MnemonicPhrase,
    seed::{derive_seed, Seed, SeedFingerprint},
};
use crate::error::{WalletError, WalletResult};
use crate::infrastructure::{
    cache::WalletCache,
    log_redact::{redact_address, SensitiveRedact},
};

/// 当前助记词会话
struct Session {
    mnemonic: MnemonicPhrase,
    seed: Seed,
    fingerprint: SeedFingerprint,
}

/// 计数器变更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterUpdate {
    /// 从缓存恢复：计数 = 列表长度
    Hydrate(usize),
    Increment,
    /// 删除后无条件减一（即使没有匹配项），最小为 0
    Decrement,
    Reset,
}

/// 计数器的唯一修改入口
fn apply_counter_update(count: &mut u32, update: CounterUpdate) {
    *count = match update {
        CounterUpdate::Hydrate(len) => u32::try_from(len).unwrap_or(u32::MAX),
        CounterUpdate::Increment => count.saturating_add(1),
        CounterUpdate::Decrement => count.saturating_sub(1),
        CounterUpdate::Reset => 0,
    };
}

/// 注册表状态快照（供 UI 绑定层渲染）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    pub current_mnemonic: Option<String>,
    pub wallets: PerChain<Vec<Wallet>>,
    pub wallet_counts: PerChain<u32>,
}

pub struct WalletRegistry {
    cache: Arc<dyn WalletCache>,
    session: Option<Session>,
    wallets: PerChain<Vec<Wallet>>,
    counts: PerChain<u32>,
}

impl WalletRegistry {
    pub fn new(cache: Arc<dyn WalletCache>) -> Self {
        Self {
            cache,
            session: None,
            wallets: PerChain::default(),
            counts: PerChain::default(),
        }
    }

    /// 切换助记词：派生种子并从缓存恢复两条链的列表
    pub fn set_mnemonic(&mut self, mnemonic: MnemonicPhrase) {
        let seed = derive_seed(&mnemonic);
        let fingerprint = seed.fingerprint();

        for chain in Chain::ALL {
            let cached = self.cache.get(&fingerprint, chain).unwrap_or_default();
            apply_counter_update(self.counts.get_mut(chain), CounterUpdate::Hydrate(cached.len()));
            *self.wallets.get_mut(chain) = cached;
        }

        tracing::info!(
            words = mnemonic.word_count(),
            solana_wallets = self.counts.solana,
            eth_wallets = self.counts.eth,
            "mnemonic session switched"
        );

        self.session = Some(Session {
            mnemonic,
            seed,
            fingerprint,
        });
    }

    /// 解析字符串后调用 [`Self::set_mnemonic`]；解析失败时状态不变
    pub fn set_mnemonic_phrase(&mut self, phrase: &str) -> WalletResult<()> {
        let mnemonic = MnemonicPhrase::parse(phrase)?;
        self.set_mnemonic(mnemonic);
        Ok(())
    }

    /// 在下一个索引派生新钱包并追加
    pub fn add_wallet(&mut self, chain: Chain) -> WalletResult<()> {
        let Some(session) = self.session.as_ref() else {
            tracing::debug!(%chain, "add_wallet ignored: no active mnemonic");
            return Ok(());
        };

        let index = *self.counts.get(chain);
        let wallet = chain
            .derive(&session.seed, index)
            .map_err(WalletError::Derivation)?;

        tracing::debug!(
            %chain,
            index,
            wallet = %wallet.redact(),
            "wallet added"
        );

        let list = self.wallets.get_mut(chain);
        list.push(wallet);
        self.cache
            .put(session.fingerprint.clone(), chain, list.clone());
        apply_counter_update(self.counts.get_mut(chain), CounterUpdate::Increment);
        Ok(())
    }

    /// 删除所有公钥匹配的钱包（保持顺序），计数器无条件减一
    pub fn delete_wallet(&mut self, chain: Chain, public_key: &str) {
        let Some(session) = self.session.as_ref() else {
            tracing::debug!(%chain, "delete_wallet ignored: no active mnemonic");
            return;
        };

        let list = self.wallets.get_mut(chain);
        let before = list.len();
        list.retain(|w| w.public_key != public_key);

        tracing::debug!(
            %chain,
            address = %redact_address(public_key),
            removed = before - list.len(),
            "wallet deleted"
        );

        self.cache
            .put(session.fingerprint.clone(), chain, list.clone());
        apply_counter_update(self.counts.get_mut(chain), CounterUpdate::Decrement);
    }

    pub fn clear_all_wallets(&mut self, chain: Chain) {
        let Some(session) = self.session.as_ref() else {
            tracing::debug!(%chain, "clear_all_wallets ignored: no active mnemonic");
            return;
        };

        self.wallets.get_mut(chain).clear();
        self.cache
            .put(session.fingerprint.clone(), chain, Vec::new());
        apply_counter_update(self.counts.get_mut(chain), CounterUpdate::Reset);
        tracing::debug!(%chain, "wallets cleared");
    }

    pub fn current_mnemonic(&self) -> Option<&MnemonicPhrase> {
        self.session.as_ref().map(|s| &s.mnemonic)
    }

    pub fn wallets(&self, chain: Chain) -> &[Wallet] {
        self.wallets.get(chain)
    }

    /// 下一个派生索引
    pub fn wallet_count(&self, chain: Chain) -> u32 {
        *self.counts.get(chain)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            current_mnemonic: self.current_mnemonic().map(|m| m.phrase().to_string()),
            wallets: self.wallets.clone(),
            wallet_counts: self.counts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::InMemoryWalletCache;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const OTHER_MNEMONIC: &str =
        "legal winner thank year wave sausage worth useful legal winner thank yellow";

    fn registry_with(phrase: &str) -> WalletRegistry {
        let mut registry = WalletRegistry::new(InMemoryWalletCache::shared());
        registry.set_mnemonic_phrase(phrase).unwrap();
        registry
    }

    fn public_keys(registry: &WalletRegistry, chain: Chain) -> Vec<String> {
        registry
            .wallets(chain)
            .iter()
            .map(|w| w.public_key.clone())
            .collect()
    }

    #[test]
    fn test_counter_updates() {
        let mut count = 0;
        apply_counter_update(&mut count, CounterUpdate::Decrement);
        assert_eq!(count, 0);
        apply_counter_update(&mut count, CounterUpdate::Increment);
        apply_counter_update(&mut count, CounterUpdate::Increment);
        assert_eq!(count, 2);
        apply_counter_update(&mut count, CounterUpdate::Decrement);
        assert_eq!(count, 1);
        apply_counter_update(&mut count, CounterUpdate::Hydrate(7));
        assert_eq!(count, 7);
        apply_counter_update(&mut count, CounterUpdate::Reset);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_no_session_guard() {
        let mut registry = WalletRegistry::new(InMemoryWalletCache::shared());
        registry.add_wallet(Chain::Eth).unwrap();
        registry.delete_wallet(Chain::Solana, "anything");
        registry.clear_all_wallets(Chain::Eth);

        assert!(registry.current_mnemonic().is_none());
        for chain in Chain::ALL {
            assert!(registry.wallets(chain).is_empty());
            assert_eq!(registry.wallet_count(chain), 0);
        }
    }

    #[test]
    fn test_invalid_phrase_leaves_state_untouched() {
        let mut registry = registry_with(TEST_MNEMONIC);
        registry.add_wallet(Chain::Eth).unwrap();

        let err = registry.set_mnemonic_phrase("abandon about").unwrap_err();
        assert_eq!(err.error_code(), "invalid_word_count");
        assert_eq!(registry.current_mnemonic().unwrap().phrase(), TEST_MNEMONIC);
        assert_eq!(registry.wallet_count(Chain::Eth), 1);
    }

    #[test]
    fn test_add_uses_sequential_indices() {
        let mut registry = registry_with(TEST_MNEMONIC);
        for _ in 0..3 {
            registry.add_wallet(Chain::Eth).unwrap();
        }
        assert_eq!(registry.wallet_count(Chain::Eth), 3);

        let seed = derive_seed(registry.current_mnemonic().unwrap());
        for (i, wallet) in registry.wallets(Chain::Eth).iter().enumerate() {
            assert_eq!(wallet, &Chain::Eth.derive(&seed, i as u32).unwrap());
        }
        assert_eq!(
            registry.wallets(Chain::Eth)[0].public_key,
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );
    }

    #[test]
    fn test_solana_uses_sequential_indices() {
        let mut registry = registry_with(TEST_MNEMONIC);
        for _ in 0..4 {
            registry.add_wallet(Chain::Solana).unwrap();
        }
        assert_eq!(registry.wallet_count(Chain::Solana), 4);

        let seed = derive_seed(registry.current_mnemonic().unwrap());
        for (i, wallet) in registry.wallets(Chain::Solana).iter().enumerate() {
            assert_eq!(wallet, &Chain::Solana.derive(&seed, i as u32).unwrap());
        }
    }

    #[test]
    fn test_cache_entries_isolated_by_chain() {
        let cache = InMemoryWalletCache::shared();
        let mut registry = WalletRegistry::new(Arc::clone(&cache));
        registry.set_mnemonic_phrase(TEST_MNEMONIC).unwrap();
        let fingerprint = derive_seed(registry.current_mnemonic().unwrap()).fingerprint();

        registry.add_wallet(Chain::Solana).unwrap();
        registry.add_wallet(Chain::Solana).unwrap();
        let solana_entry = cache.get(&fingerprint, Chain::Solana);
        assert_eq!(solana_entry.as_deref(), Some(registry.wallets(Chain::Solana)));
        assert!(cache.get(&fingerprint, Chain::Eth).is_none());

        // ETH 的 add / delete / clear 不触碰 SOLANA 的缓存项
        registry.add_wallet(Chain::Eth).unwrap();
        let eth_key = registry.wallets(Chain::Eth)[0].public_key.clone();
        registry.delete_wallet(Chain::Eth, &eth_key);
        registry.add_wallet(Chain::Eth).unwrap();
        registry.clear_all_wallets(Chain::Eth);

        assert_eq!(cache.get(&fingerprint, Chain::Solana), solana_entry);
        assert_eq!(cache.get(&fingerprint, Chain::Eth), Some(Vec::new()));
        assert_eq!(registry.wallet_count(Chain::Solana), 2);

        // 反向：SOLANA 的变更不影响 ETH 缓存项
        registry.add_wallet(Chain::Eth).unwrap();
        let eth_entry = cache.get(&fingerprint, Chain::Eth);
        registry.clear_all_wallets(Chain::Solana);
        assert_eq!(cache.get(&fingerprint, Chain::Eth), eth_entry);
        assert_eq!(cache.get(&fingerprint, Chain::Solana), Some(Vec::new()));
    }

    #[test]
    fn test_chain_isolation() {
        let mut registry = registry_with(TEST_MNEMONIC);
        registry.add_wallet(Chain::Solana).unwrap();
        registry.add_wallet(Chain::Solana).unwrap();

        assert_eq!(registry.wallet_count(Chain::Solana), 2);
        assert_eq!(registry.wallet_count(Chain::Eth), 0);
        assert!(registry.wallets(Chain::Eth).is_empty());

        registry.clear_all_wallets(Chain::Eth);
        assert_eq!(registry.wallets(Chain::Solana).len(), 2);
    }

    #[test]
    fn test_cache_round_trip_on_mnemonic_switch() {
        let cache = InMemoryWalletCache::shared();
        let mut registry = WalletRegistry::new(Arc::clone(&cache));
        registry.set_mnemonic_phrase(TEST_MNEMONIC).unwrap();
        registry.add_wallet(Chain::Solana).unwrap();
        registry.add_wallet(Chain::Eth).unwrap();
        registry.add_wallet(Chain::Eth).unwrap();
        let before = registry.snapshot();

        registry.set_mnemonic_phrase(OTHER_MNEMONIC).unwrap();
        assert!(registry.wallets(Chain::Eth).is_empty());
        assert_eq!(registry.wallet_count(Chain::Solana), 0);
        registry.add_wallet(Chain::Eth).unwrap();
        assert_ne!(
            registry.wallets(Chain::Eth)[0].public_key,
            before.wallets.eth[0].public_key
        );

        registry.set_mnemonic_phrase(TEST_MNEMONIC).unwrap();
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_registries_share_cache() {
        let cache = InMemoryWalletCache::shared();
        let mut first = WalletRegistry::new(Arc::clone(&cache));
        first.set_mnemonic_phrase(TEST_MNEMONIC).unwrap();
        first.add_wallet(Chain::Solana).unwrap();

        let mut second = WalletRegistry::new(cache);
        second.set_mnemonic_phrase(TEST_MNEMONIC).unwrap();
        assert_eq!(second.wallets(Chain::Solana), first.wallets(Chain::Solana));
        assert_eq!(second.wallet_count(Chain::Solana), 1);
    }

    #[test]
    fn test_delete_removes_all_matches_and_preserves_order() {
        let mut registry = registry_with(TEST_MNEMONIC);
        for _ in 0..3 {
            registry.add_wallet(Chain::Solana).unwrap();
        }
        let keys = public_keys(&registry, Chain::Solana);

        registry.delete_wallet(Chain::Solana, &keys[1]);
        assert_eq!(
            public_keys(&registry, Chain::Solana),
            vec![keys[0].clone(), keys[2].clone()]
        );
        assert_eq!(registry.wallet_count(Chain::Solana), 2);
    }

    #[test]
    fn test_delete_not_found_still_decrements() {
        let mut registry = registry_with(TEST_MNEMONIC);
        registry.add_wallet(Chain::Eth).unwrap();
        registry.add_wallet(Chain::Eth).unwrap();

        registry.delete_wallet(Chain::Eth, "0x0000000000000000000000000000000000000000");
        assert_eq!(registry.wallets(Chain::Eth).len(), 2);
        assert_eq!(registry.wallet_count(Chain::Eth), 1);

        // 计数器漂移：下一次派生重用索引 1
        registry.add_wallet(Chain::Eth).unwrap();
        let keys = public_keys(&registry, Chain::Eth);
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[1], keys[2]);
        assert_eq!(registry.wallet_count(Chain::Eth), 2);
    }

    #[test]
    fn test_delete_on_empty_list_saturates_at_zero() {
        let mut registry = registry_with(TEST_MNEMONIC);
        registry.delete_wallet(Chain::Solana, "missing");
        assert_eq!(registry.wallet_count(Chain::Solana), 0);
        registry.add_wallet(Chain::Solana).unwrap();
        assert_eq!(
            registry.wallets(Chain::Solana)[0].public_key,
            "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"
        );
    }

    #[test]
    fn test_clear_is_idempotent_and_persisted() {
        let cache = InMemoryWalletCache::shared();
        let mut registry = WalletRegistry::new(Arc::clone(&cache));
        registry.set_mnemonic_phrase(TEST_MNEMONIC).unwrap();
        registry.add_wallet(Chain::Eth).unwrap();

        registry.clear_all_wallets(Chain::Eth);
        registry.clear_all_wallets(Chain::Eth);
        assert!(registry.wallets(Chain::Eth).is_empty());
        assert_eq!(registry.wallet_count(Chain::Eth), 0);

        let fingerprint = derive_seed(registry.current_mnemonic().unwrap()).fingerprint();
        assert_eq!(cache.get(&fingerprint, Chain::Eth), Some(Vec::new()));

        registry.add_wallet(Chain::Eth).unwrap();
        assert_eq!(
            registry.wallets(Chain::Eth)[0].public_key,
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut registry = registry_with(TEST_MNEMONIC);
        registry.add_wallet(Chain::Solana).unwrap();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["currentMnemonic"], TEST_MNEMONIC);
        assert_eq!(
            json["wallets"]["SOLANA"][0]["publicKey"],
            "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"
        );
        assert_eq!(json["wallets"]["ETH"].as_array().unwrap().len(), 0);
        assert_eq!(json["walletCounts"]["SOLANA"], 1);
        assert_eq!(json["walletCounts"]["ETH"], 0);
    }

    #[test]
    fn test_empty_snapshot() {
        let registry = WalletRegistry::new(InMemoryWalletCache::shared());
        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert!(json["currentMnemonic"].is_null());
    }
}
