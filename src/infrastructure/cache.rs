//! 钱包列表缓存：按 (种子指纹, 链) 存放已派生的钱包列表
//!
//! 进程内、无过期、无持久化。注册表通过 `Arc<dyn WalletCache>` 注入，
//! 多个注册表可以共享同一份缓存。

use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::{Chain, SeedFingerprint, Wallet};

/// 缓存 key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fingerprint: SeedFingerprint,
    pub chain: Chain,
}

impl CacheKey {
    pub fn new(fingerprint: SeedFingerprint, chain: Chain) -> Self {
        Self { fingerprint, chain }
    }
}

pub trait WalletCache: Send + Sync {
    /// 读取列表；从未写入过返回 None（与空列表区分）
    fn get(&self, fingerprint: &SeedFingerprint, chain: Chain) -> Option<Vec<Wallet>>;

    /// 整体覆盖写入
    fn put(&self, fingerprint: SeedFingerprint, chain: Chain, wallets: Vec<Wallet>);
}

/// 基于 DashMap 的内存实现
#[derive(Default)]
pub struct InMemoryWalletCache {
    entries: DashMap<CacheKey, Vec<Wallet>>,
}

impl InMemoryWalletCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<dyn WalletCache> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WalletCache for InMemoryWalletCache {
    fn get(&self, fingerprint: &SeedFingerprint, chain: Chain) -> Option<Vec<Wallet>> {
        let key = CacheKey::new(fingerprint.clone(), chain);
        self.entries.get(&key).map(|entry| entry.value().clone())
    }

    fn put(&self, fingerprint: SeedFingerprint, chain: Chain, wallets: Vec<Wallet>) {
        tracing::trace!(%chain, len = wallets.len(), "wallet cache put");
        self.entries.insert(CacheKey::new(fingerprint, chain), wallets);
    }
}
