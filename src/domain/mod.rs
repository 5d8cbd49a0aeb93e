//! Domain 模块
//!
//! 助记词 → 种子 → 按链派生钱包，以及按会话管理钱包列表的注册表

pub mod chain_config;
pub mod derivation;
pub mod mnemonic;
pub mod seed;
pub mod wallet_registry;

// 重新导出常用类型
pub use chain_config::{AddressFormat, Chain, CurveType, DerivationStandard, PerChain};
pub use derivation::{
    derive_ethereum_wallet, derive_solana_wallet, DerivationStrategy, DerivationStrategyFactory,
    Ed25519Strategy, Secp256k1Strategy, Wallet,
};
pub use mnemonic::{MnemonicPhrase, WordCount};
pub use seed::{derive_seed, Seed, SeedFingerprint};
pub use wallet_registry::{RegistrySnapshot, WalletRegistry};
