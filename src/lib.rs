//! walletgen - 确定性多链钱包派生核心
//!
//! 助记词只在内存中存在：不落盘、不加密存储、不签名交易

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

// 重新导出常用类型
pub use error::{WalletError, WalletResult};

pub mod prelude {
    pub use crate::{
        domain::{Chain, MnemonicPhrase, RegistrySnapshot, Wallet, WalletRegistry, WordCount},
        error::{WalletError, WalletResult},
        infrastructure::cache::{InMemoryWalletCache, WalletCache},
    };
}
