//! 统一错误类型
//!
//! 领域层内部使用 anyhow 携带上下文，对外边界统一收敛为 [`WalletError`]

use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error)]
pub enum WalletError {
    /// 助记词无效（未知单词、校验和错误等）
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// 助记词单词数量不符合 BIP39
    #[error("invalid word count: {0}, expected 12, 15, 18, 21 or 24")]
    InvalidWordCount(usize),

    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),

    /// 密钥派生失败（正常输入下不会发生）
    #[error("key derivation failed: {0:#}")]
    Derivation(anyhow::Error),

    #[error("configuration error: {0:#}")]
    Config(anyhow::Error),
}

impl WalletError {
    /// 稳定的错误码，供调用方（UI 绑定层）做分支判断
    pub fn error_code(&self) -> &'static str {
        match self {
            WalletError::InvalidMnemonic(_) => "invalid_mnemonic",
            WalletError::InvalidWordCount(_) => "invalid_word_count",
            WalletError::UnsupportedChain(_) => "chain_not_supported",
            WalletError::Derivation(_) => "derivation_failed",
            WalletError::Config(_) => "config_error",
        }
    }
}
