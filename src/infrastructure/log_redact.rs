//! 日志脱敏
//!
//! 私钥、助记词、种子永远不进入日志；地址只显示首尾

use serde::Serialize;

use crate::domain::{MnemonicPhrase, Wallet};

/// 可脱敏trait
pub trait SensitiveRedact {
    fn redact(&self) -> String;
}

/// 脱敏地址（显示前6位和后4位）
pub fn redact_address(address: &str) -> String {
    if !address.is_ascii() || address.len() < 10 {
        return "*".repeat(address.chars().count());
    }

    let prefix = &address[..6];
    let suffix = &address[address.len() - 4..];
    format!("{}...{}", prefix, suffix)
}

#[derive(Debug, Serialize)]
struct RedactedWallet {
    public_key: String,
    // ❌ 不包含：private_key
}

impl SensitiveRedact for Wallet {
    fn redact(&self) -> String {
        serde_json::to_string(&RedactedWallet {
            public_key: redact_address(&self.public_key),
        })
        .unwrap_or_else(|_| "{ redacted }".to_string())
    }
}

impl SensitiveRedact for MnemonicPhrase {
    fn redact(&self) -> String {
        format!("<{} words>", self.word_count())
    }
}
