//! BIP39 种子派生
//!
//! seed = PBKDF2-HMAC-SHA512(password = 助记词, salt = "mnemonic" + passphrase, 2048 轮)
//! passphrase 固定为空

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::mnemonic::MnemonicPhrase;

pub const SEED_LENGTH: usize = 64;

/// 64 字节 BIP39 种子，drop 时清零
#[derive(Clone)]
pub struct Seed(Zeroizing<[u8; SEED_LENGTH]>);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }

    /// 种子的十六进制指纹，仅用作缓存 key
    pub fn fingerprint(&self) -> SeedFingerprint {
        SeedFingerprint(hex::encode(self.0.as_slice()))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

impl From<[u8; SEED_LENGTH]> for Seed {
    fn from(bytes: [u8; SEED_LENGTH]) -> Self {
        Seed(Zeroizing::new(bytes))
    }
}

/// 缓存 key：种子的小写 hex 编码
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeedFingerprint(String);

impl SeedFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeedFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 从已校验的助记词派生种子（纯函数，无错误路径）
pub fn derive_seed(mnemonic: &MnemonicPhrase) -> Seed {
    Seed(mnemonic.to_seed())
}
