//! 链配置模块
//!
//! 定义支持的区块链（Solana / Ethereum）及其曲线、地址格式与派生路径

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// 加密曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// secp256k1 曲线 (Ethereum)
    Secp256k1,
    /// ed25519 曲线 (Solana)
    Ed25519,
}

/// 地址编码格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    /// EIP-55 校验和十六进制 0x...
    Hex,
    /// Base58 编码的 32 字节公钥
    SolanaBase58,
}

/// HD 派生标准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivationStandard {
    /// BIP44: m/44'/coin_type'/account'/change/index
    BIP44,
    /// SLIP-0010: 适用于 ed25519，所有层级均为硬化派生
    SLIP0010,
}

/// 支持的链（封闭枚举，按 tag 分派派生策略）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chain {
    #[serde(rename = "SOLANA")]
    Solana,
    #[serde(rename = "ETH")]
    Eth,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Eth];

    /// 对外展示/序列化用的 tag
    pub fn tag(self) -> &'static str {
        match self {
            Chain::Solana => "SOLANA",
            Chain::Eth => "ETH",
        }
    }

    /// SLIP-44 coin type
    pub fn coin_type(self) -> u32 {
        match self {
            Chain::Solana => 501,
            Chain::Eth => 60,
        }
    }

    pub fn curve_type(self) -> CurveType {
        match self {
            Chain::Solana => CurveType::Ed25519,
            Chain::Eth => CurveType::Secp256k1,
        }
    }

    pub fn address_format(self) -> AddressFormat {
        match self {
            Chain::Solana => AddressFormat::SolanaBase58,
            Chain::Eth => AddressFormat::Hex,
        }
    }

    pub fn derivation_standard(self) -> DerivationStandard {
        match self {
            Chain::Solana => DerivationStandard::SLIP0010,
            Chain::Eth => DerivationStandard::BIP44,
        }
    }

    /// 生成第 `index` 个钱包的派生路径
    ///
    /// - Solana: `m/44'/501'/{index}'/0'`，index 位于账户层（第 3 段）
    /// - Ethereum: `m/44'/60'/{index}'/0/0`，每个账户取首个外部地址
    pub fn derivation_path(self, index: u32) -> String {
        match self.derivation_standard() {
            DerivationStandard::SLIP0010 => {
                format!("m/44'/{}'/{}'/0'", self.coin_type(), index)
            }
            DerivationStandard::BIP44 => {
                format!("m/44'/{}'/{}'/0/0", self.coin_type(), index)
            }
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Chain {
    type Err = WalletError;

    /// 接受 tag 以及常见别名（大小写不敏感）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" | "sol" => Ok(Chain::Solana),
            "eth" | "ethereum" => Ok(Chain::Eth),
            _ => Err(WalletError::UnsupportedChain(s.to_string())),
        }
    }
}

/// 每条链一份数据（替代以字符串为 key 的 map）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerChain<T> {
    #[serde(rename = "SOLANA")]
    pub solana: T,
    #[serde(rename = "ETH")]
    pub eth: T,
}

impl<T> PerChain<T> {
    pub fn get(&self, chain: Chain) -> &T {
        match chain {
            Chain::Solana => &self.solana,
            Chain::Eth => &self.eth,
        }
    }

    pub fn get_mut(&mut self, chain: Chain) -> &mut T {
        match chain {
            Chain::Solana => &mut self.solana,
            Chain::Eth => &mut self.eth,
        }
    }
}
