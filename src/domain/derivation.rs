//! 钱包派生策略
//!
//! 为不同的加密曲线提供统一的 `derive(seed, index) -> Wallet` 接口，
//! 由 [`Chain`] 封闭枚举通过 match 选择具体策略

use std::fmt;

use anyhow::{Context, Result};
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::domain::{chain_config::Chain, seed::Seed};
use crate::infrastructure::log_redact::redact_address;
use crate::utils::address_validator::AddressValidator;

type HmacSha512 = Hmac<Sha512>;

/// 硬化派生偏移 (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// 派生结果
///
/// - Solana: `public_key` 为 Base58 地址，`private_key` 为 64 字节 secret key 的 base64
/// - Ethereum: `public_key` 为 EIP-55 地址，`private_key` 为 32 字节私钥 hex
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub public_key: String,
    pub private_key: String,
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// 钱包派生策略 trait
pub trait DerivationStrategy: Send + Sync {
    /// 从种子派生第 `index` 个钱包（同一输入必然得到同一结果）
    fn derive_wallet(&self, seed: &Seed, index: u32) -> Result<Wallet>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Secp256k1 策略 (Ethereum)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct Secp256k1Strategy;

impl DerivationStrategy for Secp256k1Strategy {
    fn derive_wallet(&self, seed: &Seed, index: u32) -> Result<Wallet> {
        use coins_bip32::{path::DerivationPath, prelude::*};
        use k256::ecdsa::SigningKey;
        use sha3::{Digest, Keccak256};

        anyhow::ensure!(
            index < HARDENED_OFFSET,
            "Index {} exceeds hardened range",
            index
        );
        let path = Chain::Eth.derivation_path(index);
        let derivation_path = path
            .parse::<DerivationPath>()
            .with_context(|| format!("Invalid derivation path: {}", path))?;

        let master_key = XPriv::root_from_seed(seed.as_bytes(), None)
            .context("Failed to derive master key")?;

        let derived_key = master_key
            .derive_path(&derivation_path)
            .context("Failed to derive key")?;

        // XPriv 实现 AsRef<SigningKey>
        let signing_key: &SigningKey = derived_key.as_ref();
        let private_key = Zeroizing::new(hex::encode(signing_key.to_bytes()));

        let public_key_bytes = signing_key.verifying_key().to_encoded_point(false); // 未压缩格式
        let public_key_slice = &public_key_bytes.as_bytes()[1..]; // 去掉 0x04 前缀

        // Keccak256 哈希，取后 20 字节
        let hash = Keccak256::digest(public_key_slice);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);

        Ok(Wallet {
            public_key: AddressValidator::to_eip55(&address),
            private_key: private_key.to_string(),
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Ed25519 策略 (Solana, SLIP-0010)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct Ed25519Strategy;

impl Ed25519Strategy {
    /// SLIP-0010 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";

    /// SLIP-0010 ed25519 派生，`path` 中每一级都按硬化处理
    ///
    /// master: I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
    /// child:  I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index + 2^31))
    /// IL 为私钥，IR 为 chain code
    fn derive_key(seed: &[u8], path: &[u32]) -> Result<Zeroizing<[u8; 32]>> {
        let (mut key, mut chain_code) = Self::hmac_split(Self::MASTER_SECRET, &[seed])?;

        for &index in path {
            anyhow::ensure!(
                index < HARDENED_OFFSET,
                "Index {} exceeds hardened range",
                index
            );
            let hardened = (index | HARDENED_OFFSET).to_be_bytes();
            let (child_key, child_chain) = Self::hmac_split(
                chain_code.as_slice(),
                &[&[0x00u8][..], key.as_slice(), &hardened[..]],
            )?;
            key = child_key;
            chain_code = child_chain;
        }

        Ok(key)
    }

    fn hmac_split(
        hmac_key: &[u8],
        data: &[&[u8]],
    ) -> Result<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>)> {
        let mut mac = HmacSha512::new_from_slice(hmac_key)
            .map_err(|e| anyhow::anyhow!("HMAC init failed: {}", e))?;
        for part in data {
            mac.update(part);
        }
        let mut output = Zeroizing::new([0u8; 64]);
        output.copy_from_slice(&mac.finalize().into_bytes());

        let mut left = Zeroizing::new([0u8; 32]);
        let mut right = Zeroizing::new([0u8; 32]);
        left.copy_from_slice(&output[..32]);
        right.copy_from_slice(&output[32..]);
        Ok((left, right))
    }
}

impl DerivationStrategy for Ed25519Strategy {
    fn derive_wallet(&self, seed: &Seed, index: u32) -> Result<Wallet> {
        use ed25519_dalek::SigningKey;

        // m/44'/501'/index'/0'
        let path = [44, Chain::Solana.coin_type(), index, 0];
        let derived = Self::derive_key(seed.as_bytes(), &path)
            .with_context(|| format!("SLIP-0010 derivation failed at index {}", index))?;

        // 派生出的 32 字节作为 ed25519 种子
        let signing_key = SigningKey::from_bytes(&derived);
        let public_key_bytes = signing_key.verifying_key().to_bytes();
        // secret (32) || public (32)
        let keypair_bytes = Zeroizing::new(signing_key.to_keypair_bytes());

        Ok(Wallet {
            public_key: bs58::encode(public_key_bytes).into_string(),
            private_key: base64::engine::general_purpose::STANDARD.encode(keypair_bytes.as_slice()),
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 策略分派
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// 策略工厂
pub struct DerivationStrategyFactory;

impl DerivationStrategyFactory {
    pub fn for_chain(chain: Chain) -> &'static dyn DerivationStrategy {
        match chain {
            Chain::Solana => &Ed25519Strategy,
            Chain::Eth => &Secp256k1Strategy,
        }
    }
}

impl Chain {
    /// 按链派生第 `index` 个钱包
    pub fn derive(self, seed: &Seed, index: u32) -> Result<Wallet> {
        let wallet = DerivationStrategyFactory::for_chain(self).derive_wallet(seed, index)?;
        tracing::debug!(
            chain = %self,
            index,
            path = %self.derivation_path(index),
            address = %redact_address(&wallet.public_key),
            "derived wallet"
        );
        Ok(wallet)
    }
}

pub fn derive_solana_wallet(seed: &Seed, index: u32) -> Result<Wallet> {
    Chain::Solana.derive(seed, index)
}

pub fn derive_ethereum_wallet(seed: &Seed, index: u32) -> Result<Wallet> {
    Chain::Eth.derive(seed, index)
}
