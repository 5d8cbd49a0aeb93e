//! 助记词校验与生成 (BIP39, English wordlist)
//!
//! [`MnemonicPhrase`] 只能通过 [`MnemonicPhrase::parse`] 或
//! [`MnemonicPhrase::generate`] 构造，持有它即代表已通过校验和验证。

use std::fmt;

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{WalletError, WalletResult};

/// 生成助记词时可选的单词数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 个单词 (128-bit entropy)
    Twelve,
    /// 24 个单词 (256-bit entropy)
    TwentyFour,
}

impl WordCount {
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::TwentyFour => 32,
        }
    }

    pub const fn words(self) -> usize {
        match self {
            WordCount::Twelve => 12,
            WordCount::TwentyFour => 24,
        }
    }
}

impl TryFrom<usize> for WordCount {
    type Error = WalletError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(WordCount::Twelve),
            24 => Ok(WordCount::TwentyFour),
            other => Err(WalletError::InvalidWordCount(other)),
        }
    }
}

/// 已校验的 BIP39 助记词
#[derive(Clone, PartialEq, Eq)]
pub struct MnemonicPhrase {
    mnemonic: Mnemonic,
    phrase: Zeroizing<String>,
    word_count: usize,
}

// 不在日志/调试输出中泄露助记词
impl fmt::Debug for MnemonicPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MnemonicPhrase")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl MnemonicPhrase {
    /// 解析并校验用户输入的助记词
    ///
    /// 连续空白会被规整为单个空格；单词数、单词表与校验和都会被检查
    pub fn parse(input: &str) -> WalletResult<Self> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let count = words.len();
        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::InvalidWordCount(count));
        }

        let normalized = Zeroizing::new(words.join(" "));
        let mnemonic = Mnemonic::parse_in(Language::English, normalized.as_str())
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            mnemonic,
            phrase: normalized,
            word_count: count,
        })
    }

    /// 使用系统随机数生成新助记词
    pub fn generate(word_count: WordCount) -> WalletResult<Self> {
        let mut entropy = [0u8; 32];
        let entropy = &mut entropy[..word_count.entropy_bytes()];
        rand::thread_rng().fill_bytes(entropy);

        let result = Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()));
        entropy.zeroize();

        let mnemonic = result?;
        let phrase = Zeroizing::new(mnemonic.to_string());
        tracing::debug!(words = word_count.words(), "generated new mnemonic");

        Ok(Self {
            mnemonic,
            phrase,
            word_count: word_count.words(),
        })
    }

    /// 规整后的助记词原文（单空格分隔）
    pub fn phrase(&self) -> &str {
        self.phrase.as_str()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// BIP39 种子（passphrase 为空）
    pub(crate) fn to_seed(&self) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.mnemonic.to_seed(""))
    }
}
