//! walletgen 主入口
//! 从助记词派生 Solana / Ethereum 钱包并输出注册表快照（JSON）

use anyhow::{Context, Result};
use walletgen::{
    config::Config,
    domain::{Chain, MnemonicPhrase, WalletRegistry},
    infrastructure::{cache::InMemoryWalletCache, logging::init_logging, log_redact::SensitiveRedact},
};

#[derive(Debug, Default)]
struct CliArgs {
    mnemonic: Option<String>,
    config_path: Option<String>,
    solana: Option<u32>,
    eth: Option<u32>,
}

fn parse_args() -> Result<CliArgs> {
    let mut parsed = CliArgs::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mnemonic" => parsed.mnemonic = args.next(),
            "--config" => parsed.config_path = args.next(),
            "--solana" => {
                let v = args.next().context("--solana requires a number")?;
                parsed.solana = Some(v.parse().context("--solana must be a number")?);
            }
            "--eth" => {
                let v = args.next().context("--eth requires a number")?;
                parsed.eth = Some(v.parse().context("--eth must be a number")?);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    // ✅ 1. 加载环境变量
    dotenvy::dotenv().ok();

    let args = parse_args()?;

    // ✅ 2. 加载配置（--config 优先于 CONFIG_PATH）
    let config_path = args
        .config_path
        .clone()
        .or_else(|| std::env::var("CONFIG_PATH").ok());
    let config = Config::from_env_and_file(config_path.as_deref())?;
    config.validate()?;

    // ✅ 3. 初始化日志
    init_logging(&config.logging)?;

    // ✅ 4. 助记词：参数 > 环境变量 > 新生成
    let mnemonic = match args
        .mnemonic
        .clone()
        .or_else(|| std::env::var("WALLET_MNEMONIC").ok())
    {
        Some(phrase) => MnemonicPhrase::parse(&phrase)?,
        None => MnemonicPhrase::generate(config.wallet.word_count()?)?,
    };
    tracing::info!(mnemonic = %mnemonic.redact(), "mnemonic ready");

    // ✅ 5. 派生钱包
    let mut registry = WalletRegistry::new(InMemoryWalletCache::shared());
    registry.set_mnemonic(mnemonic);

    let targets = [
        (
            Chain::Solana,
            args.solana.unwrap_or(config.wallet.initial_solana_wallets),
        ),
        (Chain::Eth, args.eth.unwrap_or(config.wallet.initial_eth_wallets)),
    ];
    for (chain, count) in targets {
        for _ in 0..count {
            registry.add_wallet(chain)?;
        }
    }

    // ✅ 6. 输出快照
    let snapshot = serde_json::to_string_pretty(&registry.snapshot())?;
    println!("{}", snapshot);

    Ok(())
}
