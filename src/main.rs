//! Alarm CLI
//!
//! 发送测试告警、检查配置、列出渠道

use alarm_dispatch::{Alarm, AlertCause, ChannelRegistry, DispatcherConfig, Level};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "alarm")]
#[command(about = "Alarm Dispatch - 即发即弃的告警分发器")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/alarm/config.json）
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 发送一条告警并等待投递完成
    Send {
        /// 告警级别: debug / info / warn / error
        #[arg(long, short, default_value = "info")]
        level: Level,
        /// 告警名称
        #[arg(long, short)]
        name: String,
        /// 告警内容
        #[arg(long, default_value = "")]
        content: String,
        /// 可选的原因描述
        #[arg(long)]
        cause: Option<String>,
    },
    /// 列出内置渠道和当前配置的 senderList
    Channels,
    /// 加载配置并解析所有渠道
    Check,
}

fn load_config(path: Option<&PathBuf>) -> Result<DispatcherConfig> {
    let config = match path {
        Some(path) => DispatcherConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DispatcherConfig::load_default().context("failed to load default config")?,
    };
    Ok(config)
}

/// 在调用处构建 cause
///
/// 不能写成 `cause.map(AlertCause::new)`：经过 `Option::map` 时 track_caller
/// 记录的是 core 库内部的位置。
#[track_caller]
#[allow(clippy::manual_map)]
fn cause_from_arg(cause: Option<String>) -> Option<AlertCause> {
    match cause {
        Some(message) => Some(AlertCause::new(message)),
        None => None,
    }
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug alarm send -n test
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("alarm_dispatch=info,alarm=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            level,
            name,
            content,
            cause,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let alarm = Alarm::new(config)?;
            alarm.alarm(level, &name, &content, cause_from_arg(cause));
            alarm.shutdown();
            info!(alarm_name = %name, "Alarm dispatched");
        }
        Commands::Channels => {
            let registry = ChannelRegistry::builtin();
            println!("内置渠道:");
            for id in registry.identifiers() {
                println!("  {}", id);
            }

            match load_config(cli.config.as_ref()) {
                Ok(config) => {
                    println!("\n已配置 senderList:");
                    for id in config.sender_list.as_slice() {
                        let marker = if registry.contains(id) { "" } else { " (unknown)" };
                        println!("  {}{}", id, marker);
                    }
                }
                Err(e) => eprintln!("\n配置不可用: {:#}", e),
            }
        }
        Commands::Check => {
            let config = load_config(cli.config.as_ref())?;
            let registry = ChannelRegistry::builtin();
            let channels = registry.resolve(config.sender_list.as_slice(), &config)?;

            println!("配置有效:");
            println!("  appName: {}", config.app_name);
            println!("  threadPoolSize: {}", config.effective_pool_size());
            println!(
                "  channels: {}",
                channels.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
            );
        }
    }

    Ok(())
}
