//! Issue Notifier CLI
//!
//! 读取 YouTrack webhook payload，按渠道渲染通知消息

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use issue_notifier::{parse_payload, NotifierConfig, RegistryBuilder};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "issue-notify")]
#[command(about = "Issue Notifier - 把 YouTrack webhook 事件渲染成通知消息")]
#[command(version)]
struct Cli {
    /// 配置文件路径 (默认: ~/.config/issue-notifier/channels.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 渲染 webhook payload
    Render {
        /// 目标渠道 (telegram, vkteams, logger, ...)
        #[arg(long, short)]
        channel: String,
        /// payload 文件，"-" 表示 stdin
        #[arg(long, short, default_value = "-")]
        input: String,
    },
    /// 列出已注册的渠道
    Channels,
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut body = Vec::new();
        io::stdin()
            .read_to_end(&mut body)
            .context("Failed to read payload from stdin")?;
        Ok(body)
    } else {
        fs::read(input).with_context(|| format!("Failed to read payload file {}", input))
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("issue_notifier=warn,issue_notify=warn"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let config = NotifierConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { channel, input } => {
            let body = read_input(&input)?;
            debug!(bytes = body.len(), "Webhook payload received");

            let payload = parse_payload(&body)?;
            info!(
                channel = %channel,
                project = payload.project_name(),
                changes = payload.changes.len(),
                "Rendering notification"
            );

            let registry = RegistryBuilder::from_config(config).build();
            println!("{}", registry.format(&payload, &channel));
        }
        Commands::Channels => {
            let registry = RegistryBuilder::from_config(config.clone()).build();
            if registry.channel_count() == 0 {
                println!("没有注册渠道，全部使用默认格式");
            }
            for name in registry.channel_names() {
                let Some(channel) = config.channel(name) else {
                    continue;
                };
                println!(
                    "{:<12} layout={:<8} mention={}",
                    name,
                    channel.layout.as_str(),
                    channel.mention.as_str()
                );
            }
        }
    }

    Ok(())
}
