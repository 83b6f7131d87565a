//! # Traj Export CLI
//!
//! 将机器人关节轨迹按 URDF 的关节顺序导出为 CSV / JSON。
//!
//! ## 使用示例
//!
//! ```bash
//! # 查看 URDF 中的受控关节（schema 顺序）
//! traj-export joints --urdf robot.urdf
//!
//! # 导出（编码按扩展名推断，也可用 --encoding 指定）
//! traj-export export --urdf robot.urdf --trajectory traj.json --output out/traj.csv
//!
//! # 读回导出文件
//! traj-export inspect out/traj.csv
//!
//! # 配置管理
//! traj-export config init
//! traj-export config show
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigCommand, ExportCommand, InspectCommand, JointsCommand};

/// Traj Export - 关节轨迹导出工具
#[derive(Parser, Debug)]
#[command(name = "traj-export")]
#[command(about = "Export robot joint trajectories in URDF joint order", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认：<config_dir>/traj-export/config.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 列出 URDF 中的受控关节
    Joints {
        #[command(flatten)]
        args: JointsCommand,
    },

    /// 校验并导出轨迹
    Export {
        #[command(flatten)]
        args: ExportCommand,
    },

    /// 读回导出文件
    Inspect {
        #[command(flatten)]
        args: InspectCommand,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("traj_export={level}").parse()?)
                .add_directive(format!("joint_schema={level}").parse()?),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Joints { args } => args.execute(),

        Commands::Export { args } => {
            let config = commands::config::load_config(config_path)?;
            args.execute(config)
        },

        Commands::Inspect { args } => {
            let config = commands::config::load_config(config_path)?;
            args.execute(&config)
        },

        Commands::Config(cmd) => cmd.execute(config_path),
    }
}
