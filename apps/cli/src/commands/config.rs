//! 配置管理命令
//!
//! 配置文件查找顺序：`--config <path>` > `<config_dir>/traj-export/config.toml` > 默认值

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use traj_export::ExportConfig;

/// 默认配置文件路径
fn default_config_file() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;

    path.push("traj-export");
    path.push("config.toml");
    Ok(path)
}

fn config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_file(),
    }
}

/// 加载生效的配置
///
/// 显式指定的文件必须存在；默认位置的文件不存在时使用默认值。
pub fn load_config(explicit: Option<&Path>) -> Result<ExportConfig> {
    if let Some(path) = explicit {
        return ExportConfig::load_from_file(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()));
    }

    match default_config_file() {
        Ok(path) if path.exists() => {
            tracing::debug!("Loading config from {}", path.display());
            ExportConfig::load_from_file(&path)
                .with_context(|| format!("读取配置文件失败: {}", path.display()))
        },
        _ => Ok(ExportConfig::default()),
    }
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 显示生效的配置
    Show,

    /// 写入默认配置文件
    Init {
        /// 覆盖已存在的配置文件
        #[arg(long)]
        force: bool,
    },

    /// 显示配置文件路径
    Path,
}

impl ConfigCommand {
    pub fn execute(self, explicit: Option<&Path>) -> Result<()> {
        match self {
            ConfigCommand::Show => Self::show_(explicit),

            ConfigCommand::Init { force } => Self::init_(explicit, force),

            ConfigCommand::Path => {
                println!("{}", config_file(explicit)?.display());
                Ok(())
            },
        }
    }

    fn show_(explicit: Option<&Path>) -> Result<()> {
        let config = load_config(explicit)?;
        let path = config_file(explicit)?;

        println!("# {}", path.display());
        if !path.exists() {
            println!("# (文件不存在，使用默认配置)");
        }
        print!("{}", config.to_toml_string()?);

        Ok(())
    }

    fn init_(explicit: Option<&Path>, force: bool) -> Result<()> {
        let path = config_file(explicit)?;

        if path.exists() && !force {
            bail!("配置文件已存在: {}（使用 --force 覆盖）", path.display());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("创建配置目录失败")?;
        }

        ExportConfig::default()
            .save_to_file(&path)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))?;

        println!("✅ 已写入默认配置: {}", path.display());
        Ok(())
    }
}
