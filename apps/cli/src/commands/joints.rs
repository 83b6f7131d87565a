//! 关节列表命令

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// 列出受控关节（每行一个，schema 顺序）
#[derive(Args, Debug)]
pub struct JointsCommand {
    /// URDF 文件路径
    #[arg(short, long)]
    pub urdf: PathBuf,
}

impl JointsCommand {
    pub fn execute(&self) -> Result<()> {
        let schema = joint_schema::extract_file(&self.urdf)
            .with_context(|| format!("解析 URDF 失败: {}", self.urdf.display()))?;

        tracing::debug!("Extracted {} actuated joints", schema.len());

        for name in &schema {
            println!("{name}");
        }

        Ok(())
    }
}
