//! 读回命令

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use traj_export::{Encoding, ExportConfig, read_file};

/// 读回导出文件，打印关节与时间步数量
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// 导出文件路径
    pub file: PathBuf,

    /// 文件编码，默认按扩展名推断
    #[arg(short, long)]
    pub encoding: Option<Encoding>,
}

impl InspectCommand {
    pub fn execute(&self, config: &ExportConfig) -> Result<()> {
        let encoding = self
            .encoding
            .unwrap_or_else(|| config.resolve_encoding(&self.file));

        let exported = read_file(&self.file, encoding)
            .with_context(|| format!("读取导出文件失败: {}", self.file.display()))?;

        println!("📄 文件: {}", self.file.display());
        println!("   编码: {encoding}");
        println!(
            "   关节 ({}): {}",
            exported.joint_names.len(),
            exported.joint_names.join(", ")
        );
        println!("   时间步: {}", exported.len());

        Ok(())
    }
}
