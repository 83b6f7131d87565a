//! 导出命令
//!
//! URDF -> schema，JSON 轨迹 -> 校验 -> 原子写入目标文件

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use traj_export::{Encoding, ExportConfig, TrajectoryExporter, trajectory};

/// 导出命令参数
#[derive(Args, Debug)]
pub struct ExportCommand {
    /// URDF 文件路径
    #[arg(short, long)]
    pub urdf: PathBuf,

    /// 轨迹 JSON 文件路径
    #[arg(short, long)]
    pub trajectory: PathBuf,

    /// 输出文件路径
    #[arg(short, long)]
    pub output: PathBuf,

    /// 输出编码（tabular / csv / structured / json），默认按扩展名推断
    #[arg(short, long)]
    pub encoding: Option<Encoding>,

    /// JSON 不缩进
    #[arg(long)]
    pub compact: bool,

    /// 输出目录不存在时报错，而不是自动创建
    #[arg(long)]
    pub no_create_dirs: bool,
}

impl ExportCommand {
    pub fn execute(&self, mut config: ExportConfig) -> Result<()> {
        if self.compact {
            config.pretty = false;
        }
        if self.no_create_dirs {
            config.create_parent_dirs = false;
        }

        let encoding = self
            .encoding
            .unwrap_or_else(|| config.resolve_encoding(&self.output));

        let exporter = TrajectoryExporter::from_urdf_file(&self.urdf)
            .with_context(|| format!("解析 URDF 失败: {}", self.urdf.display()))?
            .with_config(config);

        let trajectory = trajectory::load_json_file(&self.trajectory)
            .with_context(|| format!("读取轨迹失败: {}", self.trajectory.display()))?;

        tracing::debug!(
            "Exporting {} timesteps over {} joints as {}",
            trajectory.len(),
            exporter.num_joints(),
            encoding
        );

        exporter
            .export(&trajectory, &self.output, encoding)
            .with_context(|| format!("导出失败: {}", self.output.display()))?;

        println!(
            "✅ 已导出 {} 个时间步（{} 个关节，{}）-> {}",
            trajectory.len(),
            exporter.num_joints(),
            encoding,
            self.output.display()
        );

        Ok(())
    }
}
