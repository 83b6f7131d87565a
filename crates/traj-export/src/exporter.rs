//! # 轨迹导出
//!
//! 流程：校验整条轨迹（pre-pass）-> 写入同目录临时文件 -> rename 到目标路径。
//!
//! 任何校验错误都发生在创建目标文件之前，失败的导出不会留下任何输出；
//! 临时文件在所有退出路径上由 `NamedTempFile` 的 Drop 清理。

use crate::config::ExportConfig;
use crate::encoding::{Encoding, write_encoded};
use crate::error::Result;
use crate::timestep::JointState;
use crate::validate::validate_trajectory;
use joint_schema::JointSchema;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 轨迹导出器
///
/// 持有从 URDF 提取的关节 schema，作为所有导出的固定列顺序。
///
/// # 示例
///
/// ```rust
/// use traj_export::{Encoding, JointState, TrajectoryExporter};
///
/// let urdf = r#"<robot name="arm">
///     <joint name="shoulder_pan" type="revolute"/>
///     <joint name="elbow" type="revolute"/>
/// </robot>"#;
///
/// let exporter = TrajectoryExporter::from_urdf_str(urdf).unwrap();
/// let trajectory = vec![JointState::named([("elbow", 0.5), ("shoulder_pan", 0.0)])];
///
/// let mut out = Vec::new();
/// exporter.export_to_writer(&trajectory, &mut out, Encoding::Tabular).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "shoulder_pan,elbow\n0.0,0.5\n");
/// ```
#[derive(Debug, Clone)]
pub struct TrajectoryExporter {
    schema: JointSchema,
    config: ExportConfig,
}

impl TrajectoryExporter {
    /// 使用已有 schema 创建导出器
    pub fn new(schema: JointSchema) -> Self {
        Self {
            schema,
            config: ExportConfig::default(),
        }
    }

    /// 从 URDF 字符串创建
    pub fn from_urdf_str(document: &str) -> Result<Self> {
        Ok(Self::new(joint_schema::extract(document)?))
    }

    /// 从 URDF 文件创建
    pub fn from_urdf_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(joint_schema::extract_file(path)?))
    }

    /// 替换导出配置
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn schema(&self) -> &JointSchema {
        &self.schema
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// 受驱动关节名（URDF 顺序）
    pub fn joint_names(&self) -> &[String] {
        self.schema.names()
    }

    /// 受驱动关节数量
    pub fn num_joints(&self) -> usize {
        self.schema.len()
    }

    /// 校验整条轨迹，返回 schema 顺序的数值行
    pub fn validate(&self, trajectory: &[JointState]) -> Result<Vec<Vec<f64>>> {
        validate_trajectory(&self.schema, trajectory)
    }

    /// 导出到文件
    pub fn export<P: AsRef<Path>>(
        &self,
        trajectory: &[JointState],
        destination: P,
        encoding: Encoding,
    ) -> Result<()> {
        export_file(&self.schema, &self.config, trajectory, destination.as_ref(), encoding)
    }

    /// 导出到任意 writer（整条轨迹校验通过后才开始写）
    pub fn export_to_writer<W: Write>(
        &self,
        trajectory: &[JointState],
        writer: &mut W,
        encoding: Encoding,
    ) -> Result<()> {
        let rows = self.validate(trajectory)?;
        write_encoded(writer, &self.schema, &rows, encoding, self.config.pretty)?;
        writer.flush()?;
        Ok(())
    }
}

/// 按给定 schema 导出轨迹到文件（默认配置）
pub fn export<P: AsRef<Path>>(
    trajectory: &[JointState],
    schema: &JointSchema,
    destination: P,
    encoding: Encoding,
) -> Result<()> {
    export_file(
        schema,
        &ExportConfig::default(),
        trajectory,
        destination.as_ref(),
        encoding,
    )
}

/// 先从 URDF 文本提取 schema，再导出
pub fn export_with_description<P: AsRef<Path>>(
    document: &str,
    trajectory: &[JointState],
    destination: P,
    encoding: Encoding,
) -> Result<()> {
    let schema = joint_schema::extract(document)?;
    export(trajectory, &schema, destination, encoding)
}

fn export_file(
    schema: &JointSchema,
    config: &ExportConfig,
    trajectory: &[JointState],
    destination: &Path,
    encoding: Encoding,
) -> Result<()> {
    let rows = validate_trajectory(schema, trajectory)?;
    debug!(timesteps = rows.len(), joints = schema.len(), "trajectory validated");

    let parent = parent_dir(destination);
    if config.create_parent_dirs {
        fs::create_dir_all(&parent)?;
    }

    let mut builder = tempfile::Builder::new();
    builder.prefix(".traj-export-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut temp = builder.tempfile_in(&parent)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_encoded(&mut writer, schema, &rows, encoding, config.pretty)?;
        writer.flush()?;
    }

    temp.persist(destination).map_err(|e| e.error)?;

    info!(
        destination = %destination.display(),
        %encoding,
        timesteps = rows.len(),
        "trajectory exported"
    );
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
