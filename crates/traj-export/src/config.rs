//! # 导出配置
//!
//! TOML 格式，所有字段均可省略：
//!
//! ```toml
//! # 目标文件扩展名无法推断编码时使用（tabular / csv / structured / json）
//! encoding = "tabular"
//! # 自动创建输出目录
//! create_parent_dirs = true
//! # JSON 两空格缩进
//! pretty = true
//! ```

use crate::encoding::Encoding;
use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 导出配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// 默认编码（扩展名优先）
    pub encoding: Option<Encoding>,

    /// 输出目录不存在时自动创建
    pub create_parent_dirs: bool,

    /// 结构化编码是否缩进
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            encoding: None,
            create_parent_dirs: true,
            pretty: true,
        }
    }
}

impl ExportConfig {
    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ExportError::Config(e.to_string()))
    }

    /// 序列化为 TOML 文本
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ExportError::Config(e.to_string()))
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| ExportError::Config(format!("{}: {e}", path.display())))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 确定目标文件的编码：扩展名 > 配置 > 默认（tabular）
    pub fn resolve_encoding(&self, destination: &Path) -> Encoding {
        Encoding::from_path(destination).or(self.encoding).unwrap_or_default()
    }
}
