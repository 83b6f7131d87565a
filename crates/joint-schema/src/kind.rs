//! # URDF 关节类型
//!
//! | 类型 | 自由度 | 是否导出 |
//! |------|--------|----------|
//! | revolute | 1 | ✅ |
//! | continuous | 1 | ✅ |
//! | prismatic | 1 | ✅ |
//! | fixed | 0 | ❌ |
//! | floating | 6 | ❌ |
//! | planar | 3 | ❌ |
//! | 其他 / 缺失 | - | ❌ |

use std::fmt;

/// URDF `<joint type="...">` 分类
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JointKind {
    /// 有限位旋转关节
    Revolute,
    /// 无限位旋转关节
    Continuous,
    /// 平移关节
    Prismatic,
    /// 固定关节
    Fixed,
    /// 6 自由度浮动关节
    Floating,
    /// 平面关节
    Planar,
    /// 未知类型（原样保留，小写后）
    Other(String),
}

impl JointKind {
    /// 解析类型字符串（忽略首尾空白与大小写）
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "revolute" => Self::Revolute,
            "continuous" => Self::Continuous,
            "prismatic" => Self::Prismatic,
            "fixed" => Self::Fixed,
            "floating" => Self::Floating,
            "planar" => Self::Planar,
            _ => Self::Other(normalized),
        }
    }

    /// 是否为受驱动关节（贡献一个标量自由度）
    pub fn is_actuated(&self) -> bool {
        matches!(self, Self::Revolute | Self::Continuous | Self::Prismatic)
    }

    /// URDF 中的类型名
    pub fn as_str(&self) -> &str {
        match self {
            Self::Revolute => "revolute",
            Self::Continuous => "continuous",
            Self::Prismatic => "prismatic",
            Self::Fixed => "fixed",
            Self::Floating => "floating",
            Self::Planar => "planar",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
