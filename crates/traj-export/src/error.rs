//! 导出层错误类型定义

use joint_schema::SchemaError;
use thiserror::Error;

/// 导出结果类型别名
pub type Result<T> = std::result::Result<T, ExportError>;

/// 导出层错误类型
///
/// 所有错误对当前导出调用都是终止性的，内部不做重试。
#[derive(Error, Debug)]
pub enum ExportError {
    /// 机器人描述解析错误
    #[error("Robot description error: {0}")]
    Schema(#[from] SchemaError),

    /// 位置序列形式的时间步格式错误（名称与数值长度不一致等）
    #[error("Timestep {index}: malformed positional timestep: {reason}")]
    MalformedTimestep {
        index: usize,
        reason: MalformedReason,
    },

    /// 时间步形状不属于任何支持的表示
    #[error("Timestep {index}: unsupported timestep shape: {detail}")]
    UnsupportedTimestepType { index: usize, detail: String },

    /// 时间步缺少 schema 中的关节（按 schema 顺序列出）
    #[error("Timestep {index}: missing joints {joints:?}")]
    MissingJoint { index: usize, joints: Vec<String> },

    /// 时间步包含 schema 之外的关节（按字母序列出）
    #[error("Timestep {index}: unexpected joints {joints:?}")]
    UnexpectedJoint { index: usize, joints: Vec<String> },

    /// NaN 或无穷大
    #[error("Timestep {index}: non-finite value for joint {joint}")]
    NonFiniteValue { index: usize, joint: String },

    /// 轨迹输入的顶层结构无效
    #[error("Invalid trajectory input: {0}")]
    InvalidTrajectory(String),

    /// 读回表格输出时格式错误
    #[error("Invalid tabular data at line {line}: {message}")]
    InvalidTabular { line: usize, message: String },

    /// JSON 编解码错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置文件错误
    #[error("Config error: {0}")]
    Config(String),

    /// 文件 IO 错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 位置序列时间步的格式错误原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("{names} joint names for {values} values")]
    LengthMismatch { names: usize, values: usize },

    #[error("joint name {0:?} appears more than once")]
    DuplicateName(String),
}

impl ExportError {
    /// 出错的时间步下标（仅时间步相关错误）
    pub fn timestep_index(&self) -> Option<usize> {
        match self {
            ExportError::MalformedTimestep { index, .. }
            | ExportError::UnsupportedTimestepType { index, .. }
            | ExportError::MissingJoint { index, .. }
            | ExportError::UnexpectedJoint { index, .. }
            | ExportError::NonFiniteValue { index, .. } => Some(*index),
            _ => None,
        }
    }
}
