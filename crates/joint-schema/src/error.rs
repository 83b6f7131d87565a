//! 关节 Schema 解析错误类型定义

use thiserror::Error;

/// 解析结果类型别名
pub type Result<T> = std::result::Result<T, SchemaError>;

/// URDF 解析错误
///
/// 所有变体都表示描述文档无法作为 URDF 关节 schema 使用，调用方应视为不可重试。
#[derive(Error, Debug)]
pub enum SchemaError {
    /// XML 语法错误（标签不匹配、文档截断、多个根元素等）
    #[error("XML parse error: {0}")]
    Xml(String),

    /// 文档中没有根元素
    #[error("missing root element <robot>")]
    MissingRoot,

    /// 根元素不是 `<robot>`
    #[error("unexpected root element <{0}>, expected <robot>")]
    UnexpectedRoot(String),

    /// 缺少必需属性
    #[error("missing required attribute `{attribute}` on <{element}>")]
    MissingAttribute {
        attribute: &'static str,
        element: &'static str,
    },

    /// 必需属性为空字符串
    #[error("empty attribute `{attribute}` on <{element}>")]
    EmptyAttribute {
        attribute: &'static str,
        element: &'static str,
    },

    /// 关节名重复（与关节类型无关）
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// 文档中没有任何受驱动关节
    #[error("no actuated joints (revolute/continuous/prismatic) found")]
    NoActuatedJoints,

    /// 读取描述文件失败
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::SchemaError;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::DuplicateJoint("elbow".to_string());
        assert_eq!(err.to_string(), "duplicate joint name: elbow");

        let err = SchemaError::MissingAttribute {
            attribute: "name",
            element: "joint",
        };
        assert_eq!(err.to_string(), "missing required attribute `name` on <joint>");

        let err = SchemaError::UnexpectedRoot("sdf".to_string());
        assert!(err.to_string().contains("<sdf>"));

        let err = SchemaError::NoActuatedJoints;
        assert!(err.to_string().contains("no actuated joints"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "robot.urdf");
        let err: SchemaError = io.into();
        match err {
            SchemaError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected Io variant"),
        }
    }
}
