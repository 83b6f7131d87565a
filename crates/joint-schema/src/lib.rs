//! # Joint Schema
//!
//! 从 URDF 机器人描述中提取受驱动关节（actuated joints）的有序列表（无运行时依赖）
//!
//! ## 模块
//!
//! - `kind`: URDF 关节类型分类
//! - `schema`: 有序、无重复的关节名列表（导出列顺序）
//! - `parser`: URDF XML 解析
//! - `error`: 解析错误类型
//!
//! ## 提取规则
//!
//! - 只考察根元素 `<robot>` 的直接子元素 `<joint>`（`<transmission>` 内的 `<joint>` 不是关节定义）
//! - `revolute` / `continuous` / `prismatic` 为受驱动关节，其余类型（含 `fixed`）被忽略
//! - 保持文件中的声明顺序，不排序
//! - 关节名在整个文档内必须唯一（与类型无关），重复即报错
//!
//! ```rust
//! let urdf = r#"
//!     <robot name="arm">
//!         <joint name="shoulder_pan" type="revolute"/>
//!         <joint name="tool_mount" type="fixed"/>
//!         <joint name="elbow" type="continuous"/>
//!     </robot>
//! "#;
//!
//! let schema = joint_schema::extract(urdf).unwrap();
//! assert_eq!(schema.names(), ["shoulder_pan", "elbow"]);
//! ```

pub mod error;
pub mod kind;
pub mod parser;
pub mod schema;

// 重新导出常用类型
pub use error::{Result, SchemaError};
pub use kind::JointKind;
pub use parser::{extract, extract_file};
pub use schema::JointSchema;
