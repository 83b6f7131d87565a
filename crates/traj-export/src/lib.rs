//! # Traj Export - 轨迹校验与导出
//!
//! **依赖原则**: 只依赖 `joint-schema`，不涉及运动学计算、插值或单位换算
//!
//! ## 包含模块
//!
//! - `timestep` - 时间步表示（Named / Positional）与归一化
//! - `validate` - 关节集合严格相等校验
//! - `encoding` - CSV / JSON 编码
//! - `exporter` - 导出器（pre-pass 校验 + 原子写入）
//! - `trajectory` - JSON 轨迹输入解码
//! - `readback` - 导出文件读回
//! - `config` - TOML 导出配置
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use traj_export::{Encoding, JointState, TrajectoryExporter};
//!
//! # fn main() -> Result<(), traj_export::ExportError> {
//! let exporter = TrajectoryExporter::from_urdf_file("robot.urdf")?;
//! println!("joints: {:?}", exporter.joint_names());
//!
//! let trajectory = vec![
//!     JointState::named([("shoulder_pan", 0.0), ("shoulder_lift", 0.1), ("elbow", 0.0)]),
//!     JointState::positional(["shoulder_pan", "shoulder_lift", "elbow"], [0.1, 0.2, 0.05]),
//! ];
//!
//! exporter.export(&trajectory, "out/trajectory.csv", Encoding::Tabular)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod exporter;
pub mod readback;
pub mod timestep;
pub mod trajectory;
pub mod validate;

// 重新导出常用类型
pub use config::ExportConfig;
pub use encoding::{Encoding, ParseEncodingError};
pub use error::{ExportError, MalformedReason, Result};
pub use exporter::{TrajectoryExporter, export, export_with_description};
pub use readback::{ExportedTrajectory, read_file, read_structured, read_tabular};
pub use timestep::{JointState, normalize};
pub use trajectory::Trajectory;
pub use validate::{validate_timestep, validate_trajectory};

pub use joint_schema::{JointSchema, SchemaError};
