//! 轨迹输入解码（JSON）
//!
//! 顶层结构二选一：
//! - 时间步记录数组：`[{"positions": {...}}, {"positions": [...], "joint_names": [...]}]`
//! - 之前导出的结构化文档：`{"joint_names": [...], "timesteps": [{...}, ...]}`

use crate::encoding::{JOINT_NAMES_KEY, TIMESTEPS_KEY};
use crate::error::{ExportError, Result};
use crate::timestep::JointState;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// 轨迹：时间步序列，插入顺序即时间顺序
pub type Trajectory = Vec<JointState>;

/// 从 JSON 文本解码轨迹
pub fn from_json_str(text: &str) -> Result<Trajectory> {
    let value: Value = serde_json::from_str(text)?;
    from_json_value(&value)
}

/// 从 JSON 值解码轨迹
pub fn from_json_value(value: &Value) -> Result<Trajectory> {
    match value {
        Value::Array(records) => records
            .iter()
            .enumerate()
            .map(|(index, record)| JointState::from_json(record, index))
            .collect(),
        Value::Object(document) if document.contains_key(TIMESTEPS_KEY) => {
            if let Some(key) = document
                .keys()
                .find(|k| *k != JOINT_NAMES_KEY && *k != TIMESTEPS_KEY)
            {
                return Err(ExportError::InvalidTrajectory(format!(
                    "unknown top-level field `{key}`"
                )));
            }
            let Some(Value::Array(timesteps)) = document.get(TIMESTEPS_KEY) else {
                return Err(ExportError::InvalidTrajectory(format!(
                    "`{TIMESTEPS_KEY}` must be an array"
                )));
            };

            timesteps
                .iter()
                .enumerate()
                .map(|(index, timestep)| match timestep {
                    Value::Object(map) => JointState::from_json_map(map, index),
                    _ => Err(ExportError::UnsupportedTimestepType {
                        index,
                        detail: "structured timestep must be an object of joint values".to_string(),
                    }),
                })
                .collect()
        },
        _ => Err(ExportError::InvalidTrajectory(
            "expected an array of timesteps or a structured export document".to_string(),
        )),
    }
}

/// 从 JSON 文件加载轨迹
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<Trajectory> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let trajectory = from_json_str(&text)?;
    debug!(path = %path.display(), timesteps = trajectory.len(), "trajectory loaded");
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_array() {
        let text = r#"[
            {"positions": {"a": 0.0, "b": 0.1}},
            {"positions": [0.2, 0.3], "joint_names": ["a", "b"]}
        ]"#;
        let trajectory = from_json_str(text).unwrap();
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory[0], JointState::named([("a", 0.0), ("b", 0.1)]));
        assert_eq!(trajectory[1], JointState::positional(["a", "b"], [0.2, 0.3]));
    }

    #[test]
    fn test_structured_document() {
        let value = json!({
            "joint_names": ["a", "b"],
            "timesteps": [{"a": 1.0, "b": 2.0}]
        });
        let trajectory = from_json_value(&value).unwrap();
        assert_eq!(trajectory, vec![JointState::named([("a", 1.0), ("b", 2.0)])]);
    }

    #[test]
    fn test_empty_array() {
        assert!(from_json_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_timestep_reports_index() {
        let text = r#"[{"positions": {"a": 0.0}}, 42]"#;
        assert!(matches!(
            from_json_str(text),
            Err(ExportError::UnsupportedTimestepType { index: 1, .. })
        ));

        let value = json!({"joint_names": ["a"], "timesteps": [{"a": 0.0}, [0.0]]});
        assert!(matches!(
            from_json_value(&value),
            Err(ExportError::UnsupportedTimestepType { index: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_top_level() {
        assert!(matches!(
            from_json_str("{\"positions\": {}}"),
            Err(ExportError::InvalidTrajectory(_))
        ));
        assert!(matches!(
            from_json_value(&json!({"timesteps": {}})),
            Err(ExportError::InvalidTrajectory(_))
        ));
        assert!(matches!(
            from_json_value(&json!({"timesteps": [], "extra": 1})),
            Err(ExportError::InvalidTrajectory(_))
        ));
        assert!(matches!(from_json_str("not json"), Err(ExportError::Json(_))));
    }
}
