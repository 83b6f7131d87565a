//! 时间步校验
//!
//! 归一化后的关节集合必须与 schema 严格相等（既不能多也不能少），
//! 否则可能静默丢失数据或引入未建模的关节。

use crate::error::{ExportError, Result};
use crate::timestep::{JointState, normalize};
use joint_schema::JointSchema;
use std::collections::HashMap;

/// 校验单个时间步，返回按 schema 顺序排列的一行数值
///
/// # 错误
/// - 归一化错误（见 [`normalize`]）
/// - [`ExportError::MissingJoint`]：缺少 schema 中的关节（同时缺少和多余时优先报告缺少）
/// - [`ExportError::UnexpectedJoint`]：包含 schema 之外的关节
/// - [`ExportError::NonFiniteValue`]：NaN / 无穷大
pub fn validate_timestep(schema: &JointSchema, state: &JointState, index: usize) -> Result<Vec<f64>> {
    let positions = normalize(state, index)?;

    // 快速路径：列数一致且每个 schema 关节都能找到 => 集合相等（键无重复）
    let row = if positions.len() == schema.len() {
        ordered_row(schema, &positions)
    } else {
        None
    };

    let Some(row) = row else {
        return Err(set_mismatch(schema, &positions, index));
    };

    if let Some((name, _)) = schema.iter().zip(&row).find(|(_, v)| !v.is_finite()) {
        return Err(ExportError::NonFiniteValue {
            index,
            joint: name.clone(),
        });
    }

    Ok(row)
}

/// 顺序校验整条轨迹，遇到第一个无效时间步立即失败
pub fn validate_trajectory(schema: &JointSchema, trajectory: &[JointState]) -> Result<Vec<Vec<f64>>> {
    trajectory
        .iter()
        .enumerate()
        .map(|(index, state)| validate_timestep(schema, state, index))
        .collect()
}

fn ordered_row(schema: &JointSchema, positions: &HashMap<&str, f64>) -> Option<Vec<f64>> {
    schema.iter().map(|name| positions.get(name.as_str()).copied()).collect()
}

/// 计算集合差异
fn set_mismatch(schema: &JointSchema, positions: &HashMap<&str, f64>, index: usize) -> ExportError {
    let missing: Vec<String> = schema
        .iter()
        .filter(|name| !positions.contains_key(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return ExportError::MissingJoint {
            index,
            joints: missing,
        };
    }

    let mut extra: Vec<String> = positions
        .keys()
        .filter(|name| !schema.contains(name))
        .map(|name| name.to_string())
        .collect();
    extra.sort();
    ExportError::UnexpectedJoint {
        index,
        joints: extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm() -> JointSchema {
        JointSchema::from_names(["shoulder_pan", "shoulder_lift", "elbow"]).unwrap()
    }

    #[test]
    fn test_row_follows_schema_order() {
        let state = JointState::named([("elbow", 0.3), ("shoulder_pan", 0.1), ("shoulder_lift", 0.2)]);
        let row = validate_timestep(&arm(), &state, 0).unwrap();
        assert_eq!(row, vec![0.1, 0.2, 0.3]);

        let state = JointState::positional(["elbow", "shoulder_lift", "shoulder_pan"], [3.0, 2.0, 1.0]);
        let row = validate_timestep(&arm(), &state, 0).unwrap();
        assert_eq!(row, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_joint() {
        let state = JointState::named([("shoulder_pan", 0.0), ("elbow", 0.0)]);
        match validate_timestep(&arm(), &state, 0).unwrap_err() {
            ExportError::MissingJoint { index, joints } => {
                assert_eq!(index, 0);
                assert_eq!(joints, vec!["shoulder_lift".to_string()]);
            },
            other => panic!("Expected MissingJoint, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_joint() {
        let state = JointState::named([
            ("shoulder_pan", 0.0),
            ("shoulder_lift", 0.0),
            ("elbow", 0.0),
            ("wrist", 0.0),
            ("gripper", 0.0),
        ]);
        match validate_timestep(&arm(), &state, 4).unwrap_err() {
            ExportError::UnexpectedJoint { index, joints } => {
                assert_eq!(index, 4);
                assert_eq!(joints, vec!["gripper".to_string(), "wrist".to_string()]);
            },
            other => panic!("Expected UnexpectedJoint, got {other:?}"),
        }
    }

    #[test]
    fn test_same_count_but_different_names() {
        // 列数相同但集合不同：缺少优先
        let state = JointState::named([("shoulder_pan", 0.0), ("shoulder_lift", 0.0), ("wrist", 0.0)]);
        assert!(matches!(
            validate_timestep(&arm(), &state, 1),
            Err(ExportError::MissingJoint { index: 1, ref joints }) if joints == &["elbow".to_string()]
        ));
    }

    #[test]
    fn test_non_finite_value() {
        let state = JointState::named([("shoulder_pan", 0.0), ("shoulder_lift", f64::NAN), ("elbow", 0.0)]);
        assert!(matches!(
            validate_timestep(&arm(), &state, 2),
            Err(ExportError::NonFiniteValue { index: 2, ref joint }) if joint == "shoulder_lift"
        ));

        let state = JointState::positional(["shoulder_pan", "shoulder_lift", "elbow"], [0.0, 0.0, f64::INFINITY]);
        assert!(matches!(
            validate_timestep(&arm(), &state, 0),
            Err(ExportError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_trajectory_fails_fast() {
        let trajectory = vec![
            JointState::named([("shoulder_pan", 0.0), ("shoulder_lift", 0.1), ("elbow", 0.0)]),
            JointState::named([("shoulder_pan", 0.0)]),
            JointState::positional(["a"], []),
        ];
        let err = validate_trajectory(&arm(), &trajectory).unwrap_err();
        assert!(matches!(err, ExportError::MissingJoint { index: 1, .. }));
    }

    #[test]
    fn test_empty_trajectory() {
        let rows = validate_trajectory(&arm(), &[]).unwrap();
        assert!(rows.is_empty());
    }
}
