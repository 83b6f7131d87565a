//! # 时间步表示与归一化
//!
//! 单个时间步有两种物理表示，归一化后都得到同一个 `关节名 -> 数值` 映射：
//!
//! | 表示 | 结构 | 说明 |
//! |------|------|------|
//! | `Named` | `{name: value}` | 直接使用 |
//! | `Positional` | `names[i] -> values[i]` | 按下标配对，长度必须一致 |
//!
//! 数值单位：旋转关节为弧度，平移关节为长度单位，不做任何换算。

use crate::error::{ExportError, MalformedReason, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 单个时间步的关节状态
#[derive(Debug, Clone, PartialEq)]
pub enum JointState {
    /// 关节名 -> 数值
    Named(HashMap<String, f64>),

    /// 位置序列 + 解释该序列的关节名列表
    Positional { names: Vec<String>, values: Vec<f64> },
}

impl JointState {
    /// 从 `(关节名, 数值)` 对构建 `Named` 时间步
    pub fn named<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        JointState::Named(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// 构建 `Positional` 时间步（长度在归一化时校验）
    pub fn positional<N, S, V>(names: N, values: V) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = f64>,
    {
        JointState::Positional {
            names: names.into_iter().map(Into::into).collect(),
            values: values.into_iter().collect(),
        }
    }

    /// 从 JSON 记录解码
    ///
    /// 支持的形状：
    /// - `{"positions": {"j1": 0.1, ...}}`
    /// - `{"positions": [0.1, ...], "joint_names": ["j1", ...]}`
    ///
    /// 其余形状一律返回 [`ExportError::UnsupportedTimestepType`]。
    pub fn from_json(value: &Value, index: usize) -> Result<Self> {
        let Value::Object(record) = value else {
            return Err(unsupported(
                index,
                format!("expected an object, found {}", type_name(value)),
            ));
        };

        if let Some(key) = record.keys().find(|k| *k != "positions" && *k != "joint_names") {
            return Err(unsupported(index, format!("unknown field `{key}`")));
        }

        let positions = record
            .get("positions")
            .ok_or_else(|| unsupported(index, "missing `positions` field".to_string()))?;

        match (positions, record.get("joint_names")) {
            (Value::Object(map), None) => Self::from_json_map(map, index),
            (Value::Object(_), Some(_)) => Err(unsupported(
                index,
                "`joint_names` is only valid with array `positions`".to_string(),
            )),
            (Value::Array(values), Some(Value::Array(names))) => {
                let names = names
                    .iter()
                    .map(|n| {
                        n.as_str().map(str::to_string).ok_or_else(|| {
                            unsupported(
                                index,
                                format!("joint name must be a string, found {}", type_name(n)),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                let values = values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        v.as_f64().ok_or_else(|| {
                            unsupported(
                                index,
                                format!("position {i} must be a number, found {}", type_name(v)),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(JointState::Positional { names, values })
            },
            (Value::Array(_), Some(other)) => Err(unsupported(
                index,
                format!("`joint_names` must be an array, found {}", type_name(other)),
            )),
            (Value::Array(_), None) => Err(unsupported(
                index,
                "array `positions` requires `joint_names`".to_string(),
            )),
            (other, _) => Err(unsupported(
                index,
                format!(
                    "`positions` must be an object or an array, found {}",
                    type_name(other)
                ),
            )),
        }
    }

    /// 从 `{name: number}` JSON 对象解码为 `Named`
    pub fn from_json_map(map: &Map<String, Value>, index: usize) -> Result<Self> {
        let mut positions = HashMap::with_capacity(map.len());
        for (name, value) in map {
            let value = value.as_f64().ok_or_else(|| {
                unsupported(
                    index,
                    format!("value for joint {name} must be a number, found {}", type_name(value)),
                )
            })?;
            positions.insert(name.clone(), value);
        }
        Ok(JointState::Named(positions))
    }
}

/// 归一化为 `关节名 -> 数值` 映射
///
/// # 错误
/// - 位置序列长度与关节名数量不一致：[`MalformedReason::LengthMismatch`]
/// - 位置序列中同一关节名出现多次：[`MalformedReason::DuplicateName`]
pub fn normalize(state: &JointState, index: usize) -> Result<HashMap<&str, f64>> {
    match state {
        JointState::Named(positions) => {
            Ok(positions.iter().map(|(name, value)| (name.as_str(), *value)).collect())
        },
        JointState::Positional { names, values } => {
            if names.len() != values.len() {
                return Err(ExportError::MalformedTimestep {
                    index,
                    reason: MalformedReason::LengthMismatch {
                        names: names.len(),
                        values: values.len(),
                    },
                });
            }

            let mut positions = HashMap::with_capacity(names.len());
            for (name, value) in names.iter().zip(values) {
                if positions.insert(name.as_str(), *value).is_some() {
                    return Err(ExportError::MalformedTimestep {
                        index,
                        reason: MalformedReason::DuplicateName(name.clone()),
                    });
                }
            }
            Ok(positions)
        },
    }
}

fn unsupported(index: usize, detail: String) -> ExportError {
    ExportError::UnsupportedTimestepType { index, detail }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
