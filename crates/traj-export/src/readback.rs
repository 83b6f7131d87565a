//! # 导出文件读回
//!
//! 与导出互为逆操作，用于校验导出结果（往返测试）以及重新导出。
//! 结构化编码的时间步复用导出时的校验逻辑，错误类型保持一致。

use crate::encoding::Encoding;
use crate::error::{ExportError, Result};
use crate::timestep::JointState;
use crate::validate::validate_trajectory;
use joint_schema::JointSchema;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// 读回的导出数据
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedTrajectory {
    /// 关节名（列顺序）
    pub joint_names: Vec<String>,

    /// 每个时间步一行，按 `joint_names` 顺序
    pub rows: Vec<Vec<f64>>,
}

impl ExportedTrajectory {
    /// 时间步数量
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 重建关节 schema
    pub fn schema(&self) -> Result<JointSchema> {
        Ok(JointSchema::from_names(self.joint_names.iter().cloned())?)
    }

    /// 转换为位置序列形式的轨迹（用于重新导出）
    pub fn into_trajectory(self) -> Vec<JointState> {
        let names = self.joint_names;
        self.rows
            .into_iter()
            .map(|values| JointState::Positional {
                names: names.clone(),
                values,
            })
            .collect()
    }
}

/// 读回表格编码
pub fn read_tabular(text: &str) -> Result<ExportedTrajectory> {
    let mut records = parse_records(text)?.into_iter();

    let header = records.next().ok_or_else(|| ExportError::InvalidTabular {
        line: 1,
        message: "missing header record".to_string(),
    })?;
    let schema = JointSchema::from_names(header.fields)?;

    let mut rows = Vec::new();
    for record in records {
        if record.fields.len() != schema.len() {
            return Err(ExportError::InvalidTabular {
                line: record.line,
                message: format!(
                    "expected {} fields, got {}",
                    schema.len(),
                    record.fields.len()
                ),
            });
        }

        let row = record
            .fields
            .iter()
            .map(|field| match field.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(ExportError::InvalidTabular {
                    line: record.line,
                    message: format!("invalid number {field:?}"),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    Ok(ExportedTrajectory {
        joint_names: schema.into_names(),
        rows,
    })
}

/// 读回结构化编码
pub fn read_structured(text: &str) -> Result<ExportedTrajectory> {
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Document {
        joint_names: Vec<String>,
        timesteps: Vec<HashMap<String, f64>>,
    }

    let document: Document = serde_json::from_str(text)?;
    let schema = JointSchema::from_names(document.joint_names)?;
    let trajectory: Vec<JointState> = document.timesteps.into_iter().map(JointState::Named).collect();
    let rows = validate_trajectory(&schema, &trajectory)?;

    Ok(ExportedTrajectory {
        joint_names: schema.into_names(),
        rows,
    })
}

/// 按编码读回文件
pub fn read_file<P: AsRef<Path>>(path: P, encoding: Encoding) -> Result<ExportedTrajectory> {
    let text = std::fs::read_to_string(path)?;
    match encoding {
        Encoding::Tabular => read_tabular(&text),
        Encoding::Structured => read_structured(&text),
    }
}

/// 一条 CSV 记录及其起始行号（从 1 开始）
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// 解析导出使用的 CSV 方言（支持引号字段、容忍 `\r\n`）
///
/// 单个未加引号的空字段视为空记录（空 schema 的表头）。
fn parse_records(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                },
                '"' => in_quotes = false,
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                },
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            },
            ',' => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            },
            '\r' if chars.peek() == Some(&'\n') => {},
            '\n' => {
                if !fields.is_empty() || !field.is_empty() || quoted {
                    fields.push(std::mem::take(&mut field));
                }
                records.push(Record {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
                quoted = false;
                line += 1;
                record_line = line;
            },
            _ if quoted => {
                return Err(ExportError::InvalidTabular {
                    line,
                    message: "unexpected character after closing quote".to_string(),
                });
            },
            '"' => {
                return Err(ExportError::InvalidTabular {
                    line,
                    message: "quote inside unquoted field".to_string(),
                });
            },
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ExportError::InvalidTabular {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !fields.is_empty() || !field.is_empty() || quoted {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
