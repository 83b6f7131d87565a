//! # 输出编码
//!
//! ## Tabular（CSV）
//!
//! ```text
//! shoulder_pan,shoulder_lift,elbow\n     <- 表头：schema 顺序的关节名
//! 0.0,0.1,0.0\n                          <- 每个时间步一行，schema 顺序
//! 0.1,0.2,0.05\n
//! ```
//!
//! - 分隔符 `,`，每条记录（包括最后一条）以 `\n` 结尾
//! - 含 `,` `"` `\r` `\n` 的字段（以及空字段）加双引号，内部 `"` 写成 `""`
//! - 数值使用 `ryu` 的最短往返表示（`0.0`、`0.05`、`1e-7`），读回后逐位相等
//!
//! ## Structured（JSON）
//!
//! ```text
//! {
//!   "joint_names": ["shoulder_pan", ...],
//!   "timesteps": [{"shoulder_pan": 0.0, ...}, ...]
//! }
//! ```
//!
//! 每个时间步对象的键按 schema 顺序输出，文档以 `\n` 结尾。

use crate::error::{ExportError, Result};
use joint_schema::JointSchema;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// 表格编码的字段分隔符
pub const FIELD_SEPARATOR: u8 = b',';

/// 表格编码的行结束符
pub const LINE_TERMINATOR: &[u8] = b"\n";

/// 结构化编码中关节名列表的键
pub const JOINT_NAMES_KEY: &str = "joint_names";

/// 结构化编码中时间步列表的键
pub const TIMESTEPS_KEY: &str = "timesteps";

/// 输出编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Encoding {
    /// CSV
    #[default]
    Tabular,
    /// JSON
    Structured,
}

impl Encoding {
    /// 根据文件扩展名推断编码（`.csv` / `.json`，忽略大小写）
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Encoding::Tabular),
            "json" => Some(Encoding::Structured),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Tabular => "tabular",
            Encoding::Structured => "structured",
        }
    }

    /// 推荐的文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::Tabular => "csv",
            Encoding::Structured => "json",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 编码名称解析错误
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown encoding {0:?}, expected one of: tabular, csv, structured, json")]
pub struct ParseEncodingError(String);

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tabular" | "csv" => Ok(Encoding::Tabular),
            "structured" | "json" => Ok(Encoding::Structured),
            _ => Err(ParseEncodingError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = ParseEncodingError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// 写出表格编码
///
/// `rows` 必须已经过校验（schema 顺序、列数一致）。
pub fn write_tabular<W: Write>(writer: &mut W, schema: &JointSchema, rows: &[Vec<f64>]) -> Result<()> {
    for (i, name) in schema.iter().enumerate() {
        if i > 0 {
            writer.write_all(&[FIELD_SEPARATOR])?;
        }
        writer.write_all(escape_field(name).as_bytes())?;
    }
    writer.write_all(LINE_TERMINATOR)?;

    let mut buffer = ryu::Buffer::new();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                writer.write_all(&[FIELD_SEPARATOR])?;
            }
            writer.write_all(buffer.format(*value).as_bytes())?;
        }
        writer.write_all(LINE_TERMINATOR)?;
    }

    Ok(())
}

/// 写出结构化编码
///
/// `pretty` 为 true 时使用两空格缩进。
pub fn write_structured<W: Write>(
    writer: &mut W,
    schema: &JointSchema,
    rows: &[Vec<f64>],
    pretty: bool,
) -> Result<()> {
    let document = StructuredDocument {
        joint_names: schema.names(),
        timesteps: Timesteps {
            names: schema.names(),
            rows,
        },
    };

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &document)?;
    } else {
        serde_json::to_writer(&mut *writer, &document)?;
    }
    writer.write_all(LINE_TERMINATOR).map_err(ExportError::from)
}

/// 按编码写出
pub fn write_encoded<W: Write>(
    writer: &mut W,
    schema: &JointSchema,
    rows: &[Vec<f64>],
    encoding: Encoding,
    pretty: bool,
) -> Result<()> {
    match encoding {
        Encoding::Tabular => write_tabular(writer, schema, rows),
        Encoding::Structured => write_structured(writer, schema, rows, pretty),
    }
}

/// CSV 字段转义
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.is_empty() {
        return Cow::Borrowed("\"\"");
    }
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// JSON 文档（借用 schema 和数据，避免拷贝）
#[derive(Serialize)]
struct StructuredDocument<'a> {
    joint_names: &'a [String],
    timesteps: Timesteps<'a>,
}

struct Timesteps<'a> {
    names: &'a [String],
    rows: &'a [Vec<f64>],
}

impl Serialize for Timesteps<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&TimestepRecord {
                names: self.names,
                values: row,
            })?;
        }
        seq.end()
    }
}

/// 单个时间步：键按 schema 顺序输出
struct TimestepRecord<'a> {
    names: &'a [String],
    values: &'a [f64],
}

impl Serialize for TimestepRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, value) in self.names.iter().zip(self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
