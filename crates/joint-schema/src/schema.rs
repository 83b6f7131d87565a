//! # 关节 Schema
//!
//! 导出时的列定义：有序、无重复的受驱动关节名列表。
//! 顺序即 URDF 中的声明顺序，是对下游可见的契约。

use crate::error::{Result, SchemaError};
use std::collections::HashMap;

/// 有序关节名列表
///
/// 内部使用 `Vec`（保持顺序）+ `HashMap`（名称 -> 列下标，检测重复）。
/// 构建后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl JointSchema {
    /// 从关节名序列构建
    ///
    /// # 错误
    /// 名称重复时返回 [`SchemaError::DuplicateJoint`]
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };

        for name in names {
            let name = name.into();
            if schema.index.contains_key(&name) {
                return Err(SchemaError::DuplicateJoint(name));
            }
            schema.index.insert(name.clone(), schema.names.len());
            schema.names.push(name);
        }

        Ok(schema)
    }

    /// 关节名（schema 顺序）
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 关节数量（即每个时间步的列数）
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 关节所在列（从 0 开始）
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

impl<'a> IntoIterator for &'a JointSchema {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_names_preserves_order() {
        let schema = JointSchema::from_names(["shoulder_pan", "shoulder_lift", "elbow"]).unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.names(), ["shoulder_pan", "shoulder_lift", "elbow"]);
        assert_eq!(schema.position("shoulder_pan"), Some(0));
        assert_eq!(schema.position("elbow"), Some(2));
        assert_eq!(schema.position("wrist"), None);
        assert!(schema.contains("shoulder_lift"));
        assert!(!schema.contains("wrist"));
    }

    #[test]
    fn test_from_names_rejects_duplicates() {
        let err = JointSchema::from_names(["a", "b", "a"]).unwrap_err();
        match err {
            SchemaError::DuplicateJoint(name) => assert_eq!(name, "a"),
            other => panic!("Expected DuplicateJoint, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_schema() {
        let schema = JointSchema::from_names(Vec::<String>::new()).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.iter().count(), 0);
    }

    #[test]
    fn test_iteration_matches_names() {
        let schema = JointSchema::from_names(["j1", "j2"]).unwrap();
        let collected: Vec<&String> = (&schema).into_iter().collect();
        assert_eq!(collected, vec!["j1", "j2"]);
        assert_eq!(schema.into_names(), vec!["j1".to_string(), "j2".to_string()]);
    }
}
