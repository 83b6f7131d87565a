//! URDF XML 解析
//!
//! 基于 `quick-xml` 事件流，只关心 `<robot>` 下的直接子元素 `<joint>`，
//! 其余元素（link、transmission、gazebo 等）按深度跳过。

use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::kind::JointKind;
use crate::schema::JointSchema;

const ROOT_ELEMENT: &[u8] = b"robot";
const JOINT_ELEMENT: &[u8] = b"joint";

/// 从 URDF 字符串提取受驱动关节 schema
///
/// 每次调用都重新解析，不做缓存。
///
/// # 错误
/// - XML 语法错误、根元素缺失或不是 `<robot>`
/// - `<joint>` 缺少 `name` 属性
/// - 关节名重复（无论类型）
/// - 没有任何受驱动关节
pub fn extract(document: &str) -> Result<JointSchema> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut collector = JointCollector::default();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SchemaError::Xml(format!("at byte {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(ref e) => {
                visit_element(e, depth, &mut seen_root, &mut collector)?;
                depth += 1;
            },
            Event::Empty(ref e) => {
                visit_element(e, depth, &mut seen_root, &mut collector)?;
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            },
            Event::Text(ref t) if depth == 0 && has_content(t) => {
                return Err(SchemaError::Xml("text outside of the root element".into()));
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if depth != 0 {
        return Err(SchemaError::Xml(
            "unexpected end of document inside <robot>".into(),
        ));
    }
    if !seen_root {
        return Err(SchemaError::MissingRoot);
    }

    collector.finish()
}

/// 从 URDF 文件提取受驱动关节 schema
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<JointSchema> {
    let path = path.as_ref();
    let document = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "parsing robot description");
    extract(&document)
}

/// 按深度分派元素：深度 0 为根，深度 1 为关节定义
fn visit_element(
    e: &BytesStart<'_>,
    depth: usize,
    seen_root: &mut bool,
    collector: &mut JointCollector,
) -> Result<()> {
    match depth {
        0 => {
            if *seen_root {
                return Err(SchemaError::Xml("multiple root elements".into()));
            }
            if e.name().as_ref() != ROOT_ELEMENT {
                return Err(SchemaError::UnexpectedRoot(element_name(e)));
            }
            *seen_root = true;
        },
        1 if e.name().as_ref() == JOINT_ELEMENT => collector.visit(e)?,
        _ => {},
    }
    Ok(())
}

/// 收集关节定义，记录所有已声明的名称用于重复检测
#[derive(Default)]
struct JointCollector {
    actuated: Vec<String>,
    declared: HashSet<String>,
}

impl JointCollector {
    fn visit(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let name = attribute(e, "name")?.ok_or(SchemaError::MissingAttribute {
            attribute: "name",
            element: "joint",
        })?;
        if name.is_empty() {
            return Err(SchemaError::EmptyAttribute {
                attribute: "name",
                element: "joint",
            });
        }

        // 缺少 type 视为非受驱动
        let kind = attribute(e, "type")?
            .map(|t| JointKind::parse(&t))
            .unwrap_or_else(|| JointKind::Other(String::new()));

        if !self.declared.insert(name.clone()) {
            return Err(SchemaError::DuplicateJoint(name));
        }

        if kind.is_actuated() {
            self.actuated.push(name);
        } else {
            debug!(joint = %name, kind = %kind, "skipping non-actuated joint");
        }

        Ok(())
    }

    fn finish(self) -> Result<JointSchema> {
        if self.actuated.is_empty() {
            return Err(SchemaError::NoActuatedJoints);
        }

        debug!(
            actuated = self.actuated.len(),
            declared = self.declared.len(),
            "extracted joint schema"
        );
        JointSchema::from_names(self.actuated)
    }
}

/// 读取并反转义属性值
fn attribute(e: &BytesStart<'_>, name: &'static str) -> Result<Option<String>> {
    let attr = e
        .try_get_attribute(name)
        .map_err(|err| SchemaError::Xml(format!("invalid attribute on <{}>: {err}", element_name(e))))?;

    match attr {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|err| SchemaError::Xml(format!("invalid value for `{name}`: {err}")))?;
            Ok(Some(value.into_owned()))
        },
        None => Ok(None),
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn has_content(text: &BytesText<'_>) -> bool {
    text.iter().any(|b| !b.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARM: &str = r#"<?xml version="1.0"?>
<robot name="test_robot">
  <link name="base"/>
  <joint name="joint_a" type="revolute">
    <parent link="base"/>
    <child link="link1"/>
    <axis xyz="0 0 1"/>
    <limit lower="-1.57" upper="1.57" effort="1" velocity="1"/>
  </joint>
  <joint name="fixed_joint" type="fixed">
    <parent link="link1"/>
    <child link="link2"/>
  </joint>
  <joint name="joint_b" type="continuous">
    <parent link="link2"/>
    <child link="link3"/>
    <axis xyz="0 1 0"/>
  </joint>
</robot>
"#;

    #[test]
    fn test_extract_actuated_in_document_order() {
        let schema = extract(ARM).unwrap();
        assert_eq!(schema.names(), ["joint_a", "joint_b"]);
        assert!(!schema.contains("fixed_joint"));
    }

    #[test]
    fn test_prismatic_and_unknown_types() {
        let xml = r#"
            <robot name="r">
                <joint name="slide" type="prismatic"/>
                <joint name="free" type="floating"/>
                <joint name="flat" type="planar"/>
                <joint name="odd" type="screw"/>
                <joint name="untyped"/>
                <joint name="spin" type="Continuous"/>
            </robot>
        "#;
        let schema = extract(xml).unwrap();
        assert_eq!(schema.names(), ["slide", "spin"]);
    }

    #[test]
    fn test_transmission_joints_are_not_definitions() {
        let xml = r#"
            <robot name="r">
                <joint name="j1" type="revolute"/>
                <transmission name="t1">
                    <joint name="j1">
                        <hardwareInterface>EffortJointInterface</hardwareInterface>
                    </joint>
                    <joint name="phantom" type="revolute"/>
                </transmission>
            </robot>
        "#;
        let schema = extract(xml).unwrap();
        assert_eq!(schema.names(), ["j1"]);
    }

    #[test]
    fn test_duplicate_actuated_name() {
        let xml = r#"
            <robot name="r">
                <joint name="j1" type="revolute"/>
                <joint name="j1" type="prismatic"/>
            </robot>
        "#;
        match extract(xml).unwrap_err() {
            SchemaError::DuplicateJoint(name) => assert_eq!(name, "j1"),
            other => panic!("Expected DuplicateJoint, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_across_types() {
        let xml = r#"
            <robot name="r">
                <joint name="j1" type="fixed"/>
                <joint name="j1" type="revolute"/>
            </robot>
        "#;
        assert!(matches!(
            extract(xml),
            Err(SchemaError::DuplicateJoint(name)) if name == "j1"
        ));
    }

    #[test]
    fn test_no_actuated_joints() {
        let xml = r#"
            <robot name="fixed">
                <joint name="only_fixed" type="fixed"/>
            </robot>
        "#;
        assert!(matches!(extract(xml), Err(SchemaError::NoActuatedJoints)));
    }

    #[test]
    fn test_missing_and_empty_name() {
        let xml = r#"<robot name="r"><joint type="revolute"/></robot>"#;
        assert!(matches!(
            extract(xml),
            Err(SchemaError::MissingAttribute {
                attribute: "name",
                ..
            })
        ));

        let xml = r#"<robot name="r"><joint name="" type="revolute"/></robot>"#;
        assert!(matches!(
            extract(xml),
            Err(SchemaError::EmptyAttribute { .. })
        ));
    }

    #[test]
    fn test_malformed_documents() {
        // 标签不匹配
        assert!(matches!(
            extract(r#"<robot><joint name="a" type="revolute"></robot>"#),
            Err(SchemaError::Xml(_))
        ));
        // 文档截断
        assert!(matches!(
            extract(r#"<robot><joint name="a" type="revolute"/>"#),
            Err(SchemaError::Xml(_))
        ));
        // 多个根元素
        assert!(matches!(
            extract(r#"<robot><joint name="a" type="revolute"/></robot><robot/>"#),
            Err(SchemaError::Xml(_))
        ));
        // 根元素之外的文本
        assert!(matches!(
            extract(r#"garbage <robot/>"#),
            Err(SchemaError::Xml(_))
        ));
    }

    #[test]
    fn test_root_checks() {
        assert!(matches!(extract(""), Err(SchemaError::MissingRoot)));
        assert!(matches!(
            extract(r#"<?xml version="1.0"?><!-- nothing --> "#),
            Err(SchemaError::MissingRoot)
        ));
        assert!(matches!(
            extract(r#"<sdf><joint name="a" type="revolute"/></sdf>"#),
            Err(SchemaError::UnexpectedRoot(root)) if root == "sdf"
        ));
    }

    #[test]
    fn test_attribute_unescape() {
        let xml = r#"<robot><joint name="arm&amp;hand" type="revolute"/></robot>"#;
        let schema = extract(xml).unwrap();
        assert_eq!(schema.names(), ["arm&hand"]);
    }

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robot.urdf");
        std::fs::write(&path, ARM).unwrap();

        let schema = extract_file(&path).unwrap();
        assert_eq!(schema.len(), 2);

        let missing = dir.path().join("missing.urdf");
        assert!(matches!(extract_file(missing), Err(SchemaError::Io(_))));
    }
}
