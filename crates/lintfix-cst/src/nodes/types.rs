// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Type attribution carried by the tree.
//!
//! The parser attaches a best-effort [`JavaType`] to names, literals and class
//! declarations. Nothing in this crate computes types; rules only read them,
//! chiefly to find the members a class inherits from its supertypes.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Primitive types, including `void` for method return types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }
}

/// Declaration flags of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
}

/// A field of a class type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    pub name: String,
    #[serde(default)]
    pub ty: JavaType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<Flag>,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: JavaType, flags: Vec<Flag>) -> Self {
        Var {
            name: name.into(),
            ty,
            flags,
        }
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}

/// What kind of type a class declaration introduces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "@interface",
        }
    }
}

/// A resolved class, interface, enum or annotation type.
///
/// Two class types are equal when their fully qualified names are equal;
/// members and supertypes are not compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassType {
    pub fully_qualified_name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<Arc<ClassType>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Var>,
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.fully_qualified_name == other.fully_qualified_name
    }
}

impl Eq for ClassType {}

impl ClassType {
    pub fn new(fully_qualified_name: impl Into<String>) -> Self {
        ClassType {
            fully_qualified_name: fully_qualified_name.into(),
            kind: ClassKind::Class,
            supertype: None,
            members: Vec::new(),
        }
    }

    pub fn with_supertype(mut self, supertype: Arc<ClassType>) -> Self {
        self.supertype = Some(supertype);
        self
    }

    pub fn with_members(mut self, members: Vec<Var>) -> Self {
        self.members = members;
        self
    }

    /// The name after the last `.` or `$`.
    pub fn simple_name(&self) -> &str {
        self.fully_qualified_name
            .rsplit(['.', '$'])
            .next()
            .unwrap_or(&self.fully_qualified_name)
    }

    /// Members inherited from the supertype chain and visible in this class.
    ///
    /// Supertypes are searched nearest first. A name declared by this class,
    /// or already seen in a closer supertype, hides farther members of the
    /// same name. Private members are never visible, but they still hide.
    pub fn visible_supertype_members(&self) -> Vec<Var> {
        let mut seen: HashSet<&str> = self.members.iter().map(|m| m.name.as_str()).collect();
        let mut visible = Vec::new();
        let mut current = self.supertype.as_deref();
        while let Some(supertype) = current {
            for member in &supertype.members {
                if !seen.insert(member.name.as_str()) {
                    continue;
                }
                if !member.has_flag(Flag::Private) {
                    visible.push(member.clone());
                }
            }
            current = supertype.supertype.as_deref();
        }
        visible
    }
}

/// Best-effort type of an expression or declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JavaType {
    Primitive(Primitive),
    Class(Arc<ClassType>),
    #[default]
    Unknown,
}

impl JavaType {
    pub fn class(class: ClassType) -> Self {
        JavaType::Class(Arc::new(class))
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            JavaType::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Primitive(Primitive::Void))
    }

    /// Inherited members visible in this type; empty for non-class types.
    pub fn visible_supertype_members(&self) -> Vec<Var> {
        self.as_class()
            .map(ClassType::visible_supertype_members)
            .unwrap_or_default()
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(p) => f.write_str(p.keyword()),
            JavaType::Class(c) => f.write_str(&c.fully_qualified_name),
            JavaType::Unknown => f.write_str("<unknown>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> JavaType {
        JavaType::Primitive(Primitive::Int)
    }

    fn field(name: &str, flags: Vec<Flag>) -> Var {
        Var::new(name, int(), flags)
    }

    fn names(vars: &[Var]) -> Vec<&str> {
        vars.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_class_types_compare_by_name() {
        let a = ClassType::new("p.A").with_members(vec![field("x", vec![])]);
        let b = ClassType::new("p.A");
        assert_eq!(a, b);
        assert_ne!(a, ClassType::new("p.B"));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(ClassType::new("a.b.Outer$Inner").simple_name(), "Inner");
        assert_eq!(ClassType::new("Top").simple_name(), "Top");
    }

    #[test]
    fn test_visible_members_skip_private_and_redeclared() {
        let base = Arc::new(ClassType::new("B").with_members(vec![
            field("n", vec![Flag::Protected]),
            field("n2", vec![Flag::Protected]),
            field("n4", vec![Flag::Private]),
        ]));
        let derived = ClassType::new("A")
            .with_supertype(base)
            .with_members(vec![field("n", vec![])]);
        assert_eq!(names(&derived.visible_supertype_members()), vec!["n2"]);
    }

    #[test]
    fn test_closer_supertype_hides_farther_member() {
        let root = Arc::new(ClassType::new("C").with_members(vec![
            field("a", vec![Flag::Public]),
            field("b", vec![Flag::Public]),
            field("c", vec![]),
        ]));
        let middle = Arc::new(
            ClassType::new("B")
                .with_supertype(root)
                .with_members(vec![field("a", vec![Flag::Private]), field("c", vec![])]),
        );
        let leaf = ClassType::new("A").with_supertype(middle);
        // `a` is private in B, which still hides C.a.
        assert_eq!(names(&leaf.visible_supertype_members()), vec!["c", "b"]);
    }

    #[test]
    fn test_non_class_types_have_no_members() {
        assert!(int().visible_supertype_members().is_empty());
        assert!(JavaType::Unknown.visible_supertype_members().is_empty());
    }

    #[test]
    fn test_java_type_json_shape() {
        let json = serde_json::to_string(&JavaType::Primitive(Primitive::Void)).unwrap();
        assert_eq!(json, r#"{"primitive":"void"}"#);
        let ty: JavaType = serde_json::from_str(r#""unknown""#).unwrap();
        assert_eq!(ty, JavaType::Unknown);
        let ty: JavaType =
            serde_json::from_str(r#"{"class":{"fully_qualified_name":"p.A"}}"#).unwrap();
        assert_eq!(ty.as_class().map(ClassType::simple_name), Some("A"));
    }
}
