//! Namespaced identifiers.
//!
//! Every identifier is written as `namespace/name`, where the namespace may
//! itself contain slashes (`org/game/stone` has namespace `org/game`). The
//! first character of `name` decides what kind of identifier it is: an
//! upper-case letter names a class (`org/game/Fuel`), anything else names a
//! type (`org/game/coal`). [`TypeOrClassId`] applies that rule exactly once,
//! at parse time; everything downstream matches on the variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing or constructing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// No `/` separates namespace from name.
    #[error("identifier {0:?} has no namespace separator '/'")]
    MissingSeparator(String),
    /// Namespace part is empty.
    #[error("identifier namespace cannot be empty")]
    EmptyNamespace,
    /// Name part is empty.
    #[error("identifier name cannot be empty")]
    EmptyName,
    /// Name contains whitespace or a separator.
    #[error("identifier name {0:?} has invalid characters")]
    InvalidName(String),
    /// A type or inventory name starts with an upper-case letter.
    #[error("name {0:?} must not start with an upper-case letter")]
    ExpectedLowerCase(String),
    /// A class name does not start with an upper-case letter.
    #[error("class name {0:?} must start with an upper-case letter")]
    ExpectedUpperCase(String),
}

/// True when `name` follows the class naming convention.
pub fn is_class_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

fn split_id(input: &str) -> Result<(&str, &str), IdError> {
    let input = input.trim();
    input
        .rsplit_once('/')
        .ok_or_else(|| IdError::MissingSeparator(input.to_string()))
}

fn validate(namespace: &str, name: &str) -> Result<(), IdError> {
    if namespace.is_empty() {
        return Err(IdError::EmptyNamespace);
    }
    if name.is_empty() {
        return Err(IdError::EmptyName);
    }
    if name.chars().any(|c| c == '/' || c.is_whitespace()) {
        return Err(IdError::InvalidName(name.to_string()));
    }
    Ok(())
}

macro_rules! namespaced_id {
    ($(#[$meta:meta])* $ty:ident, class = $class:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty {
            namespace: String,
            name: String,
        }

        impl $ty {
            /// Build an identifier from its parts, validating the naming convention.
            pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, IdError> {
                let namespace = namespace.into();
                let name = name.into();
                validate(&namespace, &name)?;
                match (is_class_name(&name), $class) {
                    (true, false) => return Err(IdError::ExpectedLowerCase(name)),
                    (false, true) => return Err(IdError::ExpectedUpperCase(name)),
                    _ => {}
                }
                Ok(Self { namespace, name })
            }

            /// Parse `namespace/name`, splitting on the last `/`.
            pub fn parse(input: &str) -> Result<Self, IdError> {
                let (namespace, name) = split_id(input)?;
                Self::new(namespace, name)
            }

            /// Identifier namespace.
            pub fn namespace(&self) -> &str {
                &self.namespace
            }

            /// Identifier name.
            pub fn name(&self) -> &str {
                &self.name
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}/{}", self.namespace, self.name)
            }
        }

        impl FromStr for $ty {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.to_string()
            }
        }
    };
}

namespaced_id!(
    /// Exact kind of a block, e.g. `org/game/stone`.
    TypeId,
    class = false
);

namespaced_id!(
    /// Tag shared by zero or more block types, e.g. `org/game/Fuel`.
    ///
    /// Classes are never placed in the world; they only appear in templates.
    ClassId,
    class = true
);

namespaced_id!(
    /// Name of one of the inventories attached to a container, e.g. `org/game/storage`.
    InventoryId,
    class = false
);

/// Either an exact type or a class, as used by crafting templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeOrClassId {
    /// Matches exactly one block type.
    Type(TypeId),
    /// Matches any block type that belongs to the class.
    Class(ClassId),
}

impl TypeOrClassId {
    /// Build from parts; the case of the first letter of `name` picks the variant.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, IdError> {
        let namespace = namespace.into();
        let name = name.into();
        if is_class_name(&name) {
            ClassId::new(namespace, name).map(Self::Class)
        } else {
            TypeId::new(namespace, name).map(Self::Type)
        }
    }

    /// Parse `namespace/name`, splitting on the last `/`.
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let (namespace, name) = split_id(input)?;
        Self::new(namespace, name)
    }

    /// Namespace of whichever identifier is held.
    pub fn namespace(&self) -> &str {
        match self {
            Self::Type(id) => id.namespace(),
            Self::Class(id) => id.namespace(),
        }
    }

    /// Name of whichever identifier is held.
    pub fn name(&self) -> &str {
        match self {
            Self::Type(id) => id.name(),
            Self::Class(id) => id.name(),
        }
    }

    /// The type identifier, if this is one.
    pub fn as_type(&self) -> Option<&TypeId> {
        match self {
            Self::Type(id) => Some(id),
            Self::Class(_) => None,
        }
    }

    /// The class identifier, if this is one.
    pub fn as_class(&self) -> Option<&ClassId> {
        match self {
            Self::Type(_) => None,
            Self::Class(id) => Some(id),
        }
    }
}

impl From<TypeId> for TypeOrClassId {
    fn from(id: TypeId) -> Self {
        Self::Type(id)
    }
}

impl From<ClassId> for TypeOrClassId {
    fn from(id: ClassId) -> Self {
        Self::Class(id)
    }
}

impl fmt::Display for TypeOrClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(id) => id.fmt(f),
            Self::Class(id) => id.fmt(f),
        }
    }
}

impl FromStr for TypeOrClassId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeOrClassId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TypeOrClassId> for String {
    fn from(id: TypeOrClassId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_namespace() {
        let id = TypeId::parse("org/game/stone").unwrap();
        assert_eq!(id.namespace(), "org/game");
        assert_eq!(id.name(), "stone");
        assert_eq!(id.to_string(), "org/game/stone");
    }

    #[test]
    fn variant_follows_name_case() {
        let fuel = TypeOrClassId::parse("org/game/Fuel").unwrap();
        assert_eq!(fuel, TypeOrClassId::Class(ClassId::new("org/game", "Fuel").unwrap()));

        let coal = TypeOrClassId::parse("org/game/coal").unwrap();
        assert_eq!(coal.as_type().map(TypeId::name), Some("coal"));
        assert!(coal.as_class().is_none());
    }

    #[test]
    fn rejects_wrong_case() {
        assert_eq!(
            TypeId::parse("org/game/Stone"),
            Err(IdError::ExpectedLowerCase("Stone".into()))
        );
        assert_eq!(
            ClassId::parse("org/game/fuel"),
            Err(IdError::ExpectedUpperCase("fuel".into()))
        );
        assert!(InventoryId::parse("org/game/Storage").is_err());
    }

    #[test]
    fn rejects_malformed() {
        assert!(TypeId::parse("stone").is_err());
        assert_eq!(TypeId::parse("/stone"), Err(IdError::EmptyNamespace));
        assert_eq!(TypeId::parse("org/"), Err(IdError::EmptyName));
        assert!(TypeOrClassId::parse("").is_err());
        assert!(TypeId::new("org", "two words").is_err());
    }

    #[test]
    fn serializes_as_string() {
        let id = TypeOrClassId::parse("org/game/Fuel").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"org/game/Fuel\"");
        let back: TypeOrClassId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<TypeId>("\"org/game/Fuel\"").is_err());
    }
}
