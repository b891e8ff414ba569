use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

use crate::types::{PrimitiveKind, TypeRef};

/// Dynamically typed value produced by generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// Selected variant label of an enum type.
    Enum(String),
    List(Vec<Value>),
    /// Dictionary entries in insertion order; keys are unique by value equality.
    Map(Vec<(Value, Value)>),
    Object(Instance),
}

impl Value {
    /// Value a member holds right after construction, before population.
    pub fn default_for(ty: &TypeRef) -> Value {
        match ty {
            TypeRef::Primitive(kind) => match kind {
                PrimitiveKind::Bool => Value::Bool(false),
                PrimitiveKind::Char => Value::Char('\0'),
                PrimitiveKind::I16 | PrimitiveKind::I32 | PrimitiveKind::I64 => Value::Int(0),
                PrimitiveKind::U8
                | PrimitiveKind::U16
                | PrimitiveKind::U32
                | PrimitiveKind::U64 => Value::UInt(0),
                PrimitiveKind::F32 | PrimitiveKind::F64 => Value::Float(0.0),
                PrimitiveKind::String => Value::Text(String::new()),
                PrimitiveKind::Uuid => Value::Uuid(Uuid::nil()),
                PrimitiveKind::Date => Value::Date(NaiveDate::default()),
                PrimitiveKind::Time => Value::Time(NaiveTime::default()),
                PrimitiveKind::DateTime => Value::Timestamp(NaiveDateTime::default()),
            },
            TypeRef::Named(_)
            | TypeRef::Array(_)
            | TypeRef::List(_)
            | TypeRef::Set(_)
            | TypeRef::Map(_, _)
            | TypeRef::Nullable(_) => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) | Value::Enum(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Value::Object(value)
    }
}

/// A constructed object: its concrete type plus member values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    #[serde(rename = "type")]
    type_name: String,
    fields: BTreeMap<String, Value>,
}

impl Instance {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, member: &str) -> Option<&Value> {
        self.fields.get(member)
    }

    /// Member value, treating a missing member as null.
    pub fn value(&self, member: &str) -> &Value {
        self.fields.get(member).unwrap_or(&Value::Null)
    }

    /// Raw assignment; catalog-aware writes go through `TypeIntrospector::set_member`.
    pub fn set(&mut self, member: impl Into<String>, value: Value) {
        self.fields.insert(member.into(), value);
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Follow a member of object type, if it holds an object.
    pub fn object(&self, member: &str) -> Option<&Instance> {
        self.get(member).and_then(Value::as_object)
    }
}
