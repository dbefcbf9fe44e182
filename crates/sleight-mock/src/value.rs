//! Opaque values flowing through the mock.
//!
//! Parameters, stub responses and recorded return values are all [`Value`]s.
//! Scalars, strings and lists compare structurally. Arbitrary Rust values can
//! ride along in two flavours:
//!
//! - [`Value::object`] wraps anything `PartialEq + Debug`; two objects are
//!   equal when they hold the same concrete type and `T::eq` says so.
//! - [`Value::handle`] wraps anything at all; two handles are equal only when
//!   they point at the same allocation (identity).
//!
//! [`Value::Null`] doubles as "absent": unstubbed members resolve to it.
//! Floats follow IEEE equality except that `NaN` equals `NaN`, so a stub
//! filter holding `NaN` matches a call passing `NaN`.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed value passed to or returned from the mock.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(Object),
    Handle(Handle),
}

impl Value {
    /// Wrap a value compared by `PartialEq`.
    pub fn object<T>(value: T) -> Self
    where
        T: Any + PartialEq + fmt::Debug + Send + Sync,
    {
        Value::Object(Object(Arc::new(value)))
    }

    /// Wrap a value compared by identity.
    pub fn handle<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Value::Handle(Handle::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the payload of an [`Value::Object`] or [`Value::Handle`].
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.downcast_ref(),
            Value::Handle(handle) => handle.downcast_ref(),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs and reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Handle(_) => "handle",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Handle(a), Value::Handle(b)) => a == b,
            _ => false,
        }
    }
}

// ── opaque payloads ──────────────────────────────────────────────────────────

/// Object-safe view of a structurally comparable payload.
///
/// Implemented for every `T: Any + PartialEq + Debug + Send + Sync`; there is
/// no need to implement it by hand.
pub trait Opaque: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_opaque(&self, other: &dyn Opaque) -> bool;
    fn type_name(&self) -> &'static str;
    fn fmt_opaque(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T> Opaque for T
where
    T: Any + PartialEq + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_opaque(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn fmt_opaque(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Shared payload compared with the payload type's own `PartialEq`.
#[derive(Clone)]
pub struct Object(Arc<dyn Opaque>);

impl Object {
    pub fn type_name(&self) -> &'static str {
        (*self.0).type_name()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        (*self.0).eq_opaque(&*other.0)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self.0).fmt_opaque(f)
    }
}

/// Shared payload compared by identity of the allocation.
#[derive(Clone)]
pub struct Handle {
    label: Cow<'static, str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Handle {
    /// Allocate a new handle labelled with the payload's type name.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            label: Cow::Borrowed(std::any::type_name::<T>()),
            inner: Arc::new(value),
        }
    }

    /// Allocate a new handle with a caller-chosen label.
    pub fn labelled<T: Any + Send + Sync>(label: impl Into<String>, value: T) -> Self {
        Self {
            label: Cow::Owned(label.into()),
            inner: Arc::new(value),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({} @ {:p})", self.label, Arc::as_ptr(&self.inner))
    }
}

// ── conversions ──────────────────────────────────────────────────────────────

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<Handle> for Value {
    fn from(handle: Handle) -> Self {
        Value::Handle(handle)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => write!(f, "{:?}", obj),
            Value::Handle(handle) => write!(f, "<handle {}>", handle.label()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("type_name", obj.type_name())?;
                map.serialize_entry("debug", &format!("{:?}", obj))?;
                map.end()
            }
            Value::Handle(handle) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "handle")?;
                map.serialize_entry("label", handle.label())?;
                map.end()
            }
        }
    }
}

// ── type arguments ───────────────────────────────────────────────────────────

/// Type identifier supplied alongside a generic-style call.
///
/// Built either from a real Rust type ([`TypeArg::of`]) or from a bare name
/// ([`TypeArg::named`]). Two arguments that both carry a `TypeId` compare by
/// it; otherwise they compare by name.
#[derive(Clone)]
pub struct TypeArg {
    name: Cow<'static, str>,
    id: Option<TypeId>,
}

impl TypeArg {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: Cow::Borrowed(std::any::type_name::<T>()),
            id: Some(TypeId::of::<T>()),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when this argument was built from `T` (or names it exactly).
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        *self == TypeArg::of::<T>()
    }
}

impl PartialEq for TypeArg {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name,
        }
    }
}

impl fmt::Debug for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeArg({})", self.name)
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for TypeArg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
