//! Property values and the property set stored on nodes and relationships

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::Value;

/// Errors raised when a value cannot be stored as a property
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("Integer value out of range: {0}")]
    IntegerOutOfRange(String),

    #[error("Lists cannot contain nested collections")]
    NestedCollection,

    #[error("List property items must be of similar types")]
    MixedListTypes,

    #[error("Invalid property type: {0}")]
    InvalidType(&'static str),
}

/// A value that the server can store as a property
///
/// Lists are homogeneous and never nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Short name of the variant, used for list homogeneity checks
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Boolean(b) => b.hash(state),
            Self::Integer(i) => i.hash(state),
            // 0.0 == -0.0, so both must hash alike
            Self::Float(f) if *f == 0.0 => 0.0f64.to_bits().hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::List(items) => items.hash(state),
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Conversion of arbitrary values into something the server accepts as a
/// property
///
/// `Ok(None)` means the value is null, which a [`PropertySet`] treats as
/// "no such key".
pub trait CastProperty {
    /// # Errors
    /// Returns an error if the value has no property representation.
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError>;
}

impl CastProperty for PropertyValue {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        match self {
            Self::List(items) => cast_list(items).map(Some),
            other => Ok(Some(other)),
        }
    }
}

macro_rules! cast_lossless {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl CastProperty for $ty {
                fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
                    Ok(Some(PropertyValue::$variant(<$target>::from(self))))
                }
            }

            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

cast_lossless! {
    bool => Boolean as bool,
    i8 => Integer as i64,
    i16 => Integer as i64,
    i32 => Integer as i64,
    i64 => Integer as i64,
    u8 => Integer as i64,
    u16 => Integer as i64,
    u32 => Integer as i64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => String as String,
}

macro_rules! cast_ranged {
    ($($ty:ty),*) => {
        $(
            impl CastProperty for $ty {
                fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
                    i64::try_from(self)
                        .map(|i| Some(PropertyValue::Integer(i)))
                        .map_err(|_| PropertyError::IntegerOutOfRange(self.to_string()))
                }
            }
        )*
    };
}

cast_ranged!(u64, usize, i128, u128, isize);

impl CastProperty for &str {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        Ok(Some(PropertyValue::String(self.to_string())))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl CastProperty for NaiveDate {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        Ok(Some(PropertyValue::String(self.format("%Y-%m-%d").to_string())))
    }
}

impl CastProperty for NaiveTime {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        Ok(Some(PropertyValue::String(self.format("%H:%M:%S%.f").to_string())))
    }
}

impl CastProperty for NaiveDateTime {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        Ok(Some(PropertyValue::String(
            self.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        )))
    }
}

impl<Tz: TimeZone> CastProperty for DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        Ok(Some(PropertyValue::String(self.to_rfc3339())))
    }
}

impl<T: CastProperty> CastProperty for Option<T> {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        match self {
            Some(value) => value.cast_property(),
            None => Ok(None),
        }
    }
}

impl<T: CastProperty> CastProperty for Vec<T> {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        let items = self
            .into_iter()
            .map(|item| {
                item.cast_property()?
                    .ok_or(PropertyError::InvalidType("null list item"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        cast_list(items).map(Some)
    }
}

impl CastProperty for Value {
    fn cast_property(self) -> Result<Option<PropertyValue>, PropertyError> {
        match self {
            Value::Null => Ok(None),
            Value::Boolean(b) => Ok(Some(PropertyValue::Boolean(b))),
            Value::Integer(i) => Ok(Some(PropertyValue::Integer(i))),
            Value::Float(f) => Ok(Some(PropertyValue::Float(f))),
            Value::String(s) => Ok(Some(PropertyValue::String(s))),
            Value::List(items) => items.cast_property(),
            Value::Map(_) => Err(PropertyError::InvalidType("map")),
            Value::Node(_) => Err(PropertyError::InvalidType("node")),
            Value::Relationship(_) => Err(PropertyError::InvalidType("relationship")),
            Value::Path(_) => Err(PropertyError::InvalidType("path")),
        }
    }
}

/// Check that list items share one type and contain no nested lists
fn cast_list(items: Vec<PropertyValue>) -> Result<PropertyValue, PropertyError> {
    let mut list_type: Option<&'static str> = None;
    for item in &items {
        let item_type = item.type_name();
        match list_type {
            None if item_type == "list" => return Err(PropertyError::NestedCollection),
            None => list_type = Some(item_type),
            Some(expected) if expected != item_type => {
                return Err(PropertyError::MixedListTypes)
            }
            Some(_) => {}
        }
    }
    Ok(PropertyValue::List(items))
}

/// Property map where a null value and a missing key are the same thing
///
/// Every way in goes through [`CastProperty`], deserialization included.
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, PropertyValue>",
    into = "BTreeMap<String, PropertyValue>"
)]
pub struct PropertySet {
    inner: BTreeMap<String, PropertyValue>,
}

impl PropertySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `pairs` with the rules of [`Self::update`]
    ///
    /// # Errors
    /// Returns the first casting error.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self, PropertyError>
    where
        K: Into<String>,
        V: CastProperty,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut properties = Self::new();
        properties.update(pairs)?;
        Ok(properties)
    }

    /// Value for `key`, or `None` if absent
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.inner.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Set a property, removing the key when the value is null
    ///
    /// # Errors
    /// Returns an error if the value cannot be stored as a property.
    pub fn set<V: CastProperty>(
        &mut self,
        key: impl Into<String>,
        value: V,
    ) -> Result<(), PropertyError> {
        let key = key.into();
        match value.cast_property()? {
            Some(value) => {
                self.inner.insert(key, value);
            }
            None => {
                self.inner.remove(&key);
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.inner.remove(key)
    }

    /// Set every pair, applying the same null rule as [`Self::set`]
    ///
    /// # Errors
    /// Returns the first casting error; earlier pairs stay applied.
    pub fn update<K, V, I>(&mut self, pairs: I) -> Result<(), PropertyError>
    where
        K: Into<String>,
        V: CastProperty,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Clear the set and then update it from `pairs`
    ///
    /// # Errors
    /// Returns the first casting error.
    pub fn replace<K, V, I>(&mut self, pairs: I) -> Result<(), PropertyError>
    where
        K: Into<String>,
        V: CastProperty,
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.clear();
        self.update(pairs)
    }

    /// Return the existing value, or insert `default` unless it is null
    ///
    /// # Errors
    /// Returns an error if `default` has to be inserted and cannot be cast.
    pub fn setdefault<V: CastProperty>(
        &mut self,
        key: impl Into<String>,
        default: V,
    ) -> Result<Option<PropertyValue>, PropertyError> {
        let key = key.into();
        if let Some(existing) = self.inner.get(&key) {
            return Ok(Some(existing.clone()));
        }
        match default.cast_property()? {
            Some(value) => {
                self.inner.insert(key, value.clone());
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Copy every property of `other` into this set, overwriting shared keys
    pub fn merge(&mut self, other: PropertySet) {
        self.inner.extend(other.inner);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.inner.iter()
    }
}

impl TryFrom<BTreeMap<String, PropertyValue>> for PropertySet {
    type Error = PropertyError;

    fn try_from(map: BTreeMap<String, PropertyValue>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<PropertySet> for BTreeMap<String, PropertyValue> {
    fn from(properties: PropertySet) -> Self {
        properties.inner
    }
}

impl IntoIterator for PropertySet {
    type Item = (String, PropertyValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl std::fmt::Display for PropertySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.inner.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
