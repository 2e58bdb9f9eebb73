//! Path-addressed field access for container models.
//!
//! Models expose an explicit [`AccessorTable`]: one [`FieldSpec`] per
//! addressable field, keyed by a path pattern such as `objects[].x`. A
//! concrete path like `objects[3].x` is parsed into that pattern plus the
//! index list `[3]`, which the field's getter and setter receive.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while resolving or applying a field path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Invalid field path '{0}'")]
    InvalidPath(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Field '{0}' is read-only")]
    ReadOnly(String),

    #[error("Invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },

    #[error("Expected {expected} value, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("{path}: {source}")]
    At {
        path: String,
        #[source]
        source: Box<FieldError>,
    },
}

impl FieldError {
    fn at(self, path: &str) -> Self {
        match self {
            // These already name the path
            Self::InvalidPath(_) | Self::UnknownField(_) | Self::ReadOnly(_) | Self::At { .. } => {
                self
            }
            other => Self::At {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// A dynamically typed field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(_) => None,
        }
    }

    /// Narrow an integer value to `T`
    pub fn to_int<T: TryFrom<i64>>(&self) -> Result<T, FieldError> {
        let wide = self.as_int().ok_or_else(|| FieldError::TypeMismatch {
            expected: "integer",
            found: self.to_string(),
        })?;
        T::try_from(wide).map_err(|_| FieldError::InvalidValue {
            value: wide.to_string(),
            reason: "does not fit the field".to_string(),
        })
    }

    pub fn to_bool(&self) -> Result<bool, FieldError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            other => Err(FieldError::TypeMismatch {
                expected: "boolean",
                found: other.to_string(),
            }),
        }
    }

    pub fn to_text(&self) -> Result<&str, FieldError> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(FieldError::TypeMismatch {
                expected: "text",
                found: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Type and range of a field, used to parse user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int { min: i64, max: i64 },
    Bool,
    /// ASCII text of at most `max_len` bytes
    Text { max_len: usize },
}

impl FieldKind {
    pub fn int_range(min: i64, max: i64) -> Self {
        Self::Int { min, max }
    }

    /// Parse `raw` as a value of this kind. Integers accept decimal or a
    /// `0x` hex prefix. Surrounding whitespace is ignored except in text.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, FieldError> {
        let raw = match self {
            Self::Text { .. } => raw,
            _ => raw.trim(),
        };
        let invalid = |reason: String| FieldError::InvalidValue {
            value: raw.to_string(),
            reason,
        };
        match *self {
            Self::Int { min, max } => {
                let parsed = if let Some(hex) = raw
                    .strip_prefix("0x")
                    .or_else(|| raw.strip_prefix("0X"))
                {
                    i64::from_str_radix(hex, 16)
                } else {
                    raw.parse::<i64>()
                }
                .map_err(|e| invalid(e.to_string()))?;
                if parsed < min || parsed > max {
                    return Err(invalid(format!("expected {min}..={max}")));
                }
                Ok(FieldValue::Int(parsed))
            }
            Self::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(FieldValue::Bool(true)),
                "false" | "0" | "no" => Ok(FieldValue::Bool(false)),
                _ => Err(invalid("expected true or false".to_string())),
            },
            Self::Text { max_len } => {
                if !raw.is_ascii() {
                    return Err(invalid("text must be ASCII".to_string()));
                }
                if raw.len() > max_len {
                    return Err(invalid(format!("longer than {max_len} bytes")));
                }
                Ok(FieldValue::Text(raw.to_string()))
            }
        }
    }

    /// Check an already typed value against this kind
    pub fn check(&self, value: &FieldValue) -> Result<(), FieldError> {
        match (*self, value) {
            (Self::Int { min, max }, FieldValue::Int(v)) if (min..=max).contains(v) => Ok(()),
            (Self::Bool, FieldValue::Bool(_)) => Ok(()),
            (Self::Text { max_len }, FieldValue::Text(s)) if s.is_ascii() && s.len() <= max_len => {
                Ok(())
            }
            _ => Err(FieldError::InvalidValue {
                value: value.to_string(),
                reason: format!("expected {self}"),
            }),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { min, max } => write!(f, "int {min}..={max}"),
            Self::Bool => f.write_str("bool"),
            Self::Text { max_len } => write!(f, "text <= {max_len}"),
        }
    }
}

/// A parsed `a.b[2].c` style path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    pattern: String,
    indices: Vec<usize>,
}

impl FieldPath {
    /// The path with every index blanked, e.g. `objects[].x`
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for FieldPath {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::InvalidPath(s.to_string());
        let mut pattern = String::with_capacity(s.len());
        let mut indices = Vec::new();
        let mut chars = s.chars().peekable();
        // True when the next token must start a name
        let mut expect_name = true;

        while let Some(c) = chars.next() {
            match c {
                c if c.is_ascii_alphabetic() || c == '_' => {
                    if !expect_name {
                        return Err(invalid());
                    }
                    pattern.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            pattern.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    expect_name = false;
                }
                '[' => {
                    if expect_name {
                        return Err(invalid());
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            _ => return Err(invalid()),
                        }
                    }
                    indices.push(digits.parse().map_err(|_| invalid())?);
                    pattern.push_str("[]");
                }
                '.' => {
                    if expect_name {
                        return Err(invalid());
                    }
                    pattern.push('.');
                    expect_name = true;
                }
                _ => return Err(invalid()),
            }
        }

        if expect_name {
            return Err(invalid());
        }

        Ok(Self {
            raw: s.to_string(),
            pattern,
            indices,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

pub type Getter<T> = fn(&T, &[usize]) -> Result<FieldValue, FieldError>;
pub type Setter<T> = fn(&mut T, &[usize], &FieldValue) -> Result<(), FieldError>;

/// One addressable field of a model
pub struct FieldSpec<T> {
    pub pattern: &'static str,
    pub kind: FieldKind,
    pub get: Getter<T>,
    /// `None` for read-only fields
    pub set: Option<Setter<T>>,
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("pattern", &self.pattern)
            .field("kind", &self.kind)
            .field("writable", &self.set.is_some())
            .finish()
    }
}

/// The full set of fields a model exposes
#[derive(Debug)]
pub struct AccessorTable<T> {
    specs: Vec<FieldSpec<T>>,
}

impl<T> AccessorTable<T> {
    pub fn new(specs: Vec<FieldSpec<T>>) -> Self {
        Self { specs }
    }

    /// Find the spec for a parsed path
    pub fn lookup(&self, path: &FieldPath) -> Result<&FieldSpec<T>, FieldError> {
        self.specs
            .iter()
            .find(|spec| spec.pattern == path.pattern())
            .ok_or_else(|| FieldError::UnknownField(path.to_string()))
    }

    /// Read a field
    pub fn get(&self, target: &T, path: &str) -> Result<FieldValue, FieldError> {
        let path: FieldPath = path.parse()?;
        let spec = self.lookup(&path)?;
        (spec.get)(target, path.indices()).map_err(|e| e.at(path.as_str()))
    }

    /// Parse `raw` according to the field's kind and write it. Returns the
    /// value that was stored.
    pub fn set(&self, target: &mut T, path: &str, raw: &str) -> Result<FieldValue, FieldError> {
        let path: FieldPath = path.parse()?;
        let spec = self.lookup(&path)?;
        let value = spec.kind.parse(raw).map_err(|e| e.at(path.as_str()))?;
        self.apply(spec, target, &path, &value)?;
        Ok(value)
    }

    /// Write an already typed value
    pub fn set_value(&self, target: &mut T, path: &str, value: &FieldValue) -> Result<(), FieldError> {
        let path: FieldPath = path.parse()?;
        let spec = self.lookup(&path)?;
        spec.kind.check(value).map_err(|e| e.at(path.as_str()))?;
        self.apply(spec, target, &path, value)
    }

    fn apply(
        &self,
        spec: &FieldSpec<T>,
        target: &mut T,
        path: &FieldPath,
        value: &FieldValue,
    ) -> Result<(), FieldError> {
        let setter = spec
            .set
            .ok_or_else(|| FieldError::ReadOnly(path.to_string()))?;
        setter(target, path.indices(), value).map_err(|e| e.at(path.as_str()))
    }

    pub fn specs(&self) -> &[FieldSpec<T>] {
        &self.specs
    }
}

/// Bounds-checked element access for getters
pub fn at<T>(items: &[T], index: usize) -> Result<&T, FieldError> {
    items.get(index).ok_or(FieldError::IndexOutOfRange {
        index,
        len: items.len(),
    })
}

/// Bounds-checked mutable element access for setters
pub fn at_mut<T>(items: &mut [T], index: usize) -> Result<&mut T, FieldError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(FieldError::IndexOutOfRange { index, len })
}

/// Build an integer [`FieldSpec`].
///
/// The getter expression yields the field's native integer type; the
/// optional setter receives the new value already narrowed to it.
///
/// ```
/// use gta_data::field::{at, at_mut, AccessorTable};
///
/// struct Model {
///     counts: Vec<u16>,
/// }
///
/// let table = AccessorTable::new(vec![gta_data::int_field!(
///     Model,
///     "counts[]",
///     u16,
///     |m, i| *at(&m.counts, i[0])?,
///     |m, i, v| *at_mut(&mut m.counts, i[0])? = v
/// )]);
///
/// let mut model = Model { counts: vec![1, 2] };
/// table.set(&mut model, "counts[1]", "0x10").unwrap();
/// assert_eq!(model.counts, vec![1, 16]);
/// ```
#[macro_export]
macro_rules! int_field {
    ($target:ty, $pattern:expr, $ty:ty, |$m:ident, $i:ident| $get:expr) => {
        $crate::field::FieldSpec::<$target> {
            pattern: $pattern,
            kind: $crate::field::FieldKind::int_range(<$ty>::MIN as i64, <$ty>::MAX as i64),
            get: |$m: &$target,
                  $i: &[usize]|
             -> ::std::result::Result<$crate::field::FieldValue, $crate::field::FieldError> {
                let value: $ty = $get;
                Ok($crate::field::FieldValue::Int(i64::from(value)))
            },
            set: None,
        }
    };
    ($target:ty, $pattern:expr, $ty:ty, |$m:ident, $i:ident| $get:expr, |$ms:ident, $is:ident, $v:ident| $set:expr) => {
        $crate::field::FieldSpec::<$target> {
            set: Some(
                |$ms: &mut $target,
                 $is: &[usize],
                 value: &$crate::field::FieldValue|
                 -> ::std::result::Result<(), $crate::field::FieldError> {
                    let $v: $ty = value.to_int::<$ty>()?;
                    $set;
                    Ok(())
                },
            ),
            ..$crate::int_field!($target, $pattern, $ty, |$m, $i| $get)
        }
    };
}

/// Build a boolean [`FieldSpec`], see [`int_field!`]
#[macro_export]
macro_rules! bool_field {
    ($target:ty, $pattern:expr, |$m:ident, $i:ident| $get:expr) => {
        $crate::field::FieldSpec::<$target> {
            pattern: $pattern,
            kind: $crate::field::FieldKind::Bool,
            get: |$m: &$target,
                  $i: &[usize]|
             -> ::std::result::Result<$crate::field::FieldValue, $crate::field::FieldError> {
                let value: bool = $get;
                Ok($crate::field::FieldValue::Bool(value))
            },
            set: None,
        }
    };
    ($target:ty, $pattern:expr, |$m:ident, $i:ident| $get:expr, |$ms:ident, $is:ident, $v:ident| $set:expr) => {
        $crate::field::FieldSpec::<$target> {
            set: Some(
                |$ms: &mut $target,
                 $is: &[usize],
                 value: &$crate::field::FieldValue|
                 -> ::std::result::Result<(), $crate::field::FieldError> {
                    let $v: bool = value.to_bool()?;
                    $set;
                    Ok(())
                },
            ),
            ..$crate::bool_field!($target, $pattern, |$m, $i| $get)
        }
    };
}
