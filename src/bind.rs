use std::fmt;

/// A scalar value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Null,
    String(String),
    Bool(bool),
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

pub type Binds = Vec<Bind>;

impl Bind {
    pub fn is_null(&self) -> bool {
        matches!(self, Bind::Null)
    }

    /// Integer view of a value read back from a connection. Drivers often
    /// return aggregates as strings, so digit strings convert too.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Bind::Bool(value) => Some(i64::from(*value)),
            Bind::I8(value) => Some(i64::from(*value)),
            Bind::I16(value) => Some(i64::from(*value)),
            Bind::I32(value) => Some(i64::from(*value)),
            Bind::I64(value) => Some(*value),
            Bind::U8(value) => Some(i64::from(*value)),
            Bind::U16(value) => Some(i64::from(*value)),
            Bind::U32(value) => Some(i64::from(*value)),
            Bind::U64(value) => i64::try_from(*value).ok(),
            Bind::F32(value) => Some(*value as i64),
            Bind::F64(value) => Some(*value as i64),
            Bind::String(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Renders the value the way it appears inside the quotes of a debug
/// statement: null and false are empty, true is `1`.
impl fmt::Display for Bind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bind::Null => Ok(()),
            Bind::String(value) => f.write_str(value),
            Bind::Bool(true) => f.write_str("1"),
            Bind::Bool(false) => Ok(()),
            Bind::F32(value) => write!(f, "{value}"),
            Bind::F64(value) => write!(f, "{value}"),
            Bind::I8(value) => write!(f, "{value}"),
            Bind::I16(value) => write!(f, "{value}"),
            Bind::I32(value) => write!(f, "{value}"),
            Bind::I64(value) => write!(f, "{value}"),
            Bind::U8(value) => write!(f, "{value}"),
            Bind::U16(value) => write!(f, "{value}"),
            Bind::U32(value) => write!(f, "{value}"),
            Bind::U64(value) => write!(f, "{value}"),
            #[cfg(feature = "json")]
            Bind::Json(value) => write!(f, "{value}"),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Bind {
                #[inline]
                fn from(value: $ty) -> Self {
                    Bind::$variant(value)
                }
            }
        )+
    };
}

impl_from_scalar! {
    bool => Bool,
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    String => String,
}

impl From<&str> for Bind {
    fn from(value: &str) -> Self {
        Bind::String(value.to_owned())
    }
}

impl From<&String> for Bind {
    fn from(value: &String) -> Self {
        Bind::String(value.clone())
    }
}

impl From<usize> for Bind {
    fn from(value: usize) -> Self {
        Bind::U64(value as u64)
    }
}

impl From<isize> for Bind {
    fn from(value: isize) -> Self {
        Bind::I64(value as i64)
    }
}

impl<T> From<Option<T>> for Bind
where
    T: Into<Bind>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Bind::Null, Into::into)
    }
}

#[cfg(feature = "chrono")]
mod chrono_binds {
    use super::Bind;

    impl From<chrono::NaiveDate> for Bind {
        fn from(value: chrono::NaiveDate) -> Self {
            Bind::String(value.to_string())
        }
    }

    impl From<chrono::NaiveTime> for Bind {
        fn from(value: chrono::NaiveTime) -> Self {
            Bind::String(value.to_string())
        }
    }

    impl From<chrono::NaiveDateTime> for Bind {
        fn from(value: chrono::NaiveDateTime) -> Self {
            Bind::String(value.to_string())
        }
    }

    impl From<chrono::DateTime<chrono::Utc>> for Bind {
        fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
            Bind::String(value.naive_utc().to_string())
        }
    }
}

#[cfg(feature = "time")]
mod time_binds {
    use super::Bind;

    impl From<time::Date> for Bind {
        fn from(value: time::Date) -> Self {
            Bind::String(value.to_string())
        }
    }

    impl From<time::Time> for Bind {
        fn from(value: time::Time) -> Self {
            Bind::String(value.to_string())
        }
    }

    impl From<time::PrimitiveDateTime> for Bind {
        fn from(value: time::PrimitiveDateTime) -> Self {
            Bind::String(value.to_string())
        }
    }

    impl From<time::OffsetDateTime> for Bind {
        fn from(value: time::OffsetDateTime) -> Self {
            Bind::String(value.to_string())
        }
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Bind {
    fn from(value: uuid::Uuid) -> Self {
        Bind::String(value.hyphenated().to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Bind {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Bind::Null,
            Value::Bool(value) => Bind::Bool(value),
            Value::String(value) => Bind::String(value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Bind::I64(value)
                } else if let Some(value) = number.as_u64() {
                    Bind::U64(value)
                } else {
                    number.as_f64().map_or(Bind::Null, Bind::F64)
                }
            }
            other => Bind::Json(other),
        }
    }
}

pub trait IntoBind {
    fn into_bind(self) -> Bind;
}

impl<T> IntoBind for T
where
    T: Into<Bind>,
{
    #[inline]
    fn into_bind(self) -> Bind {
        self.into()
    }
}

/// A sequence of values, as taken by `where_in` and raw fragments.
pub trait IntoBinds {
    fn into_binds(self) -> Binds;
}

impl IntoBinds for () {
    fn into_binds(self) -> Binds {
        Binds::new()
    }
}

impl<T> IntoBinds for Vec<T>
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        self.into_iter().map(IntoBind::into_bind).collect()
    }
}

impl<T, const N: usize> IntoBinds for [T; N]
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        self.into_iter().map(IntoBind::into_bind).collect()
    }
}

impl<T> IntoBinds for &[T]
where
    T: IntoBind + Clone,
{
    fn into_binds(self) -> Binds {
        self.iter().cloned().map(IntoBind::into_bind).collect()
    }
}
