//! Binding of flat key-value settings into immutable settings types.
//!
//! A settings type describes itself through [`Settings::constructors`]: each
//! [`Constructor`] is an ordered list of named, typed parameters plus the
//! function that builds the value from the converted arguments. The binder
//! looks every parameter up by its exact name, converts the raw string with
//! the lenient rules from [`convert`](super::convert) and hands the results
//! to the constructor in declaration order.
//!
//! ## Example
//!
//! ```
//! use config_binder::{bind, Args, ConfigError, Constructor, KeyValues, Settings};
//!
//! struct Server {
//!     host: String,
//!     port: i32,
//! }
//!
//! impl Settings for Server {
//!     fn constructors() -> Vec<Constructor<Self>> {
//!         vec![Constructor::new(|args: &mut Args| {
//!             Ok(Server {
//!                 host: args.next::<Option<String>>()?.unwrap_or_else(|| "localhost".into()),
//!                 port: args.next()?,
//!             })
//!         })
//!         .param_of::<Option<String>>("host")
//!         .param_of::<i32>("port")]
//!     }
//! }
//!
//! let server: Server = bind(&KeyValues::from([("port", "8080")]))?;
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 8080);
//! # Ok::<(), ConfigError>(())
//! ```

use std::fmt;

use tracing::{debug, trace};

use super::convert::{convert_bool, convert_double, convert_int, convert_sequence, convert_string};
use super::source::KeyValueSource;
use super::ConfigError;

/// The declared type of a constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Int,
    Bool,
    Double,
    NullableInt,
    NullableBool,
    NullableDouble,
    StringSequence,
    IntSequence,
    BoolSequence,
    DoubleSequence,
    /// A type the binder cannot convert to, carrying its name for error reports.
    Unsupported(&'static str),
}

impl ParamType {
    pub const fn name(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Int => "int",
            ParamType::Bool => "bool",
            ParamType::Double => "double",
            ParamType::NullableInt => "int?",
            ParamType::NullableBool => "bool?",
            ParamType::NullableDouble => "double?",
            ParamType::StringSequence => "sequence of string",
            ParamType::IntSequence => "sequence of int",
            ParamType::BoolSequence => "sequence of bool",
            ParamType::DoubleSequence => "sequence of double",
            ParamType::Unsupported(name) => name,
        }
    }

    /// The argument supplied when the setting is missing from the source.
    ///
    /// Non-nullable value types get their zero value; nullable types,
    /// strings and sequences get [`Arg::Absent`].
    fn absent_value(self) -> Arg {
        match self {
            ParamType::Int => Arg::Int(0),
            ParamType::Bool => Arg::Bool(false),
            ParamType::Double => Arg::Double(0.0),
            _ => Arg::Absent,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

/// A converted argument, ready to be passed to a constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Absent,
    String(String),
    Int(i32),
    Bool(bool),
    Double(f64),
    Strings(Vec<String>),
    Ints(Vec<i32>),
    Bools(Vec<bool>),
    Doubles(Vec<f64>),
}

/// A Rust type a constructor parameter can be declared as.
///
/// Strings and sequences are optional on the Rust side because a missing
/// setting leaves them without a value rather than empty.
pub trait Bindable: Sized {
    const PARAM_TYPE: ParamType;

    /// Extracts the value, or `None` if `arg` holds a different type.
    fn from_arg(arg: Arg) -> Option<Self>;
}

macro_rules! impl_bindable {
    ($($ty:ty => $param:ident { $($pat:pat => $value:expr),+ $(,)? })+) => {
        $(
            impl Bindable for $ty {
                const PARAM_TYPE: ParamType = ParamType::$param;

                fn from_arg(arg: Arg) -> Option<Self> {
                    match arg {
                        $($pat => Some($value),)+
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_bindable! {
    i32 => Int { Arg::Int(v) => v }
    bool => Bool { Arg::Bool(v) => v }
    f64 => Double { Arg::Double(v) => v }
    Option<i32> => NullableInt { Arg::Int(v) => Some(v), Arg::Absent => None }
    Option<bool> => NullableBool { Arg::Bool(v) => Some(v), Arg::Absent => None }
    Option<f64> => NullableDouble { Arg::Double(v) => Some(v), Arg::Absent => None }
    Option<String> => String { Arg::String(v) => Some(v), Arg::Absent => None }
    Option<Vec<String>> => StringSequence { Arg::Strings(v) => Some(v), Arg::Absent => None }
    Option<Vec<i32>> => IntSequence { Arg::Ints(v) => Some(v), Arg::Absent => None }
    Option<Vec<bool>> => BoolSequence { Arg::Bools(v) => Some(v), Arg::Absent => None }
    Option<Vec<f64>> => DoubleSequence { Arg::Doubles(v) => Some(v), Arg::Absent => None }
}

/// Converted arguments, handed out in parameter declaration order.
#[derive(Debug)]
pub struct Args {
    values: std::vec::IntoIter<Arg>,
    position: usize,
}

impl Args {
    fn new(values: Vec<Arg>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Takes the next argument as `T`.
    ///
    /// Fails if the arguments are exhausted or the next one was declared with
    /// a different type than `T`.
    pub fn next<T: Bindable>(&mut self) -> Result<T, ConfigError> {
        let position = self.position;
        self.position += 1;
        self.values
            .next()
            .and_then(T::from_arg)
            .ok_or(ConfigError::ArgumentMismatch {
                position,
                expected: T::PARAM_TYPE.name(),
            })
    }

    /// Skips the next argument without converting it.
    pub fn skip(&mut self) {
        self.position += 1;
        self.values.next();
    }
}

type BuildFn<T> = fn(&mut Args) -> Result<T, ConfigError>;

/// A way of constructing `T` from a fixed, ordered parameter list.
pub struct Constructor<T> {
    params: Vec<Param>,
    build: BuildFn<T>,
}

impl<T> Constructor<T> {
    /// Creates a constructor with no parameters yet.
    ///
    /// `build` must read its arguments in the same order the parameters are
    /// declared with [`param`](Self::param).
    pub fn new(build: BuildFn<T>) -> Self {
        Self {
            params: Vec::new(),
            build,
        }
    }

    /// Declares the next parameter.
    pub fn param(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    /// Declares the next parameter with the type tag of `V`.
    pub fn param_of<V: Bindable>(self, name: impl Into<String>) -> Self {
        self.param(name, V::PARAM_TYPE)
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// An immutable settings type the binder can construct.
///
/// Exactly one constructor must be returned; any other count is rejected
/// with [`ConfigError::Shape`].
pub trait Settings: Sized {
    fn constructors() -> Vec<Constructor<Self>>;
}

/// Builds `T` from the values in `source`.
///
/// Binding only reads from `source` and is deterministic: the same source
/// always produces an equal value. Malformed values never fail a bind; they
/// convert to the zero value of their type. Errors are reserved for settings
/// types that are declared incorrectly.
pub fn bind<T: Settings>(source: &impl KeyValueSource) -> Result<T, ConfigError> {
    let settings = short_type_name::<T>();
    let constructor = single_constructor::<T>(settings)?;

    debug!(settings, params = constructor.params.len(), "binding settings");

    let values = constructor
        .params
        .iter()
        .map(|param| resolve(param, source, settings))
        .collect::<Result<Vec<_>, _>>()?;

    let value = (constructor.build)(&mut Args::new(values))?;
    debug!(settings, "settings bound");
    Ok(value)
}

fn single_constructor<T: Settings>(type_name: &'static str) -> Result<Constructor<T>, ConfigError> {
    let mut constructors = T::constructors();
    if constructors.len() != 1 {
        return Err(ConfigError::Shape {
            type_name,
            found: constructors.len(),
        });
    }
    Ok(constructors.remove(0))
}

fn resolve(
    param: &Param,
    source: &impl KeyValueSource,
    settings: &'static str,
) -> Result<Arg, ConfigError> {
    let Some(raw) = source.lookup(&param.name) else {
        trace!(settings, param = %param.name, "setting absent, using default");
        return Ok(param.ty.absent_value());
    };

    let arg = match param.ty {
        ParamType::String => Arg::String(convert_string(raw)),
        ParamType::Int | ParamType::NullableInt => Arg::Int(convert_int(raw)),
        ParamType::Bool | ParamType::NullableBool => Arg::Bool(convert_bool(raw)),
        ParamType::Double | ParamType::NullableDouble => Arg::Double(convert_double(raw)),
        ParamType::StringSequence => Arg::Strings(convert_sequence(raw, convert_string)),
        ParamType::IntSequence => Arg::Ints(convert_sequence(raw, convert_int)),
        ParamType::BoolSequence => Arg::Bools(convert_sequence(raw, convert_bool)),
        ParamType::DoubleSequence => Arg::Doubles(convert_sequence(raw, convert_double)),
        ParamType::Unsupported(type_name) => {
            return Err(ConfigError::UnsupportedType {
                param: param.name.clone(),
                type_name: type_name.to_owned(),
                settings,
            })
        }
    };
    Ok(arg)
}

/// The type name without its module path, e.g. `ServerSettings`.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::KeyValues;

    #[derive(Debug, PartialEq)]
    struct Limits {
        retries: Option<i32>,
        ratio: f64,
        enabled: bool,
    }

    impl Settings for Limits {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::new(|args| {
                Ok(Limits {
                    retries: args.next()?,
                    ratio: args.next()?,
                    enabled: args.next()?,
                })
            })
            .param_of::<Option<i32>>("retries")
            .param_of::<f64>("ratio")
            .param_of::<bool>("enabled")]
        }
    }

    struct NoConstructor;

    impl Settings for NoConstructor {
        fn constructors() -> Vec<Constructor<Self>> {
            Vec::new()
        }
    }

    struct TwoConstructors;

    impl Settings for TwoConstructors {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![
                Constructor::new(|_| Ok(TwoConstructors)),
                Constructor::new(|args| {
                    args.skip();
                    Ok(TwoConstructors)
                })
                .param_of::<i32>("value"),
            ]
        }
    }

    #[derive(Debug)]
    struct WithTimeout;

    impl Settings for WithTimeout {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::new(|args| {
                args.skip();
                Ok(WithTimeout)
            })
            .param("timeout", ParamType::Unsupported("Duration"))]
        }
    }

    struct Mismatched;

    impl Settings for Mismatched {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::new(|args| {
                let _: bool = args.next()?;
                Ok(Mismatched)
            })
            .param_of::<i32>("count")]
        }
    }

    #[test]
    fn test_binds_in_declaration_order() {
        let source = KeyValues::from([("enabled", "1"), ("ratio", "0.5"), ("retries", "3")]);
        let limits: Limits = bind(&source).unwrap();

        assert_eq!(
            limits,
            Limits {
                retries: Some(3),
                ratio: 0.5,
                enabled: true,
            }
        );
    }

    #[test]
    fn test_absent_values_use_defaults() {
        let limits: Limits = bind(&KeyValues::new()).unwrap();

        assert_eq!(
            limits,
            Limits {
                retries: None,
                ratio: 0.0,
                enabled: false,
            }
        );
    }

    #[test]
    fn test_malformed_nullable_is_present_zero() {
        let limits: Limits = bind(&KeyValues::from([("retries", "many")])).unwrap();
        assert_eq!(limits.retries, Some(0));
    }

    #[test]
    fn test_zero_constructors_is_shape_error() {
        let result = bind::<NoConstructor>(&KeyValues::new());
        assert!(matches!(
            result,
            Err(ConfigError::Shape {
                type_name: "NoConstructor",
                found: 0
            })
        ));
    }

    #[test]
    fn test_two_constructors_is_shape_error() {
        let result = bind::<TwoConstructors>(&KeyValues::from([("value", "1")]));
        assert!(matches!(result, Err(ConfigError::Shape { found: 2, .. })));
    }

    #[test]
    fn test_unsupported_type_present_fails() {
        let result = bind::<WithTimeout>(&KeyValues::from([("timeout", "30s")]));

        match result {
            Err(ConfigError::UnsupportedType {
                param,
                type_name,
                settings,
            }) => {
                assert_eq!(param, "timeout");
                assert_eq!(type_name, "Duration");
                assert_eq!(settings, "WithTimeout");
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_type_absent_is_not_converted() {
        assert!(bind::<WithTimeout>(&KeyValues::new()).is_ok());
    }

    #[test]
    fn test_constructor_reading_wrong_type() {
        let result = bind::<Mismatched>(&KeyValues::from([("count", "2")]));
        assert!(matches!(
            result,
            Err(ConfigError::ArgumentMismatch {
                position: 0,
                expected: "bool"
            })
        ));
    }

    #[test]
    fn test_bind_is_repeatable() {
        let source = KeyValues::from([("ratio", "2.25"), ("retries", "x")]);
        let first: Limits = bind(&source).unwrap();
        let second: Limits = bind(&source).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Limits>(), "Limits");
        assert_eq!(short_type_name::<i32>(), "i32");
    }
}
