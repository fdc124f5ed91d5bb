/// Declares an immutable settings struct bound field-by-field.
///
/// Every field becomes a constructor parameter named after the field and
/// typed by its [`Bindable`](crate::Bindable) type. Fields are private and
/// exposed through read-only accessors of the same name.
///
/// ```
/// use config_binder::{bind, settings, KeyValues};
///
/// settings! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Mail {
///         server: Option<String>,
///         port: i32,
///         use_tls: Option<bool>,
///         recipients: Option<Vec<String>>,
///     }
/// }
///
/// let mail: Mail = bind(&KeyValues::from([
///     ("server", "smtp.local"),
///     ("port", "25"),
///     ("recipients", "ops@local;dev@local"),
/// ]))?;
///
/// assert_eq!(mail.server().as_deref(), Some("smtp.local"));
/// assert_eq!(*mail.port(), 25);
/// assert_eq!(*mail.use_tls(), None);
/// assert_eq!(mail.recipients().as_ref().map(Vec::len), Some(2));
/// # Ok::<(), config_binder::ConfigError>(())
/// ```
#[macro_export]
macro_rules! settings {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $field: $ty, )*
        }

        impl $name {
            $(
                $(#[$field_meta])*
                pub fn $field(&self) -> &$ty {
                    &self.$field
                }
            )*
        }

        impl $crate::Settings for $name {
            fn constructors() -> ::std::vec::Vec<$crate::Constructor<Self>> {
                ::std::vec![$crate::Constructor::new(|args: &mut $crate::Args| {
                    let _ = &args;
                    ::std::result::Result::Ok($name {
                        $( $field: args.next::<$ty>()?, )*
                    })
                })
                $( .param_of::<$ty>(::std::stringify!($field)) )*]
            }
        }
    };
}
