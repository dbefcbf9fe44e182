//! Member-addressing sugar.
//!
//! `invoke!` lets a test write the call shape it would write against a real
//! collaborator; the member name is taken from the token itself.
//!
//! ```
//! use sleight_mock::{invoke, DynamicMock};
//!
//! let mock = DynamicMock::new();
//! mock.stub("SayHello").returns("Hello");
//!
//! assert_eq!(invoke!(mock.SayHello("Jane")), "Hello");
//! invoke!(mock.Greet::<String, i32>("Jane", 3));
//! invoke!(mock.FirstName = "Amir");
//! assert!(invoke!(mock.FirstName).is_null());
//! ```

/// Build a `Vec<Value>` from heterogeneous arguments.
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

/// Build a `Vec<TypeArg>` from Rust types.
#[macro_export]
macro_rules! type_args {
    ($($ty:ty),* $(,)?) => {
        ::std::vec![$($crate::TypeArg::of::<$ty>()),*]
    };
}

/// Intercept `mock.Member(..)`, `mock.Member::<T..>(..)`, `mock.Member`
/// or `mock.Member = value` on a [`DynamicMock`](crate::DynamicMock).
#[macro_export]
macro_rules! invoke {
    ($mock:ident . $member:ident :: < $($ty:ty),+ > ( $($arg:expr),* $(,)? )) => {
        $mock.call_generic(
            ::std::stringify!($member),
            $crate::type_args![$($ty),+],
            $crate::args![$($arg),*],
        )
    };
    ($mock:ident . $member:ident ( $($arg:expr),* $(,)? )) => {
        $mock.call(::std::stringify!($member), $crate::args![$($arg),*])
    };
    ($mock:ident . $member:ident = $value:expr) => {
        $mock.set(::std::stringify!($member), $value)
    };
    ($mock:ident . $member:ident) => {
        $mock.get(::std::stringify!($member))
    };
}
