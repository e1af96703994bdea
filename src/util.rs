//! Miscellaneous stuff (especially macros) which are used across the crate and needed a home

/// Builder-style setters: `name(args) => field = value` becomes `pub fn name(mut self, args) -> Self`.
macro_rules! setters {
    ( $(
        $( #[$meta:meta] )*
        $name:ident $( ( $($pname:ident: $ptype:ty),* $(,)? ) )?  => $field:ident = $value:expr
    ),* $(,)? ) => {
        $(
            $( #[$meta] )*
            pub fn $name(mut self $( , $( $pname: $ptype ),* )?) -> Self {
                self.$field = $value;
                self
            }
        )*
    };
}

/// `Debug` for types holding things that can't (or shouldn't) be printed, like surface handles.
///
/// Needs `fmt` in scope at the call site.
macro_rules! abbrev_debug {
    (
        $class:ident $( < $( $lt:lifetime ),* > )?;
        $( write $always:ident, )*
        $( ignore $ignore:ident, )*
        $( if $sometimes:ident != $default:expr, )*
    ) => {
        impl $( < $( $lt ),* > )?  fmt::Debug for $class $( < $( $lt ),* > )? {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($class), " {{ "))?;
                $(
                    write!(f, concat!(stringify!($always), ": {:?}, "), self.$always)?;
                )*
                $(
                    write!(f, concat!(stringify!($ignore), ": .., "))?;
                )*
                $(
                    if self.$sometimes != $default {
                        write!(f, concat!(stringify!($sometimes), ": {:?}, "), self.$sometimes)?;
                    }
                )*
                write!(f, ".. }}")
            }
        }
    }
}

pub(crate) use {abbrev_debug, setters};
