//! Helper macro generating port error enums with `snake_case` constructors.

/// Declare a `thiserror` enum whose variants each get a constructor named
/// after the variant in `snake_case`. Struct-variant fields are accepted as
/// `impl Into<T>` so call sites can pass `&str` for `String` fields.
macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),+ } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),+ } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Offline => "port offline",
            Io { message: String } => "io: {message}",
            Rejected { status: u16, description: String } => "rejected ({status}): {description}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::offline().to_string(), "port offline");
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(SamplePortError::io("disk full").to_string(), "io: disk full");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::rejected(403_u16, "bot was blocked");
        assert_eq!(err.to_string(), "rejected (403): bot was blocked");
        assert!(matches!(err, SamplePortError::Rejected { status: 403, .. }));
    }
}
