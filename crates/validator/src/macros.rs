//! `validator!`, for rules that need no configuration.

/// Declares a unit-struct rule and a `const fn` constructor for it.
///
/// The predicate receives the borrowed input; when it returns `false` the
/// rule fails with the given code and message.
///
/// ```
/// use safeact_validator::validator;
/// use safeact_validator::foundation::Validate;
///
/// validator! {
///     /// Rejects strings with no digits.
///     pub HasDigit(input: str) = input.chars().any(|c| c.is_ascii_digit());
///     fails with "has_digit", "must contain a digit";
///     fn has_digit;
/// }
///
/// assert!(has_digit().validate("r2d2").is_ok());
/// assert_eq!(has_digit().validate("rtdt").unwrap_err().code, "has_digit");
/// ```
#[macro_export]
macro_rules! validator {
    (
        $(#[$doc:meta])*
        $vis:vis $name:ident($arg:ident: $input:ty) = $check:expr;
        fails with $code:literal, $message:literal;
        fn $ctor:ident;
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            fn validate(
                &self,
                $arg: &$input,
            ) -> ::core::result::Result<(), $crate::foundation::ValidationError> {
                if $check {
                    Ok(())
                } else {
                    Err($crate::foundation::ValidationError::new($code, $message))
                }
            }
        }

        #[doc = concat!("Returns [`", stringify!($name), "`].")]
        #[must_use]
        $vis const fn $ctor() -> $name {
            $name
        }
    };
}
