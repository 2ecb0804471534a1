//! Built-in validators.

pub mod length;

pub use length::{
    MaxLength, MinLength, NotBlank, NotEmpty, max_length, min_length, not_blank, not_empty,
};
