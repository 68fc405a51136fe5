//! Building blocks shared by the coders
pub mod bit_codec;
pub mod adaptive_model;
