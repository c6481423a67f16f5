mod number;

pub use number::JsonNumber;
