use std::fmt;

use smol_str::SmolStr;

/// Arbitrary-precision JSON number, stored as its canonical decimal literal.
///
/// Keeping the exact digits means integers, longs, doubles and big decimals
/// all round-trip through the same node variant without floating rounding
/// artifacts. Equality compares literals, so `1.0` and `1` are distinct.
///
/// # Examples
/// ```
/// use bidijson::JsonNumber;
///
/// let n = JsonNumber::from_literal("123456789123456789.01234567890123456789").unwrap();
/// assert_eq!(n.to_string(), "123456789123456789.01234567890123456789");
/// assert_eq!(JsonNumber::from(42).as_i64(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonNumber {
    literal: SmolStr,
}

impl JsonNumber {
    /// Accept a decimal literal: optional leading `-`, digits, optional
    /// fractional part, optional exponent. Anything else is rejected.
    pub fn from_literal(text: &str) -> Option<Self> {
        if is_valid_literal(text.as_bytes()) {
            Some(Self {
                literal: SmolStr::new(text),
            })
        } else {
            None
        }
    }

    /// Finite floats only; the literal is the shortest exact representation.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let mut buffer = ryu::Buffer::new();
        Some(Self {
            literal: SmolStr::new(buffer.format(value)),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.literal
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.literal.parse().ok()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.literal.parse().ok()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.literal.parse().ok()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.literal.parse().ok()
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}

impl From<i32> for JsonNumber {
    fn from(n: i32) -> Self {
        JsonNumber::from(n as i64)
    }
}

impl From<i64> for JsonNumber {
    fn from(n: i64) -> Self {
        let mut buffer = itoa::Buffer::new();
        Self {
            literal: SmolStr::new(buffer.format(n)),
        }
    }
}

impl From<u64> for JsonNumber {
    fn from(n: u64) -> Self {
        let mut buffer = itoa::Buffer::new();
        Self {
            literal: SmolStr::new(buffer.format(n)),
        }
    }
}

fn is_valid_literal(bytes: &[u8]) -> bool {
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i = 1;
    }
    let digits = count_digits(bytes, i);
    if digits == 0 {
        return false;
    }
    i += digits;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let digits = count_digits(bytes, i);
        if digits == 0 {
            return false;
        }
        i += digits;
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let digits = count_digits(bytes, i);
        if digits == 0 {
            return false;
        }
        i += digits;
    }
    i == bytes.len()
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .take_while(|byte| byte.is_ascii_digit())
        .count()
}
