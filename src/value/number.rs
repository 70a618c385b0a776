//! Numeric scalars.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
enum N {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

/// Number is a numeric scalar.
///
/// Besides its value it keeps the text it was written as, so `1.10` is
/// written back as `1.10` and `1e3` as `1e3`. Numbers built in memory carry
/// their shortest form.
#[derive(Debug, Clone)]
pub struct Number {
    n: N,
    text: String,
}

impl Number {
    /// The number as written in its source document.
    pub fn as_text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

// Equal values compare equal whatever their spelling.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
    }
}

impl From<u64> for Number {
    fn from(u: u64) -> Self {
        Number {
            n: N::PosInt(u),
            text: u.to_string(),
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        if i >= 0 {
            return Number::from(i as u64);
        }
        Number {
            n: N::NegInt(i),
            text: i.to_string(),
        }
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        let text = if f.is_nan() {
            ".nan".to_string()
        } else if f == f64::INFINITY {
            ".inf".to_string()
        } else if f == f64::NEG_INFINITY {
            "-.inf".to_string()
        } else {
            format!("{:?}", f)
        };
        Number {
            n: N::Float(f),
            text,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.n {
            N::PosInt(u) => serializer.serialize_u64(u),
            N::NegInt(i) => serializer.serialize_i64(i),
            N::Float(f) => serializer.serialize_f64(f),
        }
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Number;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number")
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Number, E> {
        Ok(Number::from(u))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Number, E> {
        Ok(Number::from(i))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Number, E> {
        Ok(Number::from(f))
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumberVisitor)
    }
}
