use std::fmt::Display;

use crate::types::numeric::NumericKind;

/// A compile-time known scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
}

impl ConstValue {
    pub fn to_f64(&self) -> f64 {
        match self {
            ConstValue::I64(n) => *n as f64,
            ConstValue::U64(n) => *n as f64,
            ConstValue::F64(n) => *n,
            ConstValue::Bool(_) | ConstValue::Str(_) => 0.0,
        }
    }

    pub fn to_i64(&self) -> i64 {
        match self {
            ConstValue::I64(n) => *n,
            ConstValue::U64(n) => *n as i64,
            ConstValue::F64(n) => *n as i64,
            ConstValue::Bool(_) | ConstValue::Str(_) => 0,
        }
    }

    pub fn to_u64(&self) -> u64 {
        match self {
            ConstValue::I64(n) => *n as u64,
            ConstValue::U64(n) => *n,
            ConstValue::F64(n) => *n as u64,
            ConstValue::Bool(_) | ConstValue::Str(_) => 0,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ConstValue::I64(_) | ConstValue::U64(_) | ConstValue::F64(_)
        )
    }

    pub fn is_zero(&self) -> bool {
        match self {
            ConstValue::I64(n) => *n == 0,
            ConstValue::U64(n) => *n == 0,
            ConstValue::F64(n) => *n == 0.0,
            ConstValue::Bool(_) | ConstValue::Str(_) => false,
        }
    }

    /// The same number held in the variant that represents `kind`.
    pub fn cast(&self, kind: NumericKind) -> ConstValue {
        if kind.is_float() {
            ConstValue::F64(self.to_f64())
        } else if kind.is_signed_integer() {
            ConstValue::I64(self.to_i64())
        } else {
            ConstValue::U64(self.to_u64())
        }
    }

    pub fn zero_of(kind: NumericKind) -> ConstValue {
        ConstValue::I64(0).cast(kind)
    }

    /// Narrowest kind of the value's own family that holds it exactly.
    pub fn narrowest_kind(&self) -> Option<NumericKind> {
        match self {
            ConstValue::I64(n) => Some(NumericKind::signed_from_bits(bitsize_int(*n))),
            ConstValue::U64(n) => Some(NumericKind::unsigned_from_bits(bitsize_uint(*n))),
            ConstValue::F64(n) => Some(NumericKind::float_from_bits(bitsize_float(*n))),
            ConstValue::Bool(_) | ConstValue::Str(_) => None,
        }
    }
}

impl Display for ConstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstValue::Bool(b) => write!(f, "{}", b),
            ConstValue::Str(s) => write!(f, "{:?}", s),
            ConstValue::I64(n) => write!(f, "{}", n),
            ConstValue::U64(n) => write!(f, "{}", n),
            ConstValue::F64(n) => write!(f, "{:?}", n),
        }
    }
}

pub fn bitsize_int(x: i64) -> u32 {
    if i8::try_from(x).is_ok() {
        8
    } else if i16::try_from(x).is_ok() {
        16
    } else if i32::try_from(x).is_ok() {
        32
    } else {
        64
    }
}

pub fn bitsize_uint(x: u64) -> u32 {
    if u8::try_from(x).is_ok() {
        8
    } else if u16::try_from(x).is_ok() {
        16
    } else if u32::try_from(x).is_ok() {
        32
    } else {
        64
    }
}

/// 32 when the value survives a round trip through `f32` unchanged.
pub fn bitsize_float(x: f64) -> u32 {
    if (x as f32) as f64 == x {
        32
    } else {
        64
    }
}

/// Whether the float written in `text` is in range for a float of `bits`.
pub fn check_float_bits(text: &str, bits: u32) -> bool {
    let Ok(value) = text.parse::<f64>() else {
        return false;
    };
    match bits {
        32 => (value as f32).is_finite(),
        _ => value.is_finite(),
    }
}

/// Canonical scientific notation, e.g. `1.5e3`.
pub fn scientific(x: f64) -> String {
    format!("{:e}", x)
}
