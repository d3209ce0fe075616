use std::fmt::Display;

/// Fixed-width numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl NumericKind {
    pub fn from_name(name: &str) -> Option<NumericKind> {
        match name {
            "i8" => Some(NumericKind::I8),
            "i16" => Some(NumericKind::I16),
            "i32" | "rune" => Some(NumericKind::I32),
            "i64" | "int" => Some(NumericKind::I64),
            "u8" | "byte" => Some(NumericKind::U8),
            "u16" => Some(NumericKind::U16),
            "u32" => Some(NumericKind::U32),
            "u64" | "uint" => Some(NumericKind::U64),
            "f32" => Some(NumericKind::F32),
            "f64" => Some(NumericKind::F64),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericKind::I8 => "i8",
            NumericKind::I16 => "i16",
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::U8 => "u8",
            NumericKind::U16 => "u16",
            NumericKind::U32 => "u32",
            NumericKind::U64 => "u64",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            NumericKind::I8 | NumericKind::U8 => 8,
            NumericKind::I16 | NumericKind::U16 => 16,
            NumericKind::I32 | NumericKind::U32 | NumericKind::F32 => 32,
            NumericKind::I64 | NumericKind::U64 | NumericKind::F64 => 64,
        }
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            NumericKind::I8 | NumericKind::I16 | NumericKind::I32 | NumericKind::I64
        )
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            NumericKind::U8 | NumericKind::U16 | NumericKind::U32 | NumericKind::U64
        )
    }

    pub fn is_integer(&self) -> bool {
        !self.is_float()
    }

    pub fn is_float(&self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }

    /// Position in the widening order. Fixed-width kinds interleave by
    /// width with signed before unsigned; floats rank above every integer.
    pub fn rank(&self) -> u8 {
        match self {
            NumericKind::I8 => 0,
            NumericKind::U8 => 1,
            NumericKind::I16 => 2,
            NumericKind::U16 => 3,
            NumericKind::I32 => 4,
            NumericKind::U32 => 5,
            NumericKind::I64 => 6,
            NumericKind::U64 => 7,
            NumericKind::F32 => 8,
            NumericKind::F64 => 9,
        }
    }

    pub fn greater_than(&self, other: &NumericKind) -> bool {
        self.rank() > other.rank()
    }

    /// Smallest value of an integer kind; zero for unsigned and float kinds.
    pub fn min_signed(&self) -> i64 {
        match self {
            NumericKind::I8 => i8::MIN as i64,
            NumericKind::I16 => i16::MIN as i64,
            NumericKind::I32 => i32::MIN as i64,
            NumericKind::I64 => i64::MIN,
            _ => 0,
        }
    }

    /// Largest value of an integer kind; zero for float kinds.
    pub fn max_unsigned(&self) -> u64 {
        match self {
            NumericKind::I8 => i8::MAX as u64,
            NumericKind::I16 => i16::MAX as u64,
            NumericKind::I32 => i32::MAX as u64,
            NumericKind::I64 => i64::MAX as u64,
            NumericKind::U8 => u8::MAX as u64,
            NumericKind::U16 => u16::MAX as u64,
            NumericKind::U32 => u32::MAX as u64,
            NumericKind::U64 => u64::MAX,
            NumericKind::F32 | NumericKind::F64 => 0,
        }
    }

    pub fn signed_from_bits(bits: u32) -> NumericKind {
        match bits {
            0..=8 => NumericKind::I8,
            9..=16 => NumericKind::I16,
            17..=32 => NumericKind::I32,
            _ => NumericKind::I64,
        }
    }

    pub fn unsigned_from_bits(bits: u32) -> NumericKind {
        match bits {
            0..=8 => NumericKind::U8,
            9..=16 => NumericKind::U16,
            17..=32 => NumericKind::U32,
            _ => NumericKind::U64,
        }
    }

    pub fn float_from_bits(bits: u32) -> NumericKind {
        if bits <= 32 {
            NumericKind::F32
        } else {
            NumericKind::F64
        }
    }
}

impl Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
