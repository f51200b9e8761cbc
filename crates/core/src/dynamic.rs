use common::error::Error;

/// A runtime-tagged value, as an interpreter for a dynamic language sees it.
///
/// The concrete type is only known once the tag is inspected, so every
/// arithmetic operation starts with a dispatch on both operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Box<str>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
        }
    }

    /// Dynamic `+`: integer addition stays integral, any float operand
    /// promotes the result to float, strings do not mix with numbers.
    ///
    /// # Errors
    /// Returns `Error::TypeMismatch` for unsupported operand pairs and
    /// `Error::IntegerOverflow` when an `Int + Int` overflows.
    pub fn add(&self, other: &Value) -> Result<Value, Error> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(*b)
                .map(Value::Int)
                .ok_or(Error::IntegerOverflow),
            (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 + b)),
            (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a + *b as f64)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b).into())),
            (left, right) => Err(Error::TypeMismatch {
                left: left.type_name(),
                right: right.type_name(),
            }),
        }
    }

    /// Converts a numeric value to `f64`.
    pub fn as_f64(&self) -> Result<f64, Error> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            Value::Str(_) => Err(Error::TypeMismatch {
                left: self.type_name(),
                right: "float",
            }),
        }
    }
}

/// A list in which each element lives in its own heap allocation.
///
/// This is the boxed counterpart of a flat `&[f64]`: traversal chases one
/// pointer per element and each element carries a type tag.
#[derive(Debug, Clone, Default)]
pub struct DynamicList {
    items: Vec<Box<Value>>,
}

impl DynamicList {
    /// Boxes every element of `values` as a `Value::Float`.
    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            items: values.iter().map(|&v| Box::new(Value::Float(v))).collect(),
        }
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            items: values.into_iter().map(Box::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Interpreter-style sum.
    ///
    /// Starts from `Int(0)` and folds with [`Value::add`]. Every intermediate
    /// result is boxed into a fresh allocation, mirroring how a dynamic
    /// runtime materialises each partial sum as a new object. An empty list
    /// sums to `Int(0)`.
    ///
    /// # Errors
    /// Propagates the first error returned by [`Value::add`].
    pub fn sum(&self) -> Result<Value, Error> {
        let mut acc = Box::new(Value::Int(0));
        for item in &self.items {
            acc = Box::new(acc.add(item)?);
        }
        Ok(*acc)
    }
}
