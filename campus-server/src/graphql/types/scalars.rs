use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};

use campus::pagination::MAX_PAGE_SIZE;

/// Page size for connection queries: a positive integer no greater than the
/// configured maximum. Out-of-range or non-integer input fails schema
/// validation before any resolver runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSize(pub u64);

#[Scalar(name = "PageSize")]
impl ScalarType for PageSize {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::Number(n) => {
                let size = n
                    .as_u64()
                    .ok_or_else(|| InputValueError::custom("PageSize must be a positive integer"))?;
                if size == 0 || size > MAX_PAGE_SIZE {
                    return Err(InputValueError::custom(format!(
                        "PageSize must be between 1 and {}",
                        MAX_PAGE_SIZE
                    )));
                }
                Ok(PageSize(size))
            }
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Number(self.0.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_sizes() {
        assert_eq!(PageSize::parse(Value::Number(1.into())).unwrap(), PageSize(1));
        assert_eq!(
            PageSize::parse(Value::Number(500.into())).unwrap(),
            PageSize(500)
        );
    }

    #[test]
    fn rejects_zero_and_oversized() {
        assert!(PageSize::parse(Value::Number(0.into())).is_err());
        assert!(PageSize::parse(Value::Number(501.into())).is_err());
    }

    #[test]
    fn rejects_non_integers() {
        assert!(PageSize::parse(Value::String("ten".to_string())).is_err());
        assert!(PageSize::parse(Value::Number(serde_json::Number::from_f64(2.5).unwrap())).is_err());
    }
}
