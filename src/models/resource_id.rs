//! Identifier validation for resource paths.
//!
//! Glassfrog identifies circles, projects, and people by positive integers.
//! Operations accept anything implementing [`ResourceId`] and validate it
//! before a path is built, so a malformed ID never reaches the network.

use crate::error::GlassfrogError;

/// A value that may identify a remote resource.
pub trait ResourceId {
    /// Validates the value and returns it as a positive integer.
    ///
    /// `field_name` names the argument in the error message
    /// (e.g. `"circle_id"`).
    ///
    /// # Errors
    ///
    /// Returns `GlassfrogError::Validation` if the value is not a positive
    /// integer.
    fn resource_id(&self, field_name: &str) -> Result<u64, GlassfrogError>;
}

fn invalid(field_name: &str, got: impl std::fmt::Debug) -> GlassfrogError {
    GlassfrogError::validation(format!(
        "{} must be a positive integer, got: {:?}",
        field_name, got
    ))
}

macro_rules! impl_integer {
    ($($t:ty),*) => {$(
        impl ResourceId for $t {
            fn resource_id(&self, field_name: &str) -> Result<u64, GlassfrogError> {
                match u64::try_from(*self) {
                    Ok(id) if id > 0 => Ok(id),
                    _ => Err(invalid(field_name, self)),
                }
            }
        }
    )*};
}

impl_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl ResourceId for f64 {
    fn resource_id(&self, field_name: &str) -> Result<u64, GlassfrogError> {
        // 2^53: beyond this f64 can no longer represent every integer.
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
        if self.is_finite() && self.fract() == 0.0 && *self >= 1.0 && *self <= MAX_EXACT {
            Ok(*self as u64)
        } else {
            Err(invalid(field_name, self))
        }
    }
}

impl ResourceId for str {
    fn resource_id(&self, field_name: &str) -> Result<u64, GlassfrogError> {
        // Digits only: no signs, whitespace, or path separators reach the URL.
        if self.is_empty() || !self.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(
                field_name,
                self.chars().take(50).collect::<String>(),
            ));
        }
        match self.parse::<u64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(invalid(field_name, self)),
        }
    }
}

impl ResourceId for String {
    fn resource_id(&self, field_name: &str) -> Result<u64, GlassfrogError> {
        self.as_str().resource_id(field_name)
    }
}

impl<T: ResourceId> ResourceId for Option<T> {
    fn resource_id(&self, field_name: &str) -> Result<u64, GlassfrogError> {
        match self {
            Some(inner) => inner.resource_id(field_name),
            None => Err(GlassfrogError::validation(format!(
                "{} must be a positive integer, got: null",
                field_name
            ))),
        }
    }
}

impl<T: ResourceId + ?Sized> ResourceId for &T {
    fn resource_id(&self, field_name: &str) -> Result<u64, GlassfrogError> {
        (**self).resource_id(field_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integers() {
        assert_eq!(42i32.resource_id("id").unwrap(), 42);
        assert_eq!(42u64.resource_id("id").unwrap(), 42);
        assert_eq!(7i64.resource_id("id").unwrap(), 7);
        assert!(0i32.resource_id("id").is_err());
        assert!((-1i32).resource_id("id").is_err());
        assert!(0usize.resource_id("id").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(12.0f64.resource_id("id").unwrap(), 12);
        assert!(1.5f64.resource_id("id").is_err());
        assert!(f64::NAN.resource_id("id").is_err());
        assert!(f64::INFINITY.resource_id("id").is_err());
        assert!((-3.0f64).resource_id("id").is_err());
    }

    #[test]
    fn test_strings() {
        assert_eq!("123".resource_id("id").unwrap(), 123);
        assert_eq!(String::from("9").resource_id("id").unwrap(), 9);

        let err = "abc".resource_id("circle_id").unwrap_err();
        assert!(matches!(err, GlassfrogError::Validation(_)));
        assert!(err.to_string().contains("circle_id"));

        assert!("".resource_id("id").is_err());
        assert!("0".resource_id("id").is_err());
        assert!("-1".resource_id("id").is_err());
        assert!("12 34".resource_id("id").is_err());
        assert!("../etc/passwd".resource_id("id").is_err());
        assert!("99999999999999999999999".resource_id("id").is_err());
    }

    #[test]
    fn test_option_none_is_null() {
        let err = None::<u64>.resource_id("person_id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: person_id must be a positive integer, got: null"
        );
        assert_eq!(Some(5u32).resource_id("person_id").unwrap(), 5);
    }
}
