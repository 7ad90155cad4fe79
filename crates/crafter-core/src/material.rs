//! Material -- a named, positive quantity of some resource.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// An immutable `(name, quantity)` pair. The quantity is always positive.
///
/// Deserialization goes through [`Material::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMaterial")]
pub struct Material {
    name: String,
    quantity: u64,
}

impl Material {
    /// Creates a material, rejecting an empty name or a quantity <= 0.
    ///
    /// The name is trimmed; surrounding whitespace is not part of it.
    pub fn new(name: impl AsRef<str>, quantity: i64) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName { quantity });
        }
        if quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity {
                name: name.to_owned(),
                quantity,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            quantity: quantity.unsigned_abs(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

#[derive(Deserialize)]
struct RawMaterial {
    name: String,
    quantity: i64,
}

impl TryFrom<RawMaterial> for Material {
    type Error = ValidationError;

    fn try_from(raw: RawMaterial) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.quantity)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}

/// Joins materials as `"<qty> <name>, <qty> <name>"`.
pub(crate) fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_quantity_then_name() {
        let m = Material::new("apple pie", 10).unwrap();
        assert_eq!(m.to_string(), "10 apple pie");
        assert_eq!(m.name(), "apple pie");
        assert_eq!(m.quantity(), 10);
    }

    #[test]
    fn trims_name() {
        let m = Material::new("  sugar ", 1).unwrap();
        assert_eq!(m.name(), "sugar");
    }

    #[test]
    fn rejects_zero_and_negative_quantities() {
        assert_eq!(
            Material::new("butter", 0).unwrap_err(),
            ValidationError::NonPositiveQuantity {
                name: "butter".to_string(),
                quantity: 0,
            }
        );
        assert!(Material::new("butter", -3).is_err());
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            Material::new("   ", 4).unwrap_err(),
            ValidationError::EmptyName { quantity: 4 }
        );
    }

    #[test]
    fn deserialize_validates() {
        let m: Material = serde_json::from_str(r#"{"name": " flour ", "quantity": 3}"#).unwrap();
        assert_eq!(m, Material::new("flour", 3).unwrap());

        assert!(serde_json::from_str::<Material>(r#"{"name": "", "quantity": 0}"#).is_err());
        assert!(serde_json::from_str::<Material>(r#"{"name": "flour", "quantity": 0}"#).is_err());
        let err = serde_json::from_str::<Material>(r#"{"name": "flour", "quantity": -2}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must be greater than zero"));
    }

    #[test]
    fn join_uses_comma_space() {
        let items = vec![
            Material::new("butter", 2).unwrap(),
            Material::new("milk", 10).unwrap(),
        ];
        assert_eq!(join(&items), "2 butter, 10 milk");
    }
}
