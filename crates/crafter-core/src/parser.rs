//! Parse descriptive recipe strings such as `"2 butter, 10 milk -> 36 cookies"`.

use std::str::FromStr;

use crate::error::CraftError;
use crate::formula::Formula;
use crate::material::Material;
use crate::validation::{Side, ValidationError};

/// Token separating inputs from outputs.
pub const ARROW: &str = "->";

/// Separator between materials on one side.
pub const MATERIAL_SEPARATOR: char = ',';

/// Parses `"<qty> <name>, ... -> <qty> <name>, ..."` into input and output
/// materials.
pub fn parse_recipe(recipe: &str) -> Result<(Vec<Material>, Vec<Material>), ValidationError> {
    let count = recipe.matches(ARROW).count();
    let (inputs, outputs) = match count {
        0 => {
            return Err(ValidationError::MissingArrow {
                recipe: recipe.to_owned(),
            });
        }
        1 => recipe.split_once(ARROW).unwrap_or((recipe, "")),
        _ => {
            return Err(ValidationError::ExtraArrow {
                recipe: recipe.to_owned(),
                count,
            });
        }
    };

    Ok((
        parse_side(Side::Input, inputs)?,
        parse_side(Side::Output, outputs)?,
    ))
}

/// Parses one comma-separated side of a recipe.
fn parse_side(side: Side, segment: &str) -> Result<Vec<Material>, ValidationError> {
    if segment.trim().is_empty() {
        return Err(ValidationError::EmptyMaterials { side });
    }
    segment
        .split(MATERIAL_SEPARATOR)
        .map(parse_material)
        .collect()
}

/// Parses a single `"<qty> <name>"` token. The name is everything after the
/// first space and may itself contain spaces.
pub fn parse_material(token: &str) -> Result<Material, ValidationError> {
    let token = token.trim();
    let Some((quantity, name)) = token.split_once(' ') else {
        return Err(ValidationError::MissingSeparator {
            token: token.to_owned(),
        });
    };
    let quantity: i64 = quantity
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity {
            token: token.to_owned(),
            quantity: quantity.to_owned(),
        })?;
    Material::new(name, quantity)
}

impl FromStr for Formula {
    type Err = CraftError;

    fn from_str(recipe: &str) -> Result<Self, Self::Err> {
        let (inputs, outputs) = parse_recipe(recipe)?;
        Formula::from_materials(inputs, outputs)
    }
}
