//! Attribute definitions and product attribute associations.

use serde::{Deserialize, Serialize};

use emporium_core::{AttributeId, SubCategoryId};

/// A named attribute that products of one sub-category can carry.
///
/// Names are unique across the catalog (case-sensitive exact match),
/// enforced before creation and backed by a storage uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttributeDefinition {
    /// Unique attribute ID.
    pub id: AttributeId,
    /// Unique attribute name, e.g. "Screen size".
    pub name: String,
    /// Sub-category whose products may carry this attribute.
    pub sub_category_id: SubCategoryId,
}

/// An attribute attached to a product, with its concrete value.
///
/// Materialized on attach by merging the attribute definition with the
/// supplied value. The sub-category match is checked at association time
/// only; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributeValue {
    /// ID of the attached attribute.
    pub id: AttributeId,
    /// Name of the attached attribute.
    pub name: String,
    /// Sub-category of the attached attribute.
    pub sub_category_id: SubCategoryId,
    /// Concrete value for this product, e.g. "15.6\"".
    pub value: String,
}

impl ProductAttributeValue {
    /// Merge an attribute definition with the value supplied on attach.
    #[must_use]
    pub fn materialize(definition: AttributeDefinition, value: String) -> Self {
        Self {
            id: definition.id,
            name: definition.name,
            sub_category_id: definition.sub_category_id,
            value,
        }
    }
}
