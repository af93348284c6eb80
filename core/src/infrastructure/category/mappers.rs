use chrono::Utc;

use crate::domain::category::entities::{Category, SubCategory};
use crate::entity::{categories::Model as CategoryModel, sub_categories::Model as SubCategoryModel};

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: model.id,
            name: model.name,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<SubCategoryModel> for SubCategory {
    fn from(model: SubCategoryModel) -> Self {
        SubCategory {
            id: model.id,
            name: model.name,
            category_id: model.category_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
