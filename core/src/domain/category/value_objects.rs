use crate::domain::validation::RawId;

pub struct CreateCategoryInput {
    pub name: String,
}

pub struct CreateSubCategoryInput {
    pub name: String,
    pub category_id: Option<RawId>,
}
