use learnhub_core::domain::{
    admin::value_objects::ExportInput, prompt::value_objects::GetPromptsFilter,
    user::value_objects::GetUsersFilter,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Listing parameters exactly as they appeared in the query string.
/// Values stay raw strings so the domain validators can report on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// Page number, starting at 1.
    pub page: Option<String>,
    /// Page size, at most 100.
    pub limit: Option<String>,
    /// Case-insensitive match on name or phone.
    pub search: Option<String>,
    pub user_id: Option<String>,
    pub category_id: Option<String>,
    pub sub_category_id: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD` (inclusive) or RFC 3339.
    pub end_date: Option<String>,
    /// Export type: `users`, `prompts` or `categories`.
    #[serde(rename = "type")]
    pub export_type: Option<String>,
    /// Export format: `json` (default) or `csv`.
    pub format: Option<String>,
}

impl ListingParams {
    /// Builds from decoded pairs. Repeated keys keep the last value, blank values count as absent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let value: String = value.into();
            let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());

            let slot = match key.as_ref() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "search" => &mut params.search,
                "user_id" => &mut params.user_id,
                "category_id" => &mut params.category_id,
                "sub_category_id" => &mut params.sub_category_id,
                "start_date" => &mut params.start_date,
                "end_date" => &mut params.end_date,
                "type" => &mut params.export_type,
                "format" => &mut params.format,
                _ => continue,
            };
            *slot = value;
        }

        params
    }

    pub fn prompts_filter(&self) -> GetPromptsFilter {
        GetPromptsFilter {
            page: self.page.clone(),
            limit: self.limit.clone(),
            user_id: self.user_id.clone(),
            category_id: self.category_id.clone(),
            sub_category_id: self.sub_category_id.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }

    pub fn users_filter(&self) -> GetUsersFilter {
        GetUsersFilter {
            page: self.page.clone(),
            limit: self.limit.clone(),
            search: self.search.clone(),
        }
    }

    pub fn export_input(&self) -> ExportInput {
        ExportInput {
            export_type: self.export_type.clone(),
            format: self.format.clone(),
        }
    }
}
