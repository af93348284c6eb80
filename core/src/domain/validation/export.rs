use crate::domain::{
    admin::value_objects::{ExportFormat, ExportType},
    common::entities::app_errors::FieldError,
};

pub fn validate_export_params(
    export_type: Option<&str>,
    format: Option<&str>,
) -> Result<(ExportType, ExportFormat), FieldError> {
    let export_type = export_type
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FieldError::new("type", "Export type is required"))?;

    let export_type = match export_type {
        "users" => ExportType::Users,
        "prompts" => ExportType::Prompts,
        "categories" => ExportType::Categories,
        other => {
            return Err(FieldError::new(
                "type",
                format!("Invalid export type: {other}. Valid types: users, prompts, categories"),
            ));
        }
    };

    let format = match format.map(str::trim).filter(|s| !s.is_empty()) {
        None | Some("json") => ExportFormat::Json,
        Some("csv") => ExportFormat::Csv,
        Some(other) => {
            return Err(FieldError::new(
                "format",
                format!("Invalid export format: {other}. Valid formats: json, csv"),
            ));
        }
    };

    Ok((export_type, format))
}
