use crate::domain::common::{
    entities::app_errors::FieldError,
    pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, MAX_PAGE, PageRequest},
};

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Resolves raw `page`/`limit` query values, reporting every bad field at once.
pub fn resolve_pagination(
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<PageRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let page = match present(page) {
        None => Some(DEFAULT_PAGE),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n < 1 => {
                errors.push(FieldError::new(
                    "page",
                    format!("Page must be a positive integer. Received: {raw}"),
                ));
                None
            }
            Ok(n) if n > MAX_PAGE => {
                errors.push(FieldError::new(
                    "page",
                    format!("Page number too high. Maximum allowed: {MAX_PAGE}"),
                ));
                None
            }
            Ok(n) => Some(n),
            Err(_) => {
                errors.push(FieldError::new(
                    "page",
                    format!("Page must be a positive integer. Received: {raw}"),
                ));
                None
            }
        },
    };

    let limit = match present(limit) {
        None => Some(DEFAULT_LIMIT),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n < 1 => {
                errors.push(FieldError::new(
                    "limit",
                    format!("Limit must be a positive integer. Received: {raw}"),
                ));
                None
            }
            Ok(n) if n > MAX_LIMIT => {
                errors.push(FieldError::new(
                    "limit",
                    format!("Limit exceeds maximum of {MAX_LIMIT}. Received: {n}"),
                ));
                None
            }
            Ok(n) => Some(n),
            Err(_) => {
                errors.push(FieldError::new(
                    "limit",
                    format!("Limit must be a positive integer. Received: {raw}"),
                ));
                None
            }
        },
    };

    match (page, limit) {
        (Some(page), Some(limit)) if errors.is_empty() => Ok(PageRequest::new(page, limit)),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent_or_blank() {
        assert_eq!(resolve_pagination(None, None), Ok(PageRequest::new(1, 10)));
        assert_eq!(
            resolve_pagination(Some(""), Some("  ")),
            Ok(PageRequest::new(1, 10))
        );
    }

    #[test]
    fn offset_for_valid_bounds() {
        for (page, limit) in [(1, 1), (1, 100), (2, 10), (7, 33), (10_000, 100)] {
            let resolved =
                resolve_pagination(Some(&page.to_string()), Some(&limit.to_string())).unwrap();
            assert_eq!(resolved.page, page);
            assert_eq!(resolved.limit, limit);
            assert_eq!(resolved.offset, (page - 1) * limit);
        }
    }

    #[test]
    fn out_of_bounds_values_error() {
        for (page, limit) in [("0", "10"), ("-1", "10"), ("10001", "10"), ("1", "0"), ("1", "101")] {
            let errors = resolve_pagination(Some(page), Some(limit)).unwrap_err();
            assert!(!errors.is_empty(), "page={page} limit={limit}");
        }
    }

    #[test]
    fn reports_all_errors_together() {
        let errors = resolve_pagination(Some("abc"), Some("500")).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("page", "Page must be a positive integer. Received: abc"),
                FieldError::new("limit", "Limit exceeds maximum of 100. Received: 500"),
            ]
        );
    }

    #[test]
    fn page_too_high_message() {
        let errors = resolve_pagination(Some("20000"), None).unwrap_err();
        assert_eq!(errors[0].message, "Page number too high. Maximum allowed: 10000");
    }

    #[test]
    fn fractional_values_are_rejected() {
        assert!(resolve_pagination(Some("1.5"), None).is_err());
    }
}
