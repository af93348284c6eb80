use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
};

pub fn ensure_policy(
    result_has_permission: Result<bool, CoreError>,
    error_message: &str,
) -> Result<(), CoreError> {
    match result_has_permission {
        Ok(true) => Ok(()),
        Ok(false) => Err(CoreError::Forbidden(error_message.to_string())),
        Err(e) => Err(e),
    }
}

pub fn can_administer(identity: &Identity) -> Result<bool, CoreError> {
    Ok(identity.is_admin())
}

/// Owners act on their own records, admins on everyone's.
pub fn can_access_user(identity: &Identity, user_id: i32) -> Result<bool, CoreError> {
    Ok(identity.is_admin() || identity.user_id == user_id)
}
