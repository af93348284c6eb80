use crate::domain::{
    admin::value_objects::{DashboardStats, ExportFile, ExportInput, UserWithHistory},
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, pagination::Paginated},
    prompt::{entities::PromptDetails, value_objects::GetPromptsFilter},
    user::value_objects::GetUsersFilter,
};

/// Admin-only reporting. Every method rejects non-admins with `Forbidden`.
#[cfg_attr(test, mockall::automock)]
pub trait AdminService: Send + Sync {
    fn get_dashboard(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<DashboardStats, CoreError>> + Send;

    fn get_users_with_history(
        &self,
        identity: Identity,
        filter: GetUsersFilter,
    ) -> impl Future<Output = Result<Paginated<UserWithHistory>, CoreError>> + Send;

    fn get_all_prompts(
        &self,
        identity: Identity,
        filter: GetPromptsFilter,
    ) -> impl Future<Output = Result<Paginated<PromptDetails>, CoreError>> + Send;

    fn export(
        &self,
        identity: Identity,
        input: ExportInput,
    ) -> impl Future<Output = Result<ExportFile, CoreError>> + Send;
}
