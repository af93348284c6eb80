use crate::domain::{
    authentication::value_objects::Identity,
    common::{
        entities::app_errors::CoreError,
        pagination::{PageRequest, Paginated},
    },
    prompt::{entities::PromptDetails, value_objects::GetPromptsFilter},
    user::{
        entities::{AuthenticatedUser, User, UserCredentials, UserRole, UserSummary},
        value_objects::{
            GetUsersFilter, LoginInput, NewUser, RegisterUserInput, UserAnalytics, UserFilter,
        },
    },
    validation::RawId,
};

#[cfg_attr(test, mockall::automock)]
pub trait UserService: Send + Sync {
    fn register(
        &self,
        input: RegisterUserInput,
    ) -> impl Future<Output = Result<AuthenticatedUser, CoreError>> + Send;

    /// Re-checks the admin phone and persists a promotion when it matches.
    fn login(
        &self,
        input: LoginInput,
    ) -> impl Future<Output = Result<AuthenticatedUser, CoreError>> + Send;

    /// Verifies a bearer token and reloads its user.
    fn authorize_request(
        &self,
        token: String,
    ) -> impl Future<Output = Result<Identity, CoreError>> + Send;

    fn get_me(&self, identity: Identity) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_users(
        &self,
        identity: Identity,
        filter: GetUsersFilter,
    ) -> impl Future<Output = Result<Paginated<UserSummary>, CoreError>> + Send;

    fn get_user(
        &self,
        identity: Identity,
        user_id: RawId,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_user_history(
        &self,
        identity: Identity,
        user_id: RawId,
        filter: GetPromptsFilter,
    ) -> impl Future<Output = Result<Paginated<PromptDetails>, CoreError>> + Send;

    fn get_user_analytics(
        &self,
        identity: Identity,
        user_id: RawId,
    ) -> impl Future<Output = Result<UserAnalytics, CoreError>> + Send;

    /// Removes the user and, through the schema, every prompt they own.
    fn delete_user(
        &self,
        identity: Identity,
        user_id: RawId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Fails with `Duplicate` when the phone is taken.
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_by_id(&self, user_id: i32)
    -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn get_credentials_by_phone(
        &self,
        phone: String,
    ) -> impl Future<Output = Result<Option<UserCredentials>, CoreError>> + Send;

    fn update_role(
        &self,
        user_id: i32,
        role: UserRole,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Returns `false` when nothing was deleted.
    fn delete_by_id(&self, user_id: i32) -> impl Future<Output = Result<bool, CoreError>> + Send;

    /// Newest first, with prompt counts.
    fn find_many(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> impl Future<Output = Result<Paginated<UserSummary>, CoreError>> + Send;

    /// `None` counts every user.
    fn count_users(
        &self,
        role: Option<UserRole>,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    fn export_users(&self) -> impl Future<Output = Result<Vec<UserSummary>, CoreError>> + Send;
}
