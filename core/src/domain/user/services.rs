use chrono::{Duration, Utc};
use tracing::instrument;

use crate::domain::{
    authentication::value_objects::Identity,
    category::ports::CategoryRepository,
    common::{
        entities::app_errors::{CoreError, FieldError},
        pagination::Paginated,
        policies::{can_access_user, can_administer, ensure_policy},
        services::Service,
    },
    crypto::ports::HasherRepository,
    health::ports::HealthCheckRepository,
    jwt::ports::TokenRepository,
    prompt::{
        entities::PromptDetails,
        ports::{LLMClient, PromptRepository},
        value_objects::{GetPromptsFilter, PromptFilter},
    },
    user::{
        entities::{AuthenticatedUser, User, UserSummary},
        ports::{UserRepository, UserService},
        value_objects::{
            ACTIVITY_WINDOW_DAYS, GetUsersFilter, LoginInput, NewUser, RegisterUserInput,
            UserAnalytics, UserFilter,
        },
    },
    validation::{
        IdKind, RawId, resolve_pagination, validate_id, validate_name, validate_password,
        validate_phone,
    },
};

const INVALID_CREDENTIALS: &str = "Invalid phone number or password";

impl<U, C, P, H, T, LLM, HC> Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    /// Validates the id, checks owner-or-admin access and loads the user.
    pub(crate) async fn accessible_user(
        &self,
        identity: &Identity,
        user_id: &RawId,
    ) -> Result<User, CoreError> {
        let user_id = validate_id(user_id, IdKind::User)?;

        ensure_policy(
            can_access_user(identity, user_id),
            "You can only access your own account",
        )?;

        self.user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))
    }
}

impl<U, C, P, H, T, LLM, HC> UserService for Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, input))]
    async fn register(&self, input: RegisterUserInput) -> Result<AuthenticatedUser, CoreError> {
        let (name, phone, password) = match (
            validate_name(&input.name),
            validate_phone(&input.phone),
            validate_password(&input.password),
        ) {
            (Ok(name), Ok(phone), Ok(password)) => (name, phone, password),
            (name, phone, password) => {
                return Err(CoreError::Validation(
                    [name.err(), phone.err(), password.err()]
                        .into_iter()
                        .flatten()
                        .collect(),
                ));
            }
        };

        let role = self.role_policy.role_for(&phone);
        let password_hash = self.hasher_repository.hash_password(password).await?;

        let user = self
            .user_repository
            .create_user(NewUser {
                name,
                phone,
                password_hash,
                role,
            })
            .await?;

        let token = self.token_repository.issue(&user)?;

        tracing::info!(user_id = user.id, role = %user.role, "User registered");

        Ok(AuthenticatedUser { user, token })
    }

    #[instrument(skip(self, input))]
    async fn login(&self, input: LoginInput) -> Result<AuthenticatedUser, CoreError> {
        let phone = input.phone.trim().to_string();

        let mut errors = Vec::new();
        if phone.is_empty() {
            errors.push(FieldError::new("phone", "Phone number is required"));
        }
        if input.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let credentials = self
            .user_repository
            .get_credentials_by_phone(phone)
            .await?
            .ok_or_else(|| CoreError::validation("credentials", INVALID_CREDENTIALS))?;

        let verified = self
            .hasher_repository
            .verify_password(input.password, credentials.password_hash)
            .await?;
        if !verified {
            tracing::info!(user_id = credentials.user.id, "Rejected login");
            return Err(CoreError::validation("credentials", INVALID_CREDENTIALS));
        }

        let mut user = credentials.user;
        if let Some(role) = self.role_policy.promotion_for(&user) {
            user = self.user_repository.update_role(user.id, role).await?;
        }

        let token = self.token_repository.issue(&user)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(AuthenticatedUser { user, token })
    }

    async fn authorize_request(&self, token: String) -> Result<Identity, CoreError> {
        let claim = self.token_repository.verify(&token)?;
        let user_id: i32 = claim
            .sub
            .parse()
            .map_err(|_| CoreError::Unauthenticated("Invalid token".to_string()))?;

        let user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::Unauthenticated("User not found".to_string()))?;

        Ok(Identity::from(&user))
    }

    #[instrument(skip(self))]
    async fn get_me(&self, identity: Identity) -> Result<User, CoreError> {
        self.user_repository
            .get_by_id(identity.user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))
    }

    #[instrument(skip(self))]
    async fn get_users(
        &self,
        identity: Identity,
        filter: GetUsersFilter,
    ) -> Result<Paginated<UserSummary>, CoreError> {
        ensure_policy(can_administer(&identity), "Admin access required")?;

        let page = resolve_pagination(filter.page.as_deref(), filter.limit.as_deref())?;
        let search = filter
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        self.user_repository
            .find_many(UserFilter { search }, page)
            .await
    }

    #[instrument(skip(self))]
    async fn get_user(&self, identity: Identity, user_id: RawId) -> Result<User, CoreError> {
        self.accessible_user(&identity, &user_id).await
    }

    #[instrument(skip(self))]
    async fn get_user_history(
        &self,
        identity: Identity,
        user_id: RawId,
        filter: GetPromptsFilter,
    ) -> Result<Paginated<PromptDetails>, CoreError> {
        let user = self.accessible_user(&identity, &user_id).await?;

        let (filter, page) = GetPromptsFilter {
            user_id: None,
            ..filter
        }
        .resolve()?;

        self.prompt_repository
            .find_many(
                PromptFilter {
                    user_id: Some(user.id),
                    ..filter
                },
                page,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn get_user_analytics(
        &self,
        identity: Identity,
        user_id: RawId,
    ) -> Result<UserAnalytics, CoreError> {
        let user = self.accessible_user(&identity, &user_id).await?;

        let since = Utc::now() - Duration::days(ACTIVITY_WINDOW_DAYS);
        let activity = self
            .prompt_repository
            .activity_for_user(user.id, since)
            .await?;

        let recent_total: i64 = activity.recent_activity.iter().map(|day| day.count).sum();
        let avg_prompts_per_day =
            (recent_total as f64 / ACTIVITY_WINDOW_DAYS as f64 * 10.0).round() / 10.0;

        Ok(UserAnalytics {
            user_id: user.id,
            total_prompts: activity.total_prompts,
            categories_used: activity.categories_used,
            recent_activity: activity.recent_activity,
            avg_prompts_per_day,
        })
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, identity: Identity, user_id: RawId) -> Result<(), CoreError> {
        ensure_policy(can_administer(&identity), "Admin access required")?;

        let user_id = validate_id(&user_id, IdKind::User)?;

        if !self.user_repository.delete_by_id(user_id).await? {
            return Err(CoreError::NotFound("User not found".to_string()));
        }

        tracing::info!(user_id, deleted_by = identity.user_id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        common::entities::app_errors::CoreError,
        test_support::{admin_identity, service, service_with_admin, user_identity},
        user::{
            entities::UserRole,
            ports::UserService,
            value_objects::{GetUsersFilter, LoginInput, RegisterUserInput},
        },
        validation::RawId,
    };

    fn register_input(phone: &str) -> RegisterUserInput {
        RegisterUserInput {
            name: "Dana Levi".to_string(),
            phone: phone.to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn register_login_and_me() {
        let fixture = service();

        let registered = fixture
            .service
            .register(register_input("0501234567"))
            .await
            .unwrap();
        assert_eq!(registered.user.role, UserRole::User);
        assert!(!registered.token.is_empty());

        let logged_in = fixture
            .service
            .login(LoginInput {
                phone: "0501234567".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);

        let identity = fixture
            .service
            .authorize_request(logged_in.token)
            .await
            .unwrap();
        let me = fixture.service.get_me(identity).await.unwrap();
        assert_eq!(me.name, "Dana Levi");
        assert_eq!(me.phone, "0501234567");
        assert_eq!(me.role, UserRole::User);
    }

    #[tokio::test]
    async fn register_reports_every_invalid_field() {
        let fixture = service();

        let error = fixture
            .service
            .register(RegisterUserInput {
                name: "X".to_string(),
                phone: "123".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();

        let fields: Vec<&str> = error
            .field_errors()
            .iter()
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(fields, vec!["name", "phone", "password"]);
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected() {
        let fixture = service();
        fixture
            .service
            .register(register_input("0501234567"))
            .await
            .unwrap();

        let error = fixture
            .service
            .register(register_input("0501234567"))
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn admin_phone_registers_as_admin() {
        let fixture = service_with_admin("0500000000");

        let admin = fixture
            .service
            .register(register_input("0500000000"))
            .await
            .unwrap();
        let regular = fixture
            .service
            .register(register_input("0501111111"))
            .await
            .unwrap();

        assert_eq!(admin.user.role, UserRole::Admin);
        assert_eq!(regular.user.role, UserRole::User);
    }

    #[tokio::test]
    async fn login_promotes_matching_phone() {
        let fixture = service_with_admin("0500000000");
        let existing = fixture.seed_user("Noa Cohen", "0500000000", UserRole::User);

        let logged_in = fixture
            .service
            .login(LoginInput {
                phone: "0500000000".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(logged_in.user.id, existing.id);
        assert_eq!(logged_in.user.role, UserRole::Admin);
        assert_eq!(fixture.stored_user(existing.id).unwrap().role, UserRole::Admin);
    }

    #[tokio::test]
    async fn wrong_password_is_a_validation_error() {
        let fixture = service();
        fixture.seed_user("Noa Cohen", "0501234567", UserRole::User);

        let error = fixture
            .service
            .login(LoginInput {
                phone: "0501234567".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.field_errors()[0].field, "credentials");

        let unknown = fixture
            .service
            .login(LoginInput {
                phone: "0509999999".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(unknown, error);
    }

    #[tokio::test]
    async fn invalid_token_is_unauthenticated() {
        let fixture = service();
        let error = fixture
            .service
            .authorize_request("garbage".to_string())
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn token_of_deleted_user_is_rejected() {
        let fixture = service();
        let registered = fixture
            .service
            .register(register_input("0501234567"))
            .await
            .unwrap();
        fixture
            .service
            .delete_user(admin_identity(), RawId::from(registered.user.id))
            .await
            .unwrap();

        let error = fixture
            .service
            .authorize_request(registered.token)
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn listing_users_requires_admin() {
        let fixture = service();
        let user = fixture.seed_user("Noa Cohen", "0501234567", UserRole::User);

        let error = fixture
            .service
            .get_users(user_identity(&user), GetUsersFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::Forbidden(_)));

        let page = fixture
            .service
            .get_users(admin_identity(), GetUsersFilter::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].user.id, user.id);
    }

    #[tokio::test]
    async fn users_only_see_themselves() {
        let fixture = service();
        let dana = fixture.seed_user("Dana Levi", "0501234567", UserRole::User);
        let noa = fixture.seed_user("Noa Cohen", "0507654321", UserRole::User);

        assert!(fixture
            .service
            .get_user(user_identity(&dana), RawId::from(dana.id))
            .await
            .is_ok());
        let error = fixture
            .service
            .get_user(user_identity(&dana), RawId::from(noa.id))
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_prompts() {
        let fixture = service();
        let dana = fixture.seed_user("Dana Levi", "0501234567", UserRole::User);
        let noa = fixture.seed_user("Noa Cohen", "0507654321", UserRole::User);
        let (category, sub_category) = fixture.seed_category("Programming", "Python");
        fixture.seed_prompt(dana.id, category.id, sub_category.id);
        fixture.seed_prompt(dana.id, category.id, sub_category.id);
        fixture.seed_prompt(noa.id, category.id, sub_category.id);

        fixture
            .service
            .delete_user(admin_identity(), RawId::from(dana.id))
            .await
            .unwrap();

        assert!(fixture.stored_user(dana.id).is_none());
        assert_eq!(fixture.prompt_owners(), vec![noa.id]);
        assert_eq!(fixture.prompt_counts(), 0);
    }

    #[tokio::test]
    async fn deleting_missing_user_is_not_found() {
        let fixture = service();
        let error = fixture
            .service
            .delete_user(admin_identity(), RawId::Number(999))
            .await
            .unwrap_err();
        assert_eq!(error, CoreError::NotFound("User not found".to_string()));
    }

    #[tokio::test]
    async fn history_is_scoped_to_the_user() {
        let fixture = service();
        let dana = fixture.seed_user("Dana Levi", "0501234567", UserRole::User);
        let noa = fixture.seed_user("Noa Cohen", "0507654321", UserRole::User);
        let (category, sub_category) = fixture.seed_category("Programming", "Python");
        fixture.seed_prompt(dana.id, category.id, sub_category.id);
        fixture.seed_prompt(noa.id, category.id, sub_category.id);

        let history = fixture
            .service
            .get_user_history(
                user_identity(&dana),
                RawId::from(dana.id),
                Default::default(),
            )
            .await
            .unwrap();

        assert_eq!(history.pagination.total, 1);
        assert!(history.items.iter().all(|p| p.prompt.user_id == dana.id));
    }

    #[tokio::test]
    async fn analytics_average_over_window() {
        let fixture = service();
        let dana = fixture.seed_user("Dana Levi", "0501234567", UserRole::User);
        let (category, sub_category) = fixture.seed_category("Programming", "Python");
        for _ in 0..3 {
            fixture.seed_prompt(dana.id, category.id, sub_category.id);
        }

        let analytics = fixture
            .service
            .get_user_analytics(user_identity(&dana), RawId::from(dana.id))
            .await
            .unwrap();

        assert_eq!(analytics.total_prompts, 3);
        assert_eq!(analytics.categories_used, 1);
        assert_eq!(analytics.avg_prompts_per_day, 0.1);
    }
}
