use std::collections::HashMap;

use chrono::Utc;
use tracing::instrument;

use crate::domain::{
    admin::{
        export::{to_csv, to_json},
        ports::AdminService,
        value_objects::{
            DashboardStats, DashboardTotals, ExportFile, ExportFormat, ExportInput, ExportType,
            RECENT_PROMPTS, UserWithHistory,
        },
    },
    authentication::value_objects::Identity,
    category::ports::CategoryRepository,
    common::{
        entities::app_errors::CoreError,
        pagination::Paginated,
        policies::{can_administer, ensure_policy},
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
        entities::UserRole,
        ports::UserRepository,
        value_objects::{GetUsersFilter, UserFilter},
    },
    validation::{resolve_pagination, validate_export_params},
};

const ADMIN_ONLY: &str = "Admin access required";

impl<U, C, P, H, T, LLM, HC> AdminService for Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self))]
    async fn get_dashboard(&self, identity: Identity) -> Result<DashboardStats, CoreError> {
        ensure_policy(can_administer(&identity), ADMIN_ONLY)?;

        let (users, admins, categories, sub_categories, prompts) = tokio::try_join!(
            self.user_repository.count_users(None),
            self.user_repository.count_users(Some(UserRole::Admin)),
            self.category_repository.count_categories(),
            self.category_repository.count_sub_categories(),
            self.prompt_repository.count_prompts(PromptFilter::default()),
        )?;

        let (prompts_per_category, recent_prompts) = tokio::try_join!(
            self.prompt_repository.usage_by_category(),
            self.prompt_repository.recent_prompts(RECENT_PROMPTS),
        )?;

        Ok(DashboardStats {
            totals: DashboardTotals {
                users,
                admins,
                categories,
                sub_categories,
                prompts,
            },
            prompts_per_category,
            recent_prompts,
        })
    }

    #[instrument(skip(self))]
    async fn get_users_with_history(
        &self,
        identity: Identity,
        filter: GetUsersFilter,
    ) -> Result<Paginated<UserWithHistory>, CoreError> {
        ensure_policy(can_administer(&identity), ADMIN_ONLY)?;

        let page = resolve_pagination(filter.page.as_deref(), filter.limit.as_deref())?;
        let search = filter
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let users = self
            .user_repository
            .find_many(UserFilter { search }, page)
            .await?;

        let user_ids: Vec<i32> = users.items.iter().map(|u| u.user.id).collect();
        let mut by_user: HashMap<i32, Vec<PromptDetails>> = HashMap::new();
        if !user_ids.is_empty() {
            for prompt in self
                .prompt_repository
                .recent_for_users(user_ids, RECENT_PROMPTS)
                .await?
            {
                by_user.entry(prompt.prompt.user_id).or_default().push(prompt);
            }
        }

        Ok(users.map(|summary| UserWithHistory {
            recent_prompts: by_user.remove(&summary.user.id).unwrap_or_default(),
            summary,
        }))
    }

    #[instrument(skip(self))]
    async fn get_all_prompts(
        &self,
        identity: Identity,
        filter: GetPromptsFilter,
    ) -> Result<Paginated<PromptDetails>, CoreError> {
        ensure_policy(can_administer(&identity), ADMIN_ONLY)?;

        let (filter, page) = filter.resolve()?;
        self.prompt_repository.find_many(filter, page).await
    }

    #[instrument(skip(self))]
    async fn export(&self, identity: Identity, input: ExportInput) -> Result<ExportFile, CoreError> {
        ensure_policy(can_administer(&identity), ADMIN_ONLY)?;

        let (export_type, format) =
            validate_export_params(input.export_type.as_deref(), input.format.as_deref())?;

        let body = match export_type {
            ExportType::Users => {
                let rows = self.user_repository.export_users().await?;
                match format {
                    ExportFormat::Json => to_json(&rows)?,
                    ExportFormat::Csv => to_csv(&rows),
                }
            }
            ExportType::Prompts => {
                let rows = self.prompt_repository.export_prompts().await?;
                match format {
                    ExportFormat::Json => to_json(&rows)?,
                    ExportFormat::Csv => to_csv(&rows),
                }
            }
            ExportType::Categories => {
                let rows = self.category_repository.list_with_sub_categories().await?;
                match format {
                    ExportFormat::Json => to_json(&rows)?,
                    ExportFormat::Csv => to_csv(&rows),
                }
            }
        };

        let filename = format!(
            "{}_export_{}.{}",
            export_type.as_str(),
            Utc::now().format("%Y%m%d_%H%M%S"),
            format.extension()
        );

        tracing::info!(
            export_type = export_type.as_str(),
            format = format.extension(),
            bytes = body.len(),
            "Export generated"
        );

        Ok(ExportFile {
            filename,
            content_type: format.content_type(),
            body,
        })
    }
}
