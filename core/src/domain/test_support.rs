//! In-memory ports sharing one store, so service tests can observe cascades
//! and joins the way the database would produce them.

use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};

use crate::domain::{
    authentication::value_objects::Identity,
    category::{
        entities::{Category, CategoryWithSubCategories, SubCategory},
        ports::CategoryRepository,
    },
    common::{
        entities::app_errors::CoreError,
        pagination::{PageRequest, Paginated},
        services::Service,
    },
    crypto::ports::HasherRepository,
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
    jwt::{entities::JwtClaim, ports::TokenRepository},
    prompt::{
        entities::{Prompt, PromptDetails},
        ports::{LLMClient, PromptRepository},
        value_objects::{CategoryUsage, NewPrompt, PromptActivity, PromptFilter},
    },
    user::{
        entities::{User, UserCredentials, UserRole, UserSummary},
        policies::RolePolicy,
        ports::UserRepository,
        value_objects::{DailyActivity, NewUser, UserFilter},
    },
    validation::PromptRules,
};

pub(crate) const SEEDED_PASSWORD: &str = "secret1";

#[derive(Default)]
struct Store {
    next_id: i32,
    users: Vec<UserCredentials>,
    categories: Vec<Category>,
    sub_categories: Vec<SubCategory>,
    prompts: Vec<Prompt>,
    prompt_counts: usize,
}

impl Store {
    fn id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn summary(&self, user: &User) -> UserSummary {
        UserSummary {
            user: user.clone(),
            prompt_count: self.prompts.iter().filter(|p| p.user_id == user.id).count() as i64,
        }
    }

    fn details(&self, prompt: &Prompt) -> PromptDetails {
        let name_of = |id: i32| {
            self.users
                .iter()
                .find(|u| u.user.id == id)
                .map(|u| u.user.name.clone())
                .unwrap_or_default()
        };
        let category_name = self
            .categories
            .iter()
            .find(|c| c.id == prompt.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let sub_category_name = prompt.sub_category_id.and_then(|id| {
            self.sub_categories
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.name.clone())
        });

        PromptDetails {
            prompt: prompt.clone(),
            user_name: name_of(prompt.user_id),
            category_name,
            sub_category_name,
            prompt_length: prompt.prompt.chars().count() as i64,
            response_length: prompt.response.chars().count() as i64,
        }
    }

    /// Newest first, ties broken by id.
    fn newest_prompts(&self) -> Vec<&Prompt> {
        let mut prompts: Vec<&Prompt> = self.prompts.iter().collect();
        prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        prompts
    }

    fn matching(&self, filter: &PromptFilter) -> Vec<PromptDetails> {
        self.newest_prompts()
            .into_iter()
            .filter(|p| filter.user_id.is_none_or(|id| p.user_id == id))
            .filter(|p| filter.category_id.is_none_or(|id| p.category_id == id))
            .filter(|p| {
                filter
                    .sub_category_id
                    .is_none_or(|id| p.sub_category_id == Some(id))
            })
            .filter(|p| filter.created.start.is_none_or(|start| p.created_at >= start))
            .filter(|p| filter.created.end.is_none_or(|end| p.created_at <= end))
            .map(|p| self.details(p))
            .collect()
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(store: &Shared) -> MutexGuard<'_, Store> {
    store.lock().unwrap()
}

fn page_of<T>(rows: Vec<T>, page: &PageRequest) -> Paginated<T> {
    let total = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect();
    Paginated::new(items, total, page)
}

pub(crate) struct FakeUsers(Shared);

impl UserRepository for FakeUsers {
    async fn create_user(&self, user: NewUser) -> Result<User, CoreError> {
        let mut store = lock(&self.0);
        if store.users.iter().any(|u| u.user.phone == user.phone) {
            return Err(CoreError::Duplicate(
                "Phone number already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let created = User {
            id: store.id(),
            name: user.name,
            phone: user.phone,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        store.users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn get_by_id(&self, user_id: i32) -> Result<Option<User>, CoreError> {
        Ok(lock(&self.0)
            .users
            .iter()
            .find(|u| u.user.id == user_id)
            .map(|u| u.user.clone()))
    }

    async fn get_credentials_by_phone(
        &self,
        phone: String,
    ) -> Result<Option<UserCredentials>, CoreError> {
        Ok(lock(&self.0)
            .users
            .iter()
            .find(|u| u.user.phone == phone)
            .cloned())
    }

    async fn update_role(&self, user_id: i32, role: UserRole) -> Result<User, CoreError> {
        let mut store = lock(&self.0);
        let stored = store
            .users
            .iter_mut()
            .find(|u| u.user.id == user_id)
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;
        stored.user.role = role;
        stored.user.updated_at = Utc::now();
        Ok(stored.user.clone())
    }

    async fn delete_by_id(&self, user_id: i32) -> Result<bool, CoreError> {
        let mut store = lock(&self.0);
        let before = store.users.len();
        store.users.retain(|u| u.user.id != user_id);
        if store.users.len() == before {
            return Ok(false);
        }
        store.prompts.retain(|p| p.user_id != user_id);
        Ok(true)
    }

    async fn find_many(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Paginated<UserSummary>, CoreError> {
        let store = lock(&self.0);
        let needle = filter.search.map(|s| s.to_lowercase());
        let mut rows: Vec<UserSummary> = store
            .users
            .iter()
            .filter(|u| {
                needle.as_ref().is_none_or(|n| {
                    u.user.name.to_lowercase().contains(n) || u.user.phone.contains(n.as_str())
                })
            })
            .map(|u| store.summary(&u.user))
            .collect();
        rows.sort_by(|a, b| b.user.id.cmp(&a.user.id));
        Ok(page_of(rows, &page))
    }

    async fn count_users(&self, role: Option<UserRole>) -> Result<i64, CoreError> {
        Ok(lock(&self.0)
            .users
            .iter()
            .filter(|u| role.is_none_or(|r| u.user.role == r))
            .count() as i64)
    }

    async fn export_users(&self) -> Result<Vec<UserSummary>, CoreError> {
        let store = lock(&self.0);
        Ok(store.users.iter().map(|u| store.summary(&u.user)).collect())
    }
}

pub(crate) struct FakeCategories(Shared);

impl CategoryRepository for FakeCategories {
    async fn create_category(&self, name: String) -> Result<Category, CoreError> {
        let mut store = lock(&self.0);
        if store.categories.iter().any(|c| c.name == name) {
            return Err(CoreError::Duplicate(
                "Category name already exists".to_string(),
            ));
        }
        let category = Category {
            id: store.id(),
            name,
            created_at: Utc::now(),
        };
        store.categories.push(category.clone());
        Ok(category)
    }

    async fn get_category(&self, category_id: i32) -> Result<Option<Category>, CoreError> {
        Ok(lock(&self.0)
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let mut categories = lock(&self.0).categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete_category(&self, category_id: i32) -> Result<bool, CoreError> {
        let mut store = lock(&self.0);
        if store.prompts.iter().any(|p| p.category_id == category_id) {
            return Err(CoreError::validation(
                "category_id",
                "Category is still referenced by prompts",
            ));
        }
        let before = store.categories.len();
        store.categories.retain(|c| c.id != category_id);
        store.sub_categories.retain(|s| s.category_id != category_id);
        Ok(store.categories.len() != before)
    }

    async fn create_sub_category(
        &self,
        name: String,
        category_id: i32,
    ) -> Result<SubCategory, CoreError> {
        let mut store = lock(&self.0);
        if store
            .sub_categories
            .iter()
            .any(|s| s.category_id == category_id && s.name == name)
        {
            return Err(CoreError::Duplicate(
                "Sub-category name already exists in this category".to_string(),
            ));
        }
        let sub_category = SubCategory {
            id: store.id(),
            name,
            category_id,
            created_at: Utc::now(),
        };
        store.sub_categories.push(sub_category.clone());
        Ok(sub_category)
    }

    async fn get_sub_category(&self, sub_category_id: i32) -> Result<Option<SubCategory>, CoreError> {
        Ok(lock(&self.0)
            .sub_categories
            .iter()
            .find(|s| s.id == sub_category_id)
            .cloned())
    }

    async fn list_sub_categories(&self, category_id: i32) -> Result<Vec<SubCategory>, CoreError> {
        let mut subs: Vec<SubCategory> = lock(&self.0)
            .sub_categories
            .iter()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect();
        subs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subs)
    }

    async fn count_categories(&self) -> Result<i64, CoreError> {
        Ok(lock(&self.0).categories.len() as i64)
    }

    async fn count_sub_categories(&self) -> Result<i64, CoreError> {
        Ok(lock(&self.0).sub_categories.len() as i64)
    }

    async fn list_with_sub_categories(&self) -> Result<Vec<CategoryWithSubCategories>, CoreError> {
        let store = lock(&self.0);
        let mut rows: Vec<CategoryWithSubCategories> = store
            .categories
            .iter()
            .map(|category| {
                let mut sub_categories: Vec<SubCategory> = store
                    .sub_categories
                    .iter()
                    .filter(|s| s.category_id == category.id)
                    .cloned()
                    .collect();
                sub_categories.sort_by(|a, b| a.name.cmp(&b.name));
                CategoryWithSubCategories {
                    category: category.clone(),
                    sub_categories,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.category.id.cmp(&a.category.id));
        Ok(rows)
    }
}

pub(crate) struct FakePrompts(Shared);

impl PromptRepository for FakePrompts {
    async fn create_prompt(&self, prompt: NewPrompt) -> Result<Prompt, CoreError> {
        let mut store = lock(&self.0);
        let references_exist = store.users.iter().any(|u| u.user.id == prompt.user_id)
            && store.categories.iter().any(|c| c.id == prompt.category_id)
            && prompt
                .sub_category_id
                .is_none_or(|id| store.sub_categories.iter().any(|s| s.id == id));
        if !references_exist {
            return Err(CoreError::validation(
                "prompt",
                "Referenced user, category or sub-category does not exist",
            ));
        }

        let created = Prompt {
            id: store.id(),
            user_id: prompt.user_id,
            category_id: prompt.category_id,
            sub_category_id: prompt.sub_category_id,
            prompt: prompt.prompt,
            response: prompt.response,
            created_at: Utc::now(),
        };
        store.prompts.push(created.clone());
        Ok(created)
    }

    async fn get_prompt(&self, prompt_id: i32) -> Result<Option<PromptDetails>, CoreError> {
        let store = lock(&self.0);
        Ok(store
            .prompts
            .iter()
            .find(|p| p.id == prompt_id)
            .map(|p| store.details(p)))
    }

    async fn find_many(
        &self,
        filter: PromptFilter,
        page: PageRequest,
    ) -> Result<Paginated<PromptDetails>, CoreError> {
        Ok(page_of(lock(&self.0).matching(&filter), &page))
    }

    async fn count_prompts(&self, filter: PromptFilter) -> Result<i64, CoreError> {
        let mut store = lock(&self.0);
        store.prompt_counts += 1;
        Ok(store.matching(&filter).len() as i64)
    }

    async fn delete_prompt(&self, prompt_id: i32) -> Result<bool, CoreError> {
        let mut store = lock(&self.0);
        let before = store.prompts.len();
        store.prompts.retain(|p| p.id != prompt_id);
        Ok(store.prompts.len() != before)
    }

    async fn usage_by_category(&self) -> Result<Vec<CategoryUsage>, CoreError> {
        let store = lock(&self.0);
        let mut usage: Vec<CategoryUsage> = store
            .categories
            .iter()
            .map(|c| CategoryUsage {
                category_id: c.id,
                category_name: c.name.clone(),
                prompt_count: store.prompts.iter().filter(|p| p.category_id == c.id).count()
                    as i64,
            })
            .collect();
        usage.sort_by(|a, b| {
            b.prompt_count
                .cmp(&a.prompt_count)
                .then_with(|| a.category_name.cmp(&b.category_name))
        });
        Ok(usage)
    }

    async fn recent_prompts(&self, limit: i64) -> Result<Vec<PromptDetails>, CoreError> {
        let store = lock(&self.0);
        Ok(store
            .newest_prompts()
            .into_iter()
            .take(limit as usize)
            .map(|p| store.details(p))
            .collect())
    }

    async fn recent_for_users(
        &self,
        user_ids: Vec<i32>,
        per_user: i64,
    ) -> Result<Vec<PromptDetails>, CoreError> {
        let store = lock(&self.0);
        Ok(user_ids
            .iter()
            .flat_map(|user_id| {
                store
                    .newest_prompts()
                    .into_iter()
                    .filter(move |p| p.user_id == *user_id)
                    .take(per_user as usize)
                    .map(|p| store.details(p))
                    .collect::<Vec<_>>()
            })
            .collect())
    }

    async fn activity_for_user(
        &self,
        user_id: i32,
        since: DateTime<Utc>,
    ) -> Result<PromptActivity, CoreError> {
        let store = lock(&self.0);
        let owned: Vec<&Prompt> = store.prompts.iter().filter(|p| p.user_id == user_id).collect();

        let categories: HashSet<i32> = owned.iter().map(|p| p.category_id).collect();
        let mut per_day = BTreeMap::new();
        for prompt in owned.iter().filter(|p| p.created_at >= since) {
            *per_day.entry(prompt.created_at.date_naive()).or_insert(0i64) += 1;
        }

        Ok(PromptActivity {
            total_prompts: owned.len() as i64,
            categories_used: categories.len() as i64,
            recent_activity: per_day
                .into_iter()
                .rev()
                .map(|(date, count)| DailyActivity { date, count })
                .collect(),
        })
    }

    async fn export_prompts(&self) -> Result<Vec<PromptDetails>, CoreError> {
        let store = lock(&self.0);
        Ok(store
            .newest_prompts()
            .into_iter()
            .map(|p| store.details(p))
            .collect())
    }
}

pub(crate) struct FakeHasher;

impl HasherRepository for FakeHasher {
    async fn hash_password(&self, password: String) -> Result<String, CoreError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, CoreError> {
        Ok(password_hash == format!("hashed:{password}"))
    }
}

/// Tokens look like `token:<id>:<role>`.
pub(crate) struct FakeTokens;

impl TokenRepository for FakeTokens {
    fn issue(&self, user: &User) -> Result<String, CoreError> {
        Ok(format!("token:{}:{}", user.id, user.role))
    }

    fn verify(&self, token: &str) -> Result<JwtClaim, CoreError> {
        let invalid = || CoreError::Unauthenticated("Invalid token".to_string());

        let mut parts = token.strip_prefix("token:").ok_or_else(invalid)?.split(':');
        let sub: i32 = parts
            .next()
            .and_then(|id| id.parse().ok())
            .ok_or_else(invalid)?;
        let role: UserRole = parts
            .next()
            .and_then(|role| role.parse().ok())
            .ok_or_else(invalid)?;
        let now = Utc::now().timestamp();

        Ok(JwtClaim {
            sub: sub.to_string(),
            role,
            iat: now,
            exp: now + 3600,
            jti: token.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) enum FakeLlm {
    Reply(String),
    Fail,
    Hang(Duration),
}

pub(crate) struct FakeLlmClient {
    behaviour: FakeLlm,
    calls: Arc<AtomicUsize>,
}

impl LLMClient for FakeLlmClient {
    async fn generate_lesson(
        &self,
        _system_prompt: String,
        _user_prompt: String,
    ) -> Result<String, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            FakeLlm::Reply(text) => Ok(text.clone()),
            FakeLlm::Fail => Err(CoreError::ExternalServiceError(
                "model unavailable".to_string(),
            )),
            FakeLlm::Hang(duration) => {
                tokio::time::sleep(*duration).await;
                Ok("too late".to_string())
            }
        }
    }
}

pub(crate) struct FakeHealth;

impl HealthCheckRepository for FakeHealth {
    async fn health(&self) -> Result<u64, CoreError> {
        Ok(1)
    }

    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        Ok(DatabaseHealthStatus {
            status: "healthy".to_string(),
            database: "memory".to_string(),
            response_time_ms: 1,
            checked_at: Utc::now(),
        })
    }
}

pub(crate) type TestService = Service<
    FakeUsers,
    FakeCategories,
    FakePrompts,
    FakeHasher,
    FakeTokens,
    FakeLlmClient,
    FakeHealth,
>;

pub(crate) struct Fixture {
    pub service: TestService,
    store: Shared,
    llm_calls: Arc<AtomicUsize>,
}

fn build(admin_phone: Option<&str>, llm: FakeLlm) -> Fixture {
    let store = Shared::default();
    let llm_calls = Arc::new(AtomicUsize::new(0));

    let service = Service::new(
        FakeUsers(store.clone()),
        FakeCategories(store.clone()),
        FakePrompts(store.clone()),
        FakeHasher,
        FakeTokens,
        FakeLlmClient {
            behaviour: llm,
            calls: llm_calls.clone(),
        },
        FakeHealth,
        RolePolicy::new(admin_phone.map(str::to_string)),
        PromptRules::default(),
        Duration::from_millis(50),
    );

    Fixture {
        service,
        store,
        llm_calls,
    }
}

pub(crate) fn service() -> Fixture {
    build(None, FakeLlm::Reply("## Lesson\nGenerated content.".to_string()))
}

pub(crate) fn service_with_admin(phone: &str) -> Fixture {
    build(Some(phone), FakeLlm::Reply("## Lesson\nGenerated content.".to_string()))
}

pub(crate) fn service_with_llm(llm: FakeLlm) -> Fixture {
    build(None, llm)
}

/// An admin caller that does not exist in the store.
pub(crate) fn admin_identity() -> Identity {
    Identity {
        user_id: 9999,
        name: "Admin".to_string(),
        role: UserRole::Admin,
    }
}

pub(crate) fn user_identity(user: &User) -> Identity {
    Identity::from(user)
}

impl Fixture {
    pub fn seed_user(&self, name: &str, phone: &str, role: UserRole) -> User {
        let mut store = lock(&self.store);
        let now = Utc::now();
        let user = User {
            id: store.id(),
            name: name.to_string(),
            phone: phone.to_string(),
            role,
            created_at: now,
            updated_at: now,
        };
        store.users.push(UserCredentials {
            user: user.clone(),
            password_hash: format!("hashed:{SEEDED_PASSWORD}"),
        });
        user
    }

    pub fn seed_category(&self, name: &str, sub_category: &str) -> (Category, SubCategory) {
        let mut store = lock(&self.store);
        let now = Utc::now();
        let category = Category {
            id: store.id(),
            name: name.to_string(),
            created_at: now,
        };
        let sub_category = SubCategory {
            id: store.id(),
            name: sub_category.to_string(),
            category_id: category.id,
            created_at: now,
        };
        store.categories.push(category.clone());
        store.sub_categories.push(sub_category.clone());
        (category, sub_category)
    }

    pub fn seed_prompt(&self, user_id: i32, category_id: i32, sub_category_id: i32) -> Prompt {
        let mut store = lock(&self.store);
        let prompt = Prompt {
            id: store.id(),
            user_id,
            category_id,
            sub_category_id: Some(sub_category_id),
            prompt: "Explain recursion".to_string(),
            response: "# Lesson: Explain recursion".to_string(),
            created_at: Utc::now(),
        };
        store.prompts.push(prompt.clone());
        prompt
    }

    pub fn stored_user(&self, user_id: i32) -> Option<User> {
        lock(&self.store)
            .users
            .iter()
            .find(|u| u.user.id == user_id)
            .map(|u| u.user.clone())
    }

    pub fn prompt_owners(&self) -> Vec<i32> {
        lock(&self.store).prompts.iter().map(|p| p.user_id).collect()
    }

    /// How many count queries reached the prompt store.
    pub fn prompt_counts(&self) -> usize {
        lock(&self.store).prompt_counts
    }

    pub fn llm_calls(&self) -> usize {
        self.llm_calls.load(Ordering::SeqCst)
    }
}
