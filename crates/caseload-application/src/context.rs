//! Composition root.
//!
//! [`AppContext`] wires one query cache, one auth context and every
//! resource service over a set of adapters. Everything inside is a cheap
//! clone handle sharing the same cache.

use chrono::NaiveDate;
use std::sync::Arc;

use caseload_core::Result;
use caseload_core::auth::IdentityProvider;
use caseload_core::config::ClientConfig;
use caseload_core::game::{GameContentClient, GameResultClient};
use caseload_core::health::HealthClient;
use caseload_core::newsletter::NewsletterClient;
use caseload_core::school::{DistrictClient, SchoolClient};
use caseload_core::session::SessionClient;
use caseload_core::state::LocalStore;
use caseload_core::student::StudentClient;
use caseload_core::theme::ThemeClient;
use caseload_core::therapist::TherapistClient;
use caseload_core::util::calendar::CalendarView;
use caseload_infrastructure::api::{
    ApiClient, HttpGameClient, HttpHealthClient, HttpIdentityProvider, HttpNewsletterClient,
    HttpSchoolClient, HttpSessionClient, HttpStudentClient, HttpThemeClient, HttpTherapistClient,
};
use caseload_infrastructure::{CaseloadPaths, FileLocalStore};

use crate::auth::AuthContext;
use crate::calendar::CalendarQuery;
use crate::onboarding::OnboardingService;
use crate::query::QueryClient;
use crate::recently_viewed::RecentlyViewedService;
use crate::resources::{
    GameQueries, HealthQueries, NewsletterService, SchoolQueries, SessionQueries, StudentQueries,
    ThemeQueries, TherapistQueries,
};
use crate::selection::SessionSelectionContext;

/// One adapter per backend resource plus the identity provider.
#[derive(Clone)]
pub struct ResourceAdapters {
    pub identity: Arc<dyn IdentityProvider>,
    pub students: Arc<dyn StudentClient>,
    pub sessions: Arc<dyn SessionClient>,
    pub therapists: Arc<dyn TherapistClient>,
    pub themes: Arc<dyn ThemeClient>,
    pub schools: Arc<dyn SchoolClient>,
    pub districts: Arc<dyn DistrictClient>,
    pub game_content: Arc<dyn GameContentClient>,
    pub game_results: Arc<dyn GameResultClient>,
    pub newsletter: Arc<dyn NewsletterClient>,
    pub health: Arc<dyn HealthClient>,
}

impl ResourceAdapters {
    /// HTTP adapters sharing one client and bearer token.
    pub fn http(api: ApiClient, store: Arc<dyn LocalStore>) -> Self {
        let schools = Arc::new(HttpSchoolClient::new(api.clone()));
        let games = Arc::new(HttpGameClient::new(api.clone()));
        Self {
            identity: Arc::new(HttpIdentityProvider::new(api.clone(), store)),
            students: Arc::new(HttpStudentClient::new(api.clone())),
            sessions: Arc::new(HttpSessionClient::new(api.clone())),
            therapists: Arc::new(HttpTherapistClient::new(api.clone())),
            themes: Arc::new(HttpThemeClient::new(api.clone())),
            schools: schools.clone(),
            districts: schools,
            game_content: games.clone(),
            game_results: games,
            newsletter: Arc::new(HttpNewsletterClient::new(api.clone())),
            health: Arc::new(HttpHealthClient::new(api)),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub client: QueryClient,
    pub auth: AuthContext,
    pub students: StudentQueries,
    pub sessions: SessionQueries,
    pub therapists: TherapistQueries,
    pub themes: ThemeQueries,
    pub schools: SchoolQueries,
    pub games: GameQueries,
    pub newsletter: NewsletterService,
    pub health: HealthQueries,
    pub selection: SessionSelectionContext,
    pub recently_viewed: RecentlyViewedService,
    pub onboarding: OnboardingService,
}

impl AppContext {
    pub fn new(adapters: ResourceAdapters, store: Arc<dyn LocalStore>, config: &ClientConfig) -> Self {
        let client = QueryClient::with_stale_after(config.cache.stale_after());
        let auth = AuthContext::new(adapters.identity, client.clone());
        let sessions = SessionQueries::new(client.clone(), auth.clone(), adapters.sessions);

        Self {
            students: StudentQueries::new(client.clone(), auth.clone(), adapters.students),
            therapists: TherapistQueries::new(client.clone(), auth.clone(), adapters.therapists),
            themes: ThemeQueries::new(client.clone(), adapters.themes),
            schools: SchoolQueries::new(client.clone(), adapters.schools, adapters.districts),
            games: GameQueries::new(
                client.clone(),
                adapters.game_content,
                adapters.game_results,
            ),
            newsletter: NewsletterService::new(client.clone(), adapters.newsletter),
            health: HealthQueries::new(client.clone(), adapters.health),
            selection: SessionSelectionContext::new(sessions.clone()),
            recently_viewed: RecentlyViewedService::new(store.clone()),
            onboarding: OnboardingService::new(store),
            sessions,
            auth,
            client,
        }
    }

    /// HTTP adapters and the file store, from configuration.
    pub fn bootstrap(config: &ClientConfig, paths: &CaseloadPaths) -> Result<Self> {
        let store: Arc<dyn LocalStore> =
            Arc::new(FileLocalStore::from_paths(paths, config.storage.dir.clone())?);
        let api = ApiClient::new(&config.api)?;
        tracing::info!("[Bootstrap] API base URL: {}", api.base_url());

        Ok(Self::new(ResourceAdapters::http(api, store.clone()), store, config))
    }

    pub fn calendar(&self, view: CalendarView, anchor: NaiveDate) -> CalendarQuery {
        CalendarQuery::new(self.sessions.clone(), view, anchor)
    }
}
