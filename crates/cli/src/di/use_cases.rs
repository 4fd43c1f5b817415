use sitewarden_application::ports::{KeyValueStore, TabNavigator};
use sitewarden_application::services::BlockListStore;
use sitewarden_application::use_cases::{
    AddBlockedDomainUseCase, AddCurrentPageUseCase, GetBlockedDomainsUseCase,
    NavigationGuardUseCase, RemoveBlockedDomainUseCase, ToggleBlockedDomainUseCase,
};
use sitewarden_domain::Config;
use sitewarden_infrastructure::host::SimulatedTabHost;
use sitewarden_infrastructure::storage::JsonFileKeyValueStore;
use std::sync::Arc;

pub struct UseCases {
    pub add: AddBlockedDomainUseCase,
    pub remove: RemoveBlockedDomainUseCase,
    pub toggle: ToggleBlockedDomainUseCase,
    pub get: GetBlockedDomainsUseCase,
    pub add_current_page: AddCurrentPageUseCase,
    pub guard: NavigationGuardUseCase,
    pub tabs: Arc<SimulatedTabHost>,
}

impl UseCases {
    pub fn new(config: &Config) -> Self {
        let kv: Arc<dyn KeyValueStore> = Arc::new(JsonFileKeyValueStore::new(&config.storage.path));
        let store = Arc::new(BlockListStore::from_config(kv, &config.storage));

        let tabs = Arc::new(SimulatedTabHost::new());
        let navigator: Arc<dyn TabNavigator> = tabs.clone();
        let blocked_page = config.guard.blocked_page_url.as_str();

        Self {
            add: AddBlockedDomainUseCase::new(store.clone()),
            remove: RemoveBlockedDomainUseCase::new(store.clone()),
            toggle: ToggleBlockedDomainUseCase::new(store.clone()),
            get: GetBlockedDomainsUseCase::new(store.clone()),
            add_current_page: AddCurrentPageUseCase::new(
                store.clone(),
                navigator.clone(),
                blocked_page,
            ),
            guard: NavigationGuardUseCase::new(store, navigator, blocked_page),
            tabs,
        }
    }
}
