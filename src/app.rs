use crate::errors::AdviceError;
use crate::managers::credits::CreditsManager;
use crate::managers::eligibility::EligibilityManager;
use crate::services::credits::CreditsService;
use crate::services::dispatch::{ActionHandler, Dispatcher};
use crate::services::eligibility::EligibilityService;
use crate::services::logger::Logger;
use crate::services::matcher::MatcherConfig;
use crate::services::suggest::SuggestService;
use crate::stores::data_store::DataStore;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub store: Arc<DataStore>,
    pub dispatcher: Arc<Dispatcher>,
}

impl App {
    pub fn initialize() -> Result<Self, AdviceError> {
        let logger = Logger::new("advisor");
        let store = Arc::new(DataStore::new(logger.clone()));
        Self::wire(logger, store)
    }

    pub fn initialize_with_dir(dir: &Path) -> Result<Self, AdviceError> {
        let logger = Logger::new("advisor");
        let store = Arc::new(DataStore::with_dir(logger.clone(), dir));
        Self::wire(logger, store)
    }

    fn wire(logger: Logger, store: Arc<DataStore>) -> Result<Self, AdviceError> {
        let config = MatcherConfig::default();

        let eligibility_service = Arc::new(EligibilityService::new(
            logger.clone(),
            store.clone(),
            config,
        ));
        let suggest_service = Arc::new(SuggestService::new(logger.clone(), store.clone(), config));
        let credits_service = Arc::new(CreditsService::new(logger.clone(), store.clone()));

        let eligibility_manager = Arc::new(EligibilityManager::new(
            logger.clone(),
            store.clone(),
            eligibility_service,
            suggest_service,
        ));
        let credits_manager = Arc::new(CreditsManager::new(logger.clone(), credits_service));

        let mut handlers: HashMap<String, Arc<dyn ActionHandler>> = HashMap::new();
        handlers.insert("eligibility".to_string(), eligibility_manager);
        handlers.insert("credits".to_string(), credits_manager);

        let dispatcher = Arc::new(Dispatcher::new(logger.clone(), handlers));

        Ok(Self {
            logger,
            store,
            dispatcher,
        })
    }
}
