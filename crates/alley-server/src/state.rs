//! Shared application state.

use std::sync::Arc;

use alley_verify::{
    AuthenticityAnalyzer, CuratedStories, LanguageModel, OpenAiClient, SimulatedVision,
    StoryEngine,
};

use crate::auth::JwtConfig;
use crate::email::EmailService;
use crate::store::MemStore;

/// Everything handlers need, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemStore>,
    pub jwt: JwtConfig,
    pub stories: Arc<StoryEngine>,
    pub analyzer: Arc<dyn AuthenticityAnalyzer>,
    pub email: Arc<EmailService>,
}

impl AppState {
    /// Default wiring: in-memory store, simulated vision analyzer, curated
    /// stories with the OpenAI client behind them when `OPENAI_API_KEY` is
    /// set (without a key the engine falls back to templated stories).
    pub fn new(jwt_secret: &[u8]) -> Self {
        let model = OpenAiClient::from_env().map(|c| Arc::new(c) as Arc<dyn LanguageModel>);
        Self {
            store: Arc::new(MemStore::new()),
            jwt: JwtConfig::from_secret(jwt_secret),
            stories: Arc::new(StoryEngine::new(Arc::new(CuratedStories::default()), model)),
            analyzer: Arc::new(SimulatedVision),
            email: Arc::new(EmailService),
        }
    }

    /// Swaps the authenticity analyzer (tests pin the AI score this way).
    pub fn with_analyzer(mut self, analyzer: Arc<dyn AuthenticityAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Swaps the story engine.
    pub fn with_stories(mut self, stories: Arc<StoryEngine>) -> Self {
        self.stories = stories;
        self
    }
}
