// Alley Verify - authenticity scoring and story generation for Artisan Alley

pub mod authenticity;
pub mod ids;
pub mod scoring;
pub mod story;

pub use authenticity::{
    AuthenticityAnalysis, AuthenticityAnalyzer, AuthenticityReport, AuthenticityRequest,
    SimulatedVision,
};
pub use ids::mint_verification_id;
pub use scoring::{score_submission, Composite, TrustTier};
pub use story::{
    CuratedStories, LanguageModel, OpenAiClient, Story, StoryEngine, StoryProvider, StoryRequest,
};
