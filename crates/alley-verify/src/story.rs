//! Product story generation.
//!
//! Stories come from three places, tried in order: a curated provider for
//! showcase artists (deterministic, never calls out), the external language
//! model in JSON mode, and a templated fallback built from the request. The
//! engine never surfaces an error to its caller; a failed or hung model call
//! degrades to the fallback.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-call timeout for the external model. A hung call must not block a
/// verification request indefinitely.
const MODEL_TIMEOUT: Duration = Duration::from_secs(20);

/// Default chat model when `OPENAI_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-5";

/// Everything the generator knows about the product and its maker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    pub product_title: String,
    pub product_description: String,
    pub artist_name: String,
    pub artist_bio: Option<String>,
    pub medium: String,
    pub style: Option<String>,
    pub location: Option<String>,
}

/// The five narrative fields shown on a product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub ai_story: String,
    pub artist_journey: String,
    pub inspiration: String,
    pub technique: String,
    pub time_to_complete: String,
}

/// Errors internal to the model client. These never cross the engine
/// boundary; they only decide whether the fallback is used.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unparseable model output: {0}")]
    Parse(String),
}

/// Resolves an artist to a pre-written story before the model is consulted.
pub trait StoryProvider: Send + Sync {
    fn story_for(&self, artist_name: &str) -> Option<Story>;
}

/// Curated stories keyed by exact artist name. Showcase accounts get a fixed
/// narrative so demos are deterministic and free.
pub struct CuratedStories {
    stories: HashMap<String, Story>,
}

impl CuratedStories {
    /// An empty provider (every lookup falls through to the model).
    pub fn empty() -> Self {
        Self {
            stories: HashMap::new(),
        }
    }

    pub fn insert(&mut self, artist_name: impl Into<String>, story: Story) {
        self.stories.insert(artist_name.into(), story);
    }
}

impl Default for CuratedStories {
    fn default() -> Self {
        let mut curated = Self::empty();
        curated.insert(
            "Sarthak Jadhav",
            Story {
                ai_story: "Growing up in the tribal heartlands of Maharashtra, Sarthak was mesmerized by the ancient Warli paintings adorning mud walls in his village. His grandmother, a keeper of traditional stories, would trace these symbols with her weathered fingers, explaining how each circle represented life's eternal cycle.\n\nDespite facing ridicule from urban friends who called his art 'primitive,' Sarthak persevered. He spent sleepless nights experimenting with natural pigments - mixing rice paste with clay, creating brushes from bamboo sticks. His breakthrough came when a renowned art critic discovered his work at a local exhibition, praising how he bridged 4000-year-old traditions with contemporary relevance.".to_string(),
                artist_journey: "This piece captures that magical moment when ancient wisdom meets modern life. Each stroke carries the prayers of his ancestors and the hope of preserving dying traditions. Today, Sarthak's work hangs in homes across the world, but each piece still carries the soul of his village.".to_string(),
                inspiration: "Ancient Warli tribal traditions and his grandmother's storytelling".to_string(),
                technique: "Natural pigments on handmade paper using traditional bamboo brushes".to_string(),
                time_to_complete: "3-4 weeks of meditation and careful painting".to_string(),
            },
        );
        curated.insert(
            "Aditya Thete",
            Story {
                ai_story: "In the dusty workshops of Mumbai's artisan quarter, young Aditya's hands bled from learning to carve marble. His master, a 70-year-old sculptor, would often say 'The stone chooses the artist, not the other way around.' Coming from a family of construction workers, Aditya's passion for sculpture was seen as impractical.\n\nThe turning point came during a particularly difficult period when his family faced financial crisis. Instead of abandoning art, Aditya poured his anguish into creating a Ganesha sculpture. Working 16-hour days, surviving on just tea and biscuits, he completed what would become his masterpiece.".to_string(),
                artist_journey: "This sculpture embodies that journey from struggle to triumph. Carved during auspicious times with prayers and dedication, each detail reflects not just artistic skill but spiritual devotion. The international recognition Aditya now enjoys feels surreal, but his heart remains in that small Mumbai workshop.".to_string(),
                inspiration: "Family struggles and deep spiritual devotion to Lord Ganesha".to_string(),
                technique: "Traditional marble carving with hand tools passed down through generations".to_string(),
                time_to_complete: "6-8 weeks of intensive carving and finishing".to_string(),
            },
        );
        curated.insert(
            "Sakshi Peharkar",
            Story {
                ai_story: "The art of traditional jewelry-making chose Sakshi before she chose it. Born into a family of goldsmiths in Aurangabad, she was creating intricate patterns with wire and beads while other children played with toys. But being a woman in a male-dominated craft meant constant battles - suppliers who refused to deal with her, customers who questioned her expertise.\n\nHer persistence paid off when she recreated a lost 300-year-old Maharashtrian Nath design from a faded museum photograph. The painstaking research, hunting for ancient techniques in dusty libraries, and months of trial and error resulted in a piece that left jewelry historians speechless.".to_string(),
                artist_journey: "This piece carries the weight of that heritage - every curve, every gem placement follows traditions passed down through generations of Maharashtrian craftsmen. When you wear this, you carry with you the pride and artistry of countless artisans who kept this tradition alive.".to_string(),
                inspiration: "300-year-old Maharashtrian bridal traditions and family goldsmith heritage".to_string(),
                technique: "Traditional filigree work with kundan setting and hand-forged silver".to_string(),
                time_to_complete: "4-5 weeks including research and intricate handwork".to_string(),
            },
        );
        curated
    }
}

impl StoryProvider for CuratedStories {
    fn story_for(&self, artist_name: &str) -> Option<Story> {
        self.stories.get(artist_name).cloned()
    }
}

/// A chat model that can answer with a single JSON object.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete_json(&self, system: &str, user: &str) -> Result<Value, ModelError>;
}

/// OpenAI chat-completions client in JSON mode.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::with_model(api_key, &model)
    }

    pub fn with_model(api_key: String, model: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(MODEL_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key,
            model: model.to_string(),
            client,
        }
    }

    /// Builds a client from `OPENAI_API_KEY`, or `None` when unset. The
    /// engine treats a missing key like a permanently failing model.
    pub fn from_env() -> Option<Self> {
        std::env::var("OPENAI_API_KEY").ok().map(Self::new)
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete_json(&self, system: &str, user: &str) -> Result<Value, ModelError> {
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "response_format": {"type": "json_object"},
            "max_tokens": 800,
        });

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, body });
        }

        #[derive(Deserialize)]
        struct Message {
            content: String,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let api_response: ApiResponse = response.json().await?;
        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ModelError::Parse("no choices in response".to_string()))?;

        serde_json::from_str(content).map_err(|e| {
            let preview: String = content.chars().take(200).collect();
            ModelError::Parse(format!("{} (content: {})", e, preview))
        })
    }
}

/// The story generation entry point used by the server.
pub struct StoryEngine {
    curated: Arc<dyn StoryProvider>,
    model: Option<Arc<dyn LanguageModel>>,
}

impl StoryEngine {
    pub fn new(curated: Arc<dyn StoryProvider>, model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self { curated, model }
    }

    /// Generates a story for the request. Infallible: curated hit, then the
    /// model, then the templated fallback.
    pub async fn generate(&self, request: &StoryRequest) -> Story {
        if let Some(story) = self.curated.story_for(&request.artist_name) {
            return story;
        }

        let Some(model) = &self.model else {
            return fallback_story(request);
        };

        match model
            .complete_json(SYSTEM_PROMPT, &build_prompt(request))
            .await
        {
            Ok(value) => story_from_value(value),
            Err(e) => {
                tracing::warn!(artist = %request.artist_name, error = %e, "story generation failed, using fallback");
                fallback_story(request)
            }
        }
    }
}

const SYSTEM_PROMPT: &str = "You are an expert art historian and storyteller who creates compelling narratives about artworks and their creators. Your stories should be authentic, emotionally engaging, and true to the artistic medium and style.";

fn build_prompt(request: &StoryRequest) -> String {
    let mut prompt = format!(
        "Create a deeply emotional and detailed story for this Indian handcrafted artwork:\n\n\
         Title: {}\nDescription: {}\nArtist: {}\n",
        request.product_title, request.product_description, request.artist_name
    );
    if let Some(bio) = &request.artist_bio {
        prompt.push_str(&format!("Artist Bio: {}\n", bio));
    }
    prompt.push_str(&format!("Medium: {}\n", request.medium));
    if let Some(style) = &request.style {
        prompt.push_str(&format!("Style: {}\n", style));
    }
    if let Some(location) = &request.location {
        prompt.push_str(&format!("Location: {}\n", location));
    }
    prompt.push_str(
        "\nPlease provide a response in JSON format with the following structure:\n\
         {\n\
         \t\"aiStory\": \"A deeply personal narrative about the artist's inspiration, struggles, and breakthrough moments - include specific details about family background, cultural heritage, and the challenges faced (300-400 words in 2-3 emotional paragraphs)\",\n\
         \t\"artistJourney\": \"How this piece represents the artist's growth, recognition received, and cultural impact (150-200 words)\",\n\
         \t\"inspiration\": \"Specific cultural, personal, or spiritual inspiration behind this work\",\n\
         \t\"technique\": \"Detailed description of traditional Indian techniques and materials used\",\n\
         \t\"timeToComplete\": \"Realistic timeframe for creating this handcrafted piece\"\n\
         }\n\n\
         Focus on authentic Indian cultural heritage, traditional techniques, personal struggles, and breakthrough moments that make buyers feel emotionally connected to the artist's journey.",
    );
    prompt
}

/// Maps a parsed model response onto the five fields, filling gaps with
/// generic text rather than rejecting a partial answer.
fn story_from_value(value: Value) -> Story {
    let field = |name: &str, default: &str| -> String {
        value
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    Story {
        ai_story: field("aiStory", "A beautiful piece created with passion and skill."),
        artist_journey: field(
            "artistJourney",
            "This work represents an important milestone in the artist's creative journey.",
        ),
        inspiration: field("inspiration", "Life experiences and artistic vision"),
        technique: field("technique", "Traditional artistic methods"),
        time_to_complete: field("timeToComplete", "Several weeks"),
    }
}

/// Templated story for when the model is unavailable or unusable.
fn fallback_story(request: &StoryRequest) -> Story {
    Story {
        ai_story: format!(
            "This {} piece by {} represents a unique artistic vision brought to life through skilled craftsmanship. The work demonstrates the artist's mastery of their chosen medium and their ability to translate emotion into visual form.",
            request.medium.to_lowercase(),
            request.artist_name
        ),
        artist_journey: format!(
            "For {}, this piece represents both technical achievement and personal expression. The creation process involved careful consideration of composition, color, and form to achieve the desired artistic effect.",
            request.artist_name
        ),
        inspiration: "Personal experiences and artistic exploration".to_string(),
        technique: format!("Traditional {} techniques", request.medium),
        time_to_complete: "2-4 weeks".to_string(),
    }
}
