use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Languages the app can teach or teach from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Es,
    Fr,
    De,
    It,
    Ru,
    Zh,
    Ja,
    Ko,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 9] = [
        LanguageCode::En,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::De,
        LanguageCode::It,
        LanguageCode::Ru,
        LanguageCode::Zh,
        LanguageCode::Ja,
        LanguageCode::Ko,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::De => "German",
            Self::It => "Italian",
            Self::Ru => "Russian",
            Self::Zh => "Chinese",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub target_language: LanguageCode,
    pub user_language: LanguageCode,
}

/// Successful response from the auth endpoints. The backend returns more
/// fields; only the token is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub target_language: Option<LanguageCode>,
    pub user_language: Option<LanguageCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty_level: DifficultyLevel,
    pub is_active: bool,
    pub language: LanguageCode,
    pub created_at: DateTime<Utc>,
    /// Minimum speaking time, in seconds.
    pub min_duration: u32,
    pub min_words: u32,
}

/// One entry of the recommended-phrase list: example sentence, its
/// translation into the user's language, and the example audio URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Phrase {
    pub id: String,
    pub text: String,
    pub translation: String,
    pub audio: String,
}
