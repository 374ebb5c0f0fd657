use crate::types::{Phrase, TopicDto};
use serde::{Deserialize, Serialize};

/// Clip id the user's own recording plays under. Reserved so it can never
/// collide with a phrase id; toggle semantics are identical to phrase
/// playback.
pub const OWN_RECORDING_CLIP_ID: &str = "own-recording";

/// What the practice screen asks the user to do, assembled from the fetched
/// topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakingTask {
    pub topic: String,
    pub description: String,
    pub duration_secs: u32,
    pub min_words: u32,
}

impl From<TopicDto> for SpeakingTask {
    fn from(topic: TopicDto) -> Self {
        Self {
            topic: topic.title,
            description: topic.description,
            duration_secs: topic.min_duration,
            min_words: topic.min_words,
        }
    }
}

/// Renders a second count as `m:ss` for the task requirements row.
pub fn format_duration(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    Empty,
    Unsaved,
    Saved,
}

/// The user's spoken answer, as far as this crate tracks it.
///
/// Audio capture itself lives in the platform layer; the draft records the
/// metadata the screen needs (is there a take, was it saved, where does its
/// playback clip live).
#[derive(Debug, Clone, Default)]
pub struct RecordingDraft {
    status: DraftStatus,
    clip_uri: Option<String>,
}

impl RecordingDraft {
    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn has_recording(&self) -> bool {
        self.status != DraftStatus::Empty
    }

    /// Called by the capture layer when a take finishes. Replaces any
    /// previous take, saved or not.
    pub fn attach(&mut self, clip_uri: impl Into<String>) {
        self.clip_uri = Some(clip_uri.into());
        self.status = DraftStatus::Unsaved;
    }

    /// Discards the current take. Idempotent.
    pub fn delete(&mut self) {
        *self = Self::default();
    }

    /// Marks the take as kept. Returns false when there is nothing to save.
    pub fn save(&mut self) -> bool {
        if self.status == DraftStatus::Unsaved {
            self.status = DraftStatus::Saved;
            true
        } else {
            false
        }
    }

    /// Clip identity and URI to hand the playback coordinator, once a take
    /// exists.
    pub fn playback_clip(&self) -> Option<(&'static str, &str)> {
        self.clip_uri
            .as_deref()
            .map(|uri| (OWN_RECORDING_CLIP_ID, uri))
    }
}

/// Everything the practice screen shows: the task, the recommended phrases,
/// and the state of the user's own take.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    pub task: SpeakingTask,
    pub phrases: Vec<Phrase>,
    pub recording: RecordingDraft,
}

impl PracticeSession {
    pub fn new(topic: TopicDto) -> Self {
        Self {
            task: topic.into(),
            phrases: recommended_phrases(),
            recording: RecordingDraft::default(),
        }
    }
}

/// Built-in example phrases with translations into the user's language.
/// Served locally until the backend grows a phrases endpoint.
pub fn recommended_phrases() -> Vec<Phrase> {
    [
        (
            "1",
            "I enjoy spending time with my family and friends",
            "Я люблю проводить время с семьей и друзьями",
        ),
        (
            "2",
            "My favorite hobby is reading books",
            "Мое любимое хобби - чтение книг",
        ),
        (
            "3",
            "I like to travel and explore new places",
            "Я люблю путешествовать и исследовать новые места",
        ),
        (
            "4",
            "Music helps me relax after a long day",
            "Музыка помогает мне расслабиться после долгого дня",
        ),
        (
            "5",
            "I try to exercise regularly to stay healthy",
            "Я стараюсь регулярно заниматься спортом, чтобы оставаться здоровым",
        ),
    ]
    .into_iter()
    .map(|(id, text, translation)| Phrase {
        id: id.to_string(),
        text: text.to_string(),
        translation: translation.to_string(),
        audio: format!("https://example.com/audio{id}.mp3"),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DifficultyLevel, LanguageCode};
    use chrono::TimeZone;

    fn topic() -> TopicDto {
        TopicDto {
            id: "t-1".to_string(),
            title: "Daily Routine and Hobbies".to_string(),
            description: "Tell us about your typical day".to_string(),
            difficulty_level: DifficultyLevel::Beginner,
            is_active: true,
            language: LanguageCode::En,
            created_at: chrono::Utc.with_ymd_and_hms(2026, 1, 10, 8, 30, 0).unwrap(),
            min_duration: 60,
            min_words: 50,
        }
    }

    #[test]
    fn task_is_built_from_the_topic_requirements() {
        let task = SpeakingTask::from(topic());
        assert_eq!(task.topic, "Daily Routine and Hobbies");
        assert_eq!(task.duration_secs, 60);
        assert_eq!(task.min_words, 50);
    }

    #[test]
    fn format_duration_renders_minutes_and_padded_seconds() {
        assert_eq!(format_duration(30), "0:30");
        assert_eq!(format_duration(60), "1:00");
        assert_eq!(format_duration(95), "1:35");
    }

    #[test]
    fn draft_walks_record_save_delete_transitions() {
        let mut draft = RecordingDraft::default();
        assert!(!draft.has_recording());
        assert!(!draft.save());

        draft.attach("file:///tmp/take1.m4a");
        assert_eq!(draft.status(), DraftStatus::Unsaved);
        assert_eq!(
            draft.playback_clip(),
            Some((OWN_RECORDING_CLIP_ID, "file:///tmp/take1.m4a"))
        );

        assert!(draft.save());
        assert_eq!(draft.status(), DraftStatus::Saved);
        assert!(!draft.save());

        draft.delete();
        assert!(!draft.has_recording());
        assert_eq!(draft.playback_clip(), None);
    }

    #[test]
    fn new_session_starts_with_phrases_and_an_empty_draft() {
        let session = PracticeSession::new(topic());
        assert_eq!(session.phrases.len(), 5);
        assert_eq!(session.phrases[0].id, "1");
        assert!(!session.recording.has_recording());
    }
}
