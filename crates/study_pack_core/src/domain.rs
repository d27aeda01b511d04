//! crates/study_pack_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! Field names serialize in camelCase, which is the persisted blob format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One study unit, either written by hand or derived from notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    /// Opaque identifier. New packs get a v4 UUID; older blobs may hold other strings.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
}

impl Pack {
    /// Builds a pack from an already derived artifact.
    pub fn from_artifact(id: String, title: String, notes: String, artifact: Artifact) -> Self {
        Self {
            id,
            title,
            notes,
            summary: artifact.summary,
            key_points: artifact.key_points,
            flashcards: artifact.flashcards,
            quiz_questions: artifact.quiz_questions,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A multiple-choice question. `correct_index` always addresses `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// The option `correct_index` addresses, for checking an answer.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

/// The bundle the extractor derives from a set of notes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Artifact {
    pub summary: String,
    pub key_points: Vec<String>,
    pub flashcards: Vec<Flashcard>,
    pub quiz_questions: Vec<QuizQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_pack_serializes_camel_case() {
        let pack = Pack::from_artifact(
            Uuid::new_v4().to_string(),
            "Biology".to_string(),
            "Cells divide".to_string(),
            Artifact {
                summary: "s".to_string(),
                key_points: vec!["• Cells divide".to_string()],
                flashcards: vec![],
                quiz_questions: vec![QuizQuestion {
                    question: "q".to_string(),
                    options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    correct_index: 1,
                    explanation: "e".to_string(),
                }],
            },
        );

        let json = serde_json::to_value(&pack).unwrap();
        assert!(json.get("keyPoints").is_some());
        assert!(json.get("quizQuestions").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["quizQuestions"][0]["correctIndex"], 1);
    }

    #[test]
    fn test_missing_derived_fields_default_to_empty() {
        let json = r#"[{
            "id": "5f0c6a1e-8a7b-4a55-9d0e-2d3c1b6f9a10",
            "title": "Old pack",
            "createdAt": "2024-01-02T03:04:05Z"
        }]"#;

        let packs: Vec<Pack> = serde_json::from_str(json).unwrap();
        assert_eq!(packs.len(), 1);
        assert!(packs[0].notes.is_empty());
        assert!(packs[0].summary.is_empty());
        assert!(packs[0].key_points.is_empty());
        assert!(packs[0].flashcards.is_empty());
        assert!(packs[0].quiz_questions.is_empty());
    }
}
