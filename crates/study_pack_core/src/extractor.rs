//! crates/study_pack_core/src/extractor.rs
//!
//! Local, heuristic derivation of study artifacts from free-text notes.
//! Nothing here performs I/O; the only non-determinism is the order of quiz options.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Artifact, Flashcard, QuizQuestion};
use crate::ports::{PackGenerationService, PortResult};

pub const SUMMARY_LABEL: &str = "Summary (auto): ";
pub const SUMMARY_MAX_CHARS: usize = 400;
pub const TRUNCATION_MARKER: &str = "...";
pub const KEY_POINT_BULLET: &str = "• ";
pub const MAX_KEY_POINTS: usize = 6;
pub const MAX_FLASHCARDS: usize = 6;
pub const MAX_QUIZ_QUESTIONS: usize = 4;
pub const DISTRACTORS: [&str; 2] = [
    "This option is incorrect but related.",
    "This is a random wrong answer.",
];

/// Derives an artifact, shuffling quiz options with the thread-local RNG.
pub fn generate(title: &str, notes: &str) -> Artifact {
    generate_with_rng(title, notes, &mut rand::thread_rng())
}

/// Derives an artifact using the given RNG for quiz option order.
pub fn generate_with_rng<R: Rng + ?Sized>(title: &str, notes: &str, rng: &mut R) -> Artifact {
    let trimmed = notes.trim();
    let sentences = split_sentences(trimmed);

    let key_points = sentences
        .iter()
        .take(MAX_KEY_POINTS)
        .map(|s| format!("{KEY_POINT_BULLET}{s}"))
        .collect();

    let flashcards = sentences
        .iter()
        .take(MAX_FLASHCARDS)
        .enumerate()
        .map(|(idx, s)| Flashcard {
            front: format!("Key idea #{} about {}", idx + 1, title),
            back: s.to_string(),
        })
        .collect();

    let quiz_questions = sentences
        .iter()
        .take(MAX_QUIZ_QUESTIONS)
        .map(|s| quiz_question(title, s, rng))
        .collect();

    Artifact {
        summary: summarize(trimmed),
        key_points,
        flashcards,
        quiz_questions,
    }
}

/// Labels the text, cutting it at `SUMMARY_MAX_CHARS` characters.
pub fn summarize(trimmed: &str) -> String {
    match trimmed.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((cut, _)) => format!("{SUMMARY_LABEL}{}{TRUNCATION_MARKER}", &trimmed[..cut]),
        None => format!("{SUMMARY_LABEL}{trimmed}"),
    }
}

/// Splits on periods and line breaks, dropping fragments that are empty after trimming.
/// Abbreviations and decimals are split like any other period.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(|c: char| c == '.' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn quiz_question<R: Rng + ?Sized>(title: &str, sentence: &str, rng: &mut R) -> QuizQuestion {
    let mut options = vec![
        sentence.to_string(),
        DISTRACTORS[0].to_string(),
        DISTRACTORS[1].to_string(),
    ];
    options.shuffle(rng);
    // A sentence can match a distractor verbatim; the first match wins.
    let correct_index = options
        .iter()
        .position(|o| o == sentence)
        .unwrap_or_default();

    QuizQuestion {
        question: format!("What is an important fact about {title}?"),
        options,
        correct_index,
        explanation: format!("The correct idea is: \"{sentence}\"."),
    }
}

/// `PackGenerationService` backed by the local heuristics above.
#[derive(Debug, Clone, Default)]
pub struct HeuristicGenerator;

#[async_trait]
impl PackGenerationService for HeuristicGenerator {
    async fn generate(&self, title: &str, notes: &str) -> PortResult<Artifact> {
        Ok(generate(title, notes))
    }
}
