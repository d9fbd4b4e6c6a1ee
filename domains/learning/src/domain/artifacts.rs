//! Learning artifact shapes
//!
//! The three payloads a generation produces. Parsing is strict: unknown
//! fields, missing fields and wrong JSON types are all rejected, so a
//! half-understood provider answer never becomes an artifact.
//!
//! Wire names follow the client contract (`correctAnswer` is camelCase).

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Which artifact a provider call produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Plan,
    Flashcards,
    Quiz,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Plan => write!(f, "plan"),
            ArtifactKind::Flashcards => write!(f, "flashcards"),
            ArtifactKind::Quiz => write!(f, "quiz"),
        }
    }
}

/// Behavior shared by the three artifact payloads
pub trait Artifact: Serialize + DeserializeOwned + Send + 'static {
    const KIND: ArtifactKind;

    /// Item count the provider template asks for
    const TARGET_COUNT: usize;

    fn item_count(&self) -> usize;

    /// Structural rules serde cannot express
    fn check(&self) -> Result<(), String>;
}

/// Parse a provider answer into an artifact, rejecting anything off-shape
pub fn parse_artifact<A: Artifact>(content: &str) -> Result<A, String> {
    let artifact: A = serde_json::from_str(content).map_err(|e| e.to_string())?;
    artifact.check()?;
    Ok(artifact)
}

/// One day of a learning plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanDay {
    pub day: i32,
    pub title: String,
    pub description: String,
    pub tasks: Vec<String>,
}

/// Multi-day learning plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanArtifact {
    pub days: Vec<PlanDay>,
}

impl Artifact for PlanArtifact {
    const KIND: ArtifactKind = ArtifactKind::Plan;
    const TARGET_COUNT: usize = 7;

    fn item_count(&self) -> usize {
        self.days.len()
    }

    fn check(&self) -> Result<(), String> {
        if self.days.is_empty() {
            return Err("plan has no days".to_string());
        }
        if let Some(day) = self.days.iter().find(|d| d.tasks.is_empty()) {
            return Err(format!("plan day {} has no tasks", day.day));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flashcard {
    pub id: i32,
    pub question: String,
    pub answer: String,
}

/// Flashcard set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlashcardArtifact {
    pub cards: Vec<Flashcard>,
}

impl Artifact for FlashcardArtifact {
    const KIND: ArtifactKind = ArtifactKind::Flashcards;
    const TARGET_COUNT: usize = 10;

    fn item_count(&self) -> usize {
        self.cards.len()
    }

    fn check(&self) -> Result<(), String> {
        if self.cards.is_empty() {
            return Err("flashcard set has no cards".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizQuestion {
    pub id: i32,
    pub question: String,
    pub options: [String; 4],
    /// Index into `options`
    #[serde(rename = "correctAnswer")]
    pub correct_answer: u8,
    pub explanation: String,
}

/// Multiple-choice quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizArtifact {
    pub questions: Vec<QuizQuestion>,
}

impl Artifact for QuizArtifact {
    const KIND: ArtifactKind = ArtifactKind::Quiz;
    const TARGET_COUNT: usize = 8;

    fn item_count(&self) -> usize {
        self.questions.len()
    }

    fn check(&self) -> Result<(), String> {
        if self.questions.is_empty() {
            return Err("quiz has no questions".to_string());
        }
        if let Some(q) = self
            .questions
            .iter()
            .find(|q| usize::from(q.correct_answer) >= q.options.len())
        {
            return Err(format!(
                "quiz question {} has correctAnswer {} outside 0..=3",
                q.id, q.correct_answer
            ));
        }
        Ok(())
    }
}
