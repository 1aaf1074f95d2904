use crate::model::Question;

/// A wrong answer kept for the post-game review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake {
    /// Problem text without the trailing `" = ?"`.
    pub question_text: String,
    pub submitted_answer: i64,
    pub correct_answer: i64,
}

impl Mistake {
    #[must_use]
    pub fn new(question: &Question, submitted_answer: i64) -> Self {
        Self {
            question_text: question.prompt(),
            submitted_answer,
            correct_answer: question.correct_answer(),
        }
    }
}
