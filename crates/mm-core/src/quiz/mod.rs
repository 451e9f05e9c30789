//! Quiz questions asked at maze endpoints
//!
//! A bank is either the built-in set or a JSON array of
//! `{ "prompt": ..., "choices": [...], "answer": <index> }` objects.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rng::RandomSource;
use crate::world::errors::QuestionError;

/// A multiple-choice question as stored in a bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub choices: Vec<String>,
    /// Index of the correct entry in `choices`
    pub answer: usize,
}

impl Question {
    pub fn new(prompt: &str, choices: &[&str], answer: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            answer,
        }
    }

    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.choices.len() < 2 {
            return Err(QuestionError::TooFewChoices {
                prompt: self.prompt.clone(),
            });
        }
        if self.answer >= self.choices.len() {
            return Err(QuestionError::AnswerOutOfRange {
                prompt: self.prompt.clone(),
                answer: self.answer,
                choices: self.choices.len(),
            });
        }
        Ok(())
    }
}

/// (prompt, choices, answer)
const BUILTIN: &[(&str, &[&str], usize)] = &[
    ("What is 7 x 8?", &["54", "56", "64", "48"], 1),
    ("Which planet is closest to the Sun?", &["Venus", "Earth", "Mercury", "Mars"], 2),
    ("What is the chemical symbol for water?", &["H2O", "CO2", "O2", "NaCl"], 0),
    ("How many sides does a hexagon have?", &["5", "6", "7", "8"], 1),
    ("What is the largest ocean on Earth?", &["Atlantic", "Indian", "Arctic", "Pacific"], 3),
    ("What is 144 divided by 12?", &["10", "11", "12", "14"], 2),
    ("Which gas do plants absorb from the air?", &["Oxygen", "Carbon dioxide", "Nitrogen", "Helium"], 1),
    ("What is the binary form of 5?", &["101", "110", "111", "100"], 0),
    ("How many degrees are in a right angle?", &["45", "60", "90", "180"], 2),
    ("Which continent is Egypt in?", &["Asia", "Africa", "Europe", "South America"], 1),
];

/// Questions plus the draw pile that cycles through them
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    /// Indices not yet drawn this cycle, drawn from the back
    pile: Vec<usize>,
}

impl QuestionBank {
    /// Build a bank, validating every question
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::Empty);
        }
        for question in &questions {
            question.validate()?;
        }
        Ok(Self {
            questions,
            pile: Vec::new(),
        })
    }

    /// The bank compiled into the game
    pub fn builtin() -> Self {
        Self {
            questions: BUILTIN
                .iter()
                .map(|(prompt, choices, answer)| Question::new(prompt, choices, *answer))
                .collect(),
            pile: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, QuestionError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, QuestionError> {
        let json = std::fs::read_to_string(path)?;
        let bank = Self::from_json(&json)?;
        debug!(path = %path.display(), count = bank.len(), "loaded question bank");
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Next question with its choices shuffled
    ///
    /// Every question is drawn once before any repeats.
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> ActiveQuestion {
        if self.pile.is_empty() {
            self.pile = (0..self.questions.len()).collect();
            rng.shuffle(&mut self.pile);
        }
        let index = self.pile.pop().unwrap_or(0);
        let question = &self.questions[index];

        let mut order: Vec<usize> = (0..question.choices.len()).collect();
        rng.shuffle(&mut order);

        ActiveQuestion {
            prompt: question.prompt.clone(),
            choices: order.iter().map(|&i| question.choices[i].clone()).collect(),
            answer: order.iter().position(|&i| i == question.answer).unwrap_or(0),
        }
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A question as currently shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: usize,
}

impl ActiveQuestion {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }

    pub fn correct_choice(&self) -> &str {
        &self.choices[self.answer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ScriptedRng};

    #[test]
    fn test_builtin_is_valid() {
        let bank = QuestionBank::builtin();
        assert!(!bank.is_empty());
        for question in bank.questions() {
            question.validate().unwrap();
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "prompt": "2 + 2?", "choices": ["3", "4"], "answer": 1 },
            { "prompt": "Capital of France?", "choices": ["Paris", "Rome", "Oslo"], "answer": 0 }
        ]"#;
        let bank = QuestionBank::from_json(json).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[1].choices.len(), 3);
    }

    #[test]
    fn test_rejects_bad_banks() {
        assert!(matches!(
            QuestionBank::from_json("[]"),
            Err(QuestionError::Empty)
        ));
        assert!(matches!(
            QuestionBank::from_json(r#"[{ "prompt": "p", "choices": ["a"], "answer": 0 }]"#),
            Err(QuestionError::TooFewChoices { .. })
        ));
        assert!(matches!(
            QuestionBank::from_json(r#"[{ "prompt": "p", "choices": ["a", "b"], "answer": 2 }]"#),
            Err(QuestionError::AnswerOutOfRange { answer: 2, choices: 2, .. })
        ));
        assert!(matches!(
            QuestionBank::from_json("not json"),
            Err(QuestionError::Parse(_))
        ));
    }

    #[test]
    fn test_draw_remaps_answer() {
        let mut bank = QuestionBank::new(vec![Question::new("p", &["a", "b", "c"], 0)]).unwrap();
        // choice shuffle with all-zero draws rotates [a, b, c] to [b, c, a]
        let active = bank.draw(&mut ScriptedRng::zeros());
        assert_eq!(active.choices, vec!["b", "c", "a"]);
        assert_eq!(active.answer, 2);
        assert_eq!(active.correct_choice(), "a");
        assert!(active.is_correct(2));
        assert!(!active.is_correct(0));
    }

    #[test]
    fn test_draw_cycles_whole_bank() {
        let mut bank = QuestionBank::builtin();
        let mut rng = GameRng::new(7);
        let mut prompts: Vec<String> = (0..bank.len()).map(|_| bank.draw(&mut rng).prompt).collect();
        prompts.sort();
        prompts.dedup();
        assert_eq!(prompts.len(), bank.len());
    }

    #[test]
    fn test_drawn_answer_is_always_correct_choice() {
        let mut bank = QuestionBank::builtin();
        let mut rng = GameRng::new(99);
        for _ in 0..50 {
            let active = bank.draw(&mut rng);
            let original = bank
                .questions()
                .iter()
                .find(|q| q.prompt == active.prompt)
                .unwrap();
            assert_eq!(active.correct_choice(), original.choices[original.answer]);
        }
    }
}
