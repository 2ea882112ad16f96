use std::collections::BTreeMap;

use records::Question;

use crate::error::Error;

/// Parses a bank file: a JSON array of questions.
pub fn parse_bank(raw: &str) -> Result<Vec<Question>, Error> {
    let bank: Vec<Question> = serde_json::from_str(raw)?;
    Ok(bank)
}

/// Validate bank records:
/// - `track` is not empty
/// - `question` text is not empty
/// - there are at least two choices, none of them empty
/// - `ans_idx` points at one of the choices
pub fn validate_bank(bank: &[Question]) -> Result<(), Error> {
    for (i, question) in bank.iter().enumerate() {
        if question.track.trim().is_empty() {
            return Err(Error::InvalidBank(format!("Question {i} has an empty track")));
        }
        if question.question_text.trim().is_empty() {
            return Err(Error::InvalidBank(format!("Question {i} has empty text")));
        }
        if question.choices.len() < 2 {
            return Err(Error::InvalidBank(format!(
                "Question {i} needs at least 2 choices. Available: {}",
                question.choices.len()
            )));
        }
        if let Some(c) = question.choices.iter().position(|c| c.trim().is_empty()) {
            return Err(Error::InvalidBank(format!(
                "Choice {c} in question {i} has empty text"
            )));
        }
        if question.correct_choice_index >= question.choices.len() {
            return Err(Error::InvalidBank(format!(
                "Question {i} answer index {} is out of range for {} choices",
                question.correct_choice_index,
                question.choices.len()
            )));
        }
    }

    Ok(())
}

/// Number of bank entries per (track, difficulty), duplicates included.
pub fn cell_counts(bank: &[Question]) -> BTreeMap<(String, u32), usize> {
    let mut counts = BTreeMap::new();
    for question in bank {
        *counts
            .entry((question.track.clone(), question.difficulty_level))
            .or_insert(0) += 1;
    }
    counts
}
