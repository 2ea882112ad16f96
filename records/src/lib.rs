//! Shared record shapes for the placement test services.
//!
//! `Question` mirrors one entry of the question bank file. The remaining types
//! describe a stored submission in the `test_results` collection.
pub mod db;

use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Name of the collection completed attempts are written to.
pub const TEST_RESULTS_COLLECTION: &str = "test_results";

/// A pre-authored multiple choice question from the bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_type: String,
    pub track: String,
    pub difficulty_level: u32,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(rename = "question")]
    pub question_text: String,
    pub choices: Vec<String>,
    #[serde(rename = "ans_idx")]
    pub correct_choice_index: usize,
    #[serde(default)]
    pub justification: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StudentInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub preferred_house: Option<String>,
    #[serde(default)]
    pub tech_experience: Option<String>,
    #[serde(default)]
    pub tech_details: Option<String>,
    #[serde(default)]
    pub heard_about_us: Option<String>,
}

/// Belt as recorded on a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeltRecord {
    #[serde(alias = "belt")]
    pub name: String,
    pub stage: String,
    pub color: String,
    pub focus: String,
    pub duration: String,
    pub total_hours: String,
    pub total_classes: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub belt: BeltRecord,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    pub question_number: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: Option<usize>,
    pub user_answer_index: Option<usize>,
    pub is_correct: bool,
    pub justification: String,
}

/// A question as the results page posts it back.
///
/// Accepts both the page's own shape (`options`, `correctAnswer`) and the bank
/// shape (`choices`, `ans_idx`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "choices")]
    pub options: Vec<String>,
    #[serde(default, alias = "ans_idx")]
    pub correct_answer: Option<usize>,
    #[serde(default)]
    pub justification: String,
}

/// A completed placement test, as stored in `test_results`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub student_info: StudentInfo,
    pub survey_data: SurveyData,
    pub test_results: TestResults,
    pub questions_and_answers: Vec<QuestionAnswer>,
    pub submitted_at: DateTime,
    pub ip_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_reads_bank_field_names() {
        let raw = r#"{
            "question_type": "conceptual",
            "track": "Robotics",
            "difficulty_level": 2,
            "concepts": ["sensors"],
            "question": "What does a servo control?",
            "choices": ["Angle", "Colour"],
            "ans_idx": 0,
            "justification": "Servos hold a commanded angle."
        }"#;
        let question: Question = serde_json::from_str(raw).unwrap();

        assert_eq!(question.track, "Robotics");
        assert_eq!(question.difficulty_level, 2);
        assert_eq!(question.question_text, "What does a servo control?");
        assert_eq!(question.correct_choice_index, 0);

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["ans_idx"], 0);
        assert_eq!(value["question"], "What does a servo control?");
    }

    #[test]
    fn missing_concepts_and_justification_default_to_empty() {
        let raw = r#"{
            "question_type": "applied",
            "track": "Cybersecurity",
            "difficulty_level": 1,
            "question": "Which is a strong password?",
            "choices": ["password", "T7#kq!v2Lm"],
            "ans_idx": 1
        }"#;
        let question: Question = serde_json::from_str(raw).unwrap();

        assert!(question.concepts.is_empty());
        assert!(question.justification.is_empty());
    }

    #[test]
    fn submitted_question_reads_page_and_bank_shapes() {
        let page: SubmittedQuestion = serde_json::from_str(
            r#"{"question": "Q1", "options": ["a", "b"], "correctAnswer": 1, "justification": "j"}"#,
        )
        .unwrap();
        assert_eq!(page.options, vec!["a", "b"]);
        assert_eq!(page.correct_answer, Some(1));
        assert_eq!(page.justification, "j");

        let bank: SubmittedQuestion = serde_json::from_str(
            r#"{"question": "Q2", "choices": ["x", "y", "z"], "ans_idx": 2,
                "question_type": "conceptual", "track": "Robotics", "difficulty_level": 1}"#,
        )
        .unwrap();
        assert_eq!(bank.question, "Q2");
        assert_eq!(bank.options.len(), 3);
        assert_eq!(bank.correct_answer, Some(2));

        let bare: SubmittedQuestion = serde_json::from_str(r#"{"question": "Q3"}"#).unwrap();
        assert_eq!(bare.correct_answer, None);
        assert!(bare.options.is_empty());
    }

    #[test]
    fn survey_data_uses_camel_case() {
        let survey: SurveyData =
            serde_json::from_str(r#"{"schoolName": "Northside", "heardAboutUs": "friend"}"#)
                .unwrap();

        assert_eq!(survey.school_name.as_deref(), Some("Northside"));
        assert_eq!(survey.heard_about_us.as_deref(), Some("friend"));
        assert!(survey.country.is_none());
    }
}
