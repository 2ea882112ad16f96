use mongodb::{
    Database,
    bson::{doc, oid::ObjectId},
};
use records::{TEST_RESULTS_COLLECTION, TestResult, db};
use tracing::instrument;

use crate::error::Error;

#[instrument(skip_all, err(Debug))]
pub async fn insert_test_result(db: &Database, result: &TestResult) -> Result<ObjectId, Error> {
    let collection = db::get_collection::<TestResult>(db, TEST_RESULTS_COLLECTION);
    let res = collection.insert_one(result).await?;

    res.inserted_id.as_object_id().ok_or_else(|| {
        Error::Server(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("unexpected inserted id {}", res.inserted_id),
        )
    })
}

/// All submissions, newest first, optionally narrowed by `search`.
#[instrument(skip(db), err(Debug))]
pub async fn list_test_results(
    db: &Database,
    search: Option<&str>,
) -> Result<Vec<TestResult>, Error> {
    let collection = db::get_collection::<TestResult>(db, TEST_RESULTS_COLLECTION);
    let results = db::find_all_sorted(&collection, doc! {}, doc! { "submittedAt": -1 }).await?;

    Ok(match search {
        Some(term) if !term.trim().is_empty() => results
            .into_iter()
            .filter(|r| matches_search(r, term))
            .collect(),
        _ => results,
    })
}

/// Case-insensitive substring match on the student's name or email.
pub fn matches_search(result: &TestResult, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    [&result.student_info.name, &result.student_info.email]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use mongodb::bson::DateTime;
    use records::{BeltRecord, StudentInfo, SurveyData, TestResults};

    use super::*;

    fn result(name: Option<&str>, email: Option<&str>) -> TestResult {
        TestResult {
            id: None,
            student_info: StudentInfo {
                name: name.map(String::from),
                email: email.map(String::from),
                ..Default::default()
            },
            survey_data: SurveyData::default(),
            test_results: TestResults {
                score: 0,
                total_questions: 0,
                percentage: 0,
                belt: BeltRecord {
                    name: "White".into(),
                    stage: "Pre-Foundation".into(),
                    color: "bg-gray-200".into(),
                    focus: "Digital Awareness & Curiosity".into(),
                    duration: "1 Month".into(),
                    total_hours: "12 hrs".into(),
                    total_classes: "8 Classes".into(),
                },
            },
            questions_and_answers: vec![],
            submitted_at: DateTime::now(),
            ip_address: "unknown".into(),
        }
    }

    #[test]
    fn search_matches_name_or_email_ignoring_case() {
        let r = result(Some("Amara Okafor"), Some("amara@example.org"));

        assert!(matches_search(&r, "okafor"));
        assert!(matches_search(&r, "EXAMPLE.ORG"));
        assert!(matches_search(&r, " amara "));
        assert!(!matches_search(&r, "lee"));
    }

    #[test]
    fn search_skips_missing_fields() {
        let r = result(None, Some("kim@example.org"));
        assert!(matches_search(&r, "kim"));
        assert!(!matches_search(&result(None, None), "kim"));
    }
}
