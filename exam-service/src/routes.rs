use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use exam_utils::{
    generation::{SamplingParams, generate_balanced_exam, validate_generation},
    misc::{calculate_score, is_correct, percentage, place_belt},
};
use mongodb::{Database, bson::DateTime};
use records::{
    BeltRecord, Question, QuestionAnswer, StudentInfo, SubmittedQuestion, SurveyData, TestResult,
    TestResults,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{bank::load_bank, config::EnvVars, error::Error, store};

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub questions: Vec<Question>,
    pub partial: bool,
    pub failed_tracks: Vec<String>,
    pub seed: u64,
    pub message: String,
}

pub async fn post_generate_questions(
    State(env_vars): State<EnvVars>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, Error> {
    // The body is optional, and anything unparseable counts as empty.
    let request: GenerateRequest = serde_json::from_slice(&body).unwrap_or_default();
    let seed = request
        .seed
        .unwrap_or_else(|| u64::from(rand::random::<u32>()));

    let bank = load_bank(&env_vars.question_bank_paths).await?;

    let params = SamplingParams {
        target_count: env_vars.exam_question_count,
        tracks: env_vars.exam_tracks.clone(),
        difficulties: env_vars.exam_difficulties.clone(),
        seed: Some(seed),
    };
    let questions = generate_balanced_exam(&bank, &params)?;
    validate_generation(&questions, &params)?;

    info!(seed, count = questions.len(), "generated exam");

    Ok(Json(GenerateResponse {
        questions,
        partial: false,
        failed_tracks: vec![],
        seed,
        message: "Questions generated from local bank.".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultsRequest {
    #[serde(default)]
    pub student_info: StudentInfo,
    #[serde(default)]
    pub survey_data: SurveyData,
    #[serde(default)]
    pub questions: Vec<SubmittedQuestion>,
    #[serde(default)]
    pub selected_answers: Vec<Option<usize>>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub belt: Option<BeltRecord>,
}

#[derive(Debug, Serialize)]
pub struct SaveResultsResponse {
    pub success: bool,
    pub id: String,
    pub message: String,
}

pub async fn post_save_test_results(
    State(db): State<Database>,
    headers: HeaderMap,
    payload: Result<Json<SaveResultsRequest>, JsonRejection>,
) -> Result<Json<SaveResultsResponse>, Error> {
    let Json(request) = payload?;
    let ip_address = client_ip(&headers);
    let test_result = build_test_result(request, ip_address, DateTime::now())?;

    let id = store::insert_test_result(&db, &test_result).await?;
    info!(%id, score = test_result.test_results.score, "saved test result");

    Ok(Json(SaveResultsResponse {
        success: true,
        id: id.to_hex(),
        message: "Test results saved successfully".to_string(),
    }))
}

/// Builds the stored document for a submission.
///
/// When the questions are sent along, the score is recomputed from them and
/// the selected answers.
pub fn build_test_result(
    request: SaveResultsRequest,
    ip_address: String,
    submitted_at: DateTime,
) -> Result<TestResult, Error> {
    let has_text = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !has_text(&request.student_info.name) || !has_text(&request.student_info.email) {
        return Err(Error::Server(
            StatusCode::BAD_REQUEST,
            "Missing required student information".to_string(),
        ));
    }

    let (score, total_questions) = if request.questions.is_empty() {
        (request.score, request.total_questions)
    } else {
        let score = calculate_score(&request.questions, &request.selected_answers) as u32;
        if score != request.score {
            warn!(
                submitted = request.score,
                computed = score,
                "submitted score does not match answers"
            );
        }
        (score, request.questions.len() as u32)
    };

    let belt = request
        .belt
        .unwrap_or_else(|| BeltRecord::from(place_belt(score)));

    let questions_and_answers = request
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let selected = request.selected_answers.get(i).copied().flatten();
            QuestionAnswer {
                question_number: i as u32 + 1,
                is_correct: is_correct(&q, selected),
                question: q.question,
                options: q.options,
                correct_answer_index: q.correct_answer,
                user_answer_index: selected,
                justification: q.justification,
            }
        })
        .collect();

    Ok(TestResult {
        id: None,
        student_info: request.student_info,
        survey_data: request.survey_data,
        test_results: TestResults {
            score,
            total_questions,
            percentage: percentage(score, total_questions),
            belt,
        },
        questions_and_answers,
        submitted_at,
        ip_address,
    })
}

fn client_ip(headers: &HeaderMap) -> String {
    ["x-forwarded-for", "x-real-ip"]
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
        .unwrap_or("unknown")
        .to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResult {
    pub id: Option<String>,
    pub student_info: StudentInfo,
    pub survey_data: SurveyData,
    pub test_results: TestResults,
    pub questions_and_answers: Vec<QuestionAnswer>,
    pub submitted_at: String,
    pub ip_address: String,
}

impl From<TestResult> for AdminResult {
    fn from(result: TestResult) -> Self {
        let submitted_at = result
            .submitted_at
            .try_to_rfc3339_string()
            .unwrap_or_else(|_| result.submitted_at.timestamp_millis().to_string());
        AdminResult {
            id: result.id.map(|id| id.to_hex()),
            student_info: result.student_info,
            survey_data: result.survey_data,
            test_results: result.test_results,
            questions_and_answers: result.questions_and_answers,
            submitted_at,
            ip_address: result.ip_address,
        }
    }
}

pub async fn get_admin_results(
    State(db): State<Database>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<Vec<AdminResult>>, Error> {
    let results = store::list_test_results(&db, query.search.as_deref()).await?;
    info!(count = results.len(), "fetched test results");

    Ok(Json(results.into_iter().map(AdminResult::from).collect()))
}

pub async fn get_status_ping() -> impl IntoResponse {
    info!("Status");
    StatusCode::OK
}
