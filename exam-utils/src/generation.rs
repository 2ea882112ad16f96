use std::collections::HashSet;

use records::Question;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{error::Error, rng::Xorshift32};

/// What to draw from the bank for a single exam.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SamplingParams {
    pub target_count: usize,
    pub tracks: Vec<String>,
    pub difficulties: Vec<u32>,
    /// Same bank + params + seed always gives the same exam.
    pub seed: Option<u64>,
}

/// Composite key two bank entries must share to count as the same question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuestionKey<'a> {
    track: &'a str,
    difficulty_level: u32,
    question_text: &'a str,
    correct_choice_index: usize,
    choices: &'a [String],
}

impl<'a> QuestionKey<'a> {
    pub fn of(question: &'a Question) -> Self {
        Self {
            track: &question.track,
            difficulty_level: question.difficulty_level,
            question_text: &question.question_text,
            correct_choice_index: question.correct_choice_index,
            choices: &question.choices,
        }
    }
}

/// Splits `total` as evenly as possible over `labels`.
///
/// Every label gets `total / labels.len()`, and the remainder goes one unit
/// each to labels picked at random. Counts line up with `labels` by position.
pub fn distribute_counts<L>(total: usize, labels: &[L], rng: &mut Xorshift32) -> Vec<usize> {
    if labels.is_empty() {
        return Vec::new();
    }

    let base = total / labels.len();
    let remainder = total % labels.len();

    let mut counts = vec![base; labels.len()];
    let mut order: Vec<usize> = (0..labels.len()).collect();
    rng.shuffle(&mut order);
    for &i in order.iter().take(remainder) {
        counts[i] += 1;
    }

    counts
}

/// Draws `params.target_count` distinct questions from `bank`, spread evenly
/// over the requested tracks, then over difficulties within each track.
///
/// Cells that cannot meet their share are topped up from any eligible
/// question. Fails rather than returning a short exam.
pub fn generate_balanced_exam(
    bank: &[Question],
    params: &SamplingParams,
) -> Result<Vec<Question>, Error> {
    let mut rng = match params.seed {
        Some(seed) => Xorshift32::new(seed),
        None => Xorshift32::from_entropy(),
    };

    sample_balanced(bank, params, &mut rng)
}

/// [`generate_balanced_exam`] with a caller-owned generator.
pub fn sample_balanced(
    bank: &[Question],
    params: &SamplingParams,
    rng: &mut Xorshift32,
) -> Result<Vec<Question>, Error> {
    let target_count = params.target_count;
    let tracks = first_occurrences(&params.tracks);
    let difficulties = first_occurrences(&params.difficulties);

    // Buckets are indexed [track][difficulty].
    let mut buckets: Vec<Vec<Vec<&Question>>> = Vec::with_capacity(tracks.len());
    for track in &tracks {
        let mut track_buckets = Vec::with_capacity(difficulties.len());
        for &difficulty in &difficulties {
            let mut bucket = unique_in_bank_order(
                bank.iter()
                    .filter(|q| &q.track == track && q.difficulty_level == difficulty),
            );
            rng.shuffle(&mut bucket);
            track_buckets.push(bucket);
        }
        buckets.push(track_buckets);
    }

    let track_targets = distribute_counts(target_count, &tracks, rng);

    let mut selected: Vec<&Question> = Vec::with_capacity(target_count);
    let mut used: HashSet<QuestionKey> = HashSet::new();

    for (t, track) in tracks.iter().enumerate() {
        let difficulty_targets = distribute_counts(track_targets[t], &difficulties, rng);

        for (d, difficulty) in difficulties.iter().enumerate() {
            let mut need = difficulty_targets[d];
            for &question in &buckets[t][d] {
                if need == 0 {
                    break;
                }
                if !used.insert(QuestionKey::of(question)) {
                    continue;
                }
                selected.push(question);
                need -= 1;
            }

            if need > 0 {
                trace!(%track, difficulty, short_by = need, "cell under-populated");
            }
        }
    }

    if selected.len() < target_count {
        debug!(
            selected = selected.len(),
            target_count, "backfilling from all eligible questions"
        );

        let mut pool = unique_in_bank_order(bank.iter().filter(|q| {
            tracks.contains(&q.track) && difficulties.contains(&q.difficulty_level)
        }));
        rng.shuffle(&mut pool);

        for question in pool {
            if selected.len() >= target_count {
                break;
            }
            if !used.insert(QuestionKey::of(question)) {
                continue;
            }
            selected.push(question);
        }
    }

    if selected.len() < target_count {
        return Err(Error::InsufficientBank {
            requested: target_count,
            found: selected.len(),
        });
    }

    Ok(selected.into_iter().take(target_count).cloned().collect())
}

/// Given a generated exam, validate it for basic properties:
/// 1) Exactly `target_count` questions
/// 2) No duplicates
/// 3) Every question is in a requested track and difficulty
pub fn validate_generation(exam: &[Question], params: &SamplingParams) -> Result<(), Error> {
    if exam.len() != params.target_count {
        return Err(Error::Generation(format!(
            "generated {} questions, expected {}",
            exam.len(),
            params.target_count
        )));
    }

    let mut seen = HashSet::new();
    for (i, question) in exam.iter().enumerate() {
        if !params.tracks.contains(&question.track) {
            return Err(Error::Generation(format!(
                "question {i} has track {:?} which was not requested",
                question.track
            )));
        }
        if !params.difficulties.contains(&question.difficulty_level) {
            return Err(Error::Generation(format!(
                "question {i} has difficulty {} which was not requested",
                question.difficulty_level
            )));
        }
        if !seen.insert(QuestionKey::of(question)) {
            return Err(Error::Generation(format!(
                "question {i} duplicate of an earlier question: {:?}",
                question.question_text
            )));
        }
    }

    Ok(())
}

/// Keeps the first of each identical question, in bank order.
fn unique_in_bank_order<'a, I>(questions: I) -> Vec<&'a Question>
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut seen = HashSet::new();
    questions
        .into_iter()
        .filter(|&q| seen.insert(QuestionKey::of(q)))
        .collect()
}

fn first_occurrences<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
