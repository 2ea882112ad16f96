use records::{BeltRecord, Question, SubmittedQuestion};

/// A curriculum level and the raw score range that places a student on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Belt {
    pub name: &'static str,
    pub stage: &'static str,
    pub color: &'static str,
    pub duration: &'static str,
    pub total_hours: &'static str,
    pub total_classes: &'static str,
    pub models: &'static str,
    pub focus: &'static str,
    pub min_score: u32,
    pub max_score: u32,
}

/// Ordered from lowest to highest score range.
pub static BELT_LEVELS: [Belt; 8] = [
    Belt {
        name: "White",
        stage: "Pre-Foundation",
        color: "bg-gray-200",
        duration: "1 Month",
        total_hours: "12 hrs",
        total_classes: "8 Classes",
        models: "Universal",
        focus: "Digital Awareness & Curiosity",
        min_score: 0,
        max_score: 2,
    },
    Belt {
        name: "Yellow",
        stage: "Foundation",
        color: "bg-yellow-400",
        duration: "3-4 Months",
        total_hours: "35 hrs",
        total_classes: "24 Classes",
        models: "Universal",
        focus: "Core Coding & Logical Thinking",
        min_score: 3,
        max_score: 4,
    },
    Belt {
        name: "Orange",
        stage: "Foundation",
        color: "bg-orange-500",
        duration: "3-4 Months",
        total_hours: "35 hrs",
        total_classes: "24 Classes",
        models: "3 Models",
        focus: "Creativity & Digital Design",
        min_score: 5,
        max_score: 6,
    },
    Belt {
        name: "Green",
        stage: "Foundation",
        color: "bg-green-500",
        duration: "3-4 Months",
        total_hours: "35 hrs",
        total_classes: "24 Classes",
        models: "3 Models",
        focus: "Smart Projects (AI & Robotics)",
        min_score: 7,
        max_score: 8,
    },
    Belt {
        name: "Blue",
        stage: "Specialization",
        color: "bg-blue-500",
        duration: "3-4 Months",
        total_hours: "35 hrs",
        total_classes: "24 Classes",
        models: "3 Models",
        focus: "Deep Track Exploration",
        min_score: 9,
        max_score: 9,
    },
    Belt {
        name: "Red",
        stage: "Specialization",
        color: "bg-red-500",
        duration: "3-4 Months",
        total_hours: "35 hrs",
        total_classes: "24 Classes",
        models: "3 Models",
        focus: "Advanced Projects",
        min_score: 10,
        max_score: 10,
    },
    Belt {
        name: "Brown",
        stage: "Specialization",
        color: "bg-amber-800",
        duration: "3-4 Months",
        total_hours: "35 hrs",
        total_classes: "24 Classes",
        models: "3 Models",
        focus: "Innovation & Entrepreneurship",
        min_score: 11,
        max_score: 11,
    },
    Belt {
        name: "Black",
        stage: "Specialization",
        color: "bg-gray-900",
        duration: "3-4 Months",
        total_hours: "35 hrs",
        total_classes: "24 Classes",
        models: "3 Models",
        focus: "Research & Leadership",
        min_score: 12,
        max_score: 12,
    },
];

impl From<&Belt> for BeltRecord {
    fn from(belt: &Belt) -> Self {
        BeltRecord {
            name: belt.name.to_string(),
            stage: belt.stage.to_string(),
            color: belt.color.to_string(),
            focus: belt.focus.to_string(),
            duration: belt.duration.to_string(),
            total_hours: belt.total_hours.to_string(),
            total_classes: belt.total_classes.to_string(),
        }
    }
}

/// Recommended belt for a raw score. Scores past the table get the top belt.
pub fn place_belt(score: u32) -> &'static Belt {
    let top = &BELT_LEVELS[BELT_LEVELS.len() - 1];
    if score > top.max_score {
        return top;
    }
    BELT_LEVELS
        .iter()
        .find(|belt| (belt.min_score..=belt.max_score).contains(&score))
        .unwrap_or(&BELT_LEVELS[0])
}

/// Anything that can be marked against a selected choice.
pub trait Answerable {
    /// Index of the correct choice, if known.
    fn answer_index(&self) -> Option<usize>;
}

impl Answerable for Question {
    fn answer_index(&self) -> Option<usize> {
        Some(self.correct_choice_index)
    }
}

impl Answerable for SubmittedQuestion {
    fn answer_index(&self) -> Option<usize> {
        self.correct_answer
    }
}

/// A question without a known answer is never correct.
pub fn is_correct<Q: Answerable>(question: &Q, selected: Option<usize>) -> bool {
    selected.is_some() && selected == question.answer_index()
}

/// Number of correctly answered questions. Unanswered questions, including
/// any past the end of `selected`, count as wrong.
pub fn calculate_score<Q: Answerable>(questions: &[Q], selected: &[Option<usize>]) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| is_correct(*q, selected.get(*i).copied().flatten()))
        .count()
}

/// Whole-number percentage, rounded half away from zero.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((f64::from(score) / f64::from(total)) * 100.0).round() as u32
}
