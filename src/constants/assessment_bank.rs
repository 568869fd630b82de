//! Fixed question sets for the initial assessment, one per grade band.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub correct_index: usize,
    pub subject: &'static str,
}

const EARLY_GRADES: [AssessmentQuestion; 3] = [
    AssessmentQuestion {
        id: "1",
        text: "What is 2 + 3?",
        options: &["4", "5", "6"],
        correct_index: 1,
        subject: "Math",
    },
    AssessmentQuestion {
        id: "2",
        text: "Which letter comes after \"B\"?",
        options: &["A", "C", "D"],
        correct_index: 1,
        subject: "Reading",
    },
    AssessmentQuestion {
        id: "3",
        text: "How many sides does a triangle have?",
        options: &["2", "3", "4"],
        correct_index: 1,
        subject: "Math",
    },
];

const MIDDLE_GRADES: [AssessmentQuestion; 3] = [
    AssessmentQuestion {
        id: "1",
        text: "What is 7 × 8?",
        options: &["54", "56", "58"],
        correct_index: 1,
        subject: "Math",
    },
    AssessmentQuestion {
        id: "2",
        text: "What is the past tense of \"run\"?",
        options: &["runned", "ran", "running"],
        correct_index: 1,
        subject: "Reading",
    },
    AssessmentQuestion {
        id: "3",
        text: "Which planet is closest to the Sun?",
        options: &["Venus", "Mercury", "Earth"],
        correct_index: 1,
        subject: "Science",
    },
];

const UPPER_GRADES: [AssessmentQuestion; 3] = [
    AssessmentQuestion {
        id: "1",
        text: "Solve for x: 2x + 5 = 13",
        options: &["3", "4", "5"],
        correct_index: 1,
        subject: "Math",
    },
    AssessmentQuestion {
        id: "2",
        text: "What is a synonym for \"enormous\"?",
        options: &["tiny", "huge", "average"],
        correct_index: 1,
        subject: "Reading",
    },
    AssessmentQuestion {
        id: "3",
        text: "What gas do plants absorb from the atmosphere during photosynthesis?",
        options: &["Oxygen", "Carbon Dioxide", "Nitrogen"],
        correct_index: 1,
        subject: "Science",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    Early,
    Middle,
    Upper,
}

impl GradeBand {
    /// Exactly `K` counts as grade 0. Leading digits are read as the grade
    /// number; anything else, lowercase `k` included, lands in the top band.
    pub fn for_grade(grade: &str) -> Self {
        let number = if grade == "K" {
            Some(0)
        } else {
            let digits: String = grade
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse::<u32>().ok()
        };

        match number {
            Some(n) if n <= 2 => GradeBand::Early,
            Some(n) if n <= 5 => GradeBand::Middle,
            _ => GradeBand::Upper,
        }
    }

    pub fn questions(self) -> &'static [AssessmentQuestion] {
        match self {
            GradeBand::Early => &EARLY_GRADES,
            GradeBand::Middle => &MIDDLE_GRADES,
            GradeBand::Upper => &UPPER_GRADES,
        }
    }
}
