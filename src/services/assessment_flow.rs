use crate::{
    constants::assessment_bank::{AssessmentQuestion, GradeBand},
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerRecord, Assessment, AssessmentSnapshot},
        dto::response::{AssessmentFeedbackDto, AssessmentQuestionView, AssessmentStepDto},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Intro,
    Questions,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentOutcome {
    pub correct: usize,
    pub total: usize,
    pub percentage: i32,
}

pub fn percentage(correct: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 * 100.0 / total as f64).round() as i32
}

/// Initial assessment for one student: `intro → questions → complete`.
///
/// The question set is fixed at construction from the grade band. Each
/// question takes exactly one submission; advancing is refused until the
/// current question has feedback.
#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    student_id: String,
    grade: String,
    questions: &'static [AssessmentQuestion],
    state: FlowState,
    current: usize,
    answers: Vec<AnswerRecord>,
    feedback: Option<String>,
}

impl AssessmentFlow {
    pub fn new(student_id: &str, grade: &str) -> Self {
        AssessmentFlow {
            student_id: student_id.to_string(),
            grade: grade.to_string(),
            questions: GradeBand::for_grade(grade).questions(),
            state: FlowState::Intro,
            current: 0,
            answers: Vec::new(),
            feedback: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn questions(&self) -> &'static [AssessmentQuestion] {
        self.questions
    }

    pub fn begin(&mut self) -> AppResult<()> {
        match self.state {
            FlowState::Intro => {
                self.state = FlowState::Questions;
                Ok(())
            }
            _ => Err(AppError::ValidationError(
                "Assessment has already started".to_string(),
            )),
        }
    }

    fn current_question(&self) -> AppResult<&'static AssessmentQuestion> {
        if self.state != FlowState::Questions {
            return Err(AppError::ValidationError(
                "Assessment is not in progress".to_string(),
            ));
        }
        self.questions
            .get(self.current)
            .ok_or_else(|| AppError::InternalError("Assessment question out of range".to_string()))
    }

    pub fn submit(&mut self, selected_index: usize) -> AppResult<AssessmentFeedbackDto> {
        let question = self.current_question()?;

        if self.feedback.is_some() {
            return Err(AppError::ValidationError(
                "Answer already submitted for this question".to_string(),
            ));
        }
        if selected_index >= question.options.len() {
            return Err(AppError::ValidationError(format!(
                "Option {} does not exist",
                selected_index
            )));
        }

        let correct = selected_index == question.correct_index;
        let feedback = if correct {
            "Correct! Great job!".to_string()
        } else {
            format!(
                "Incorrect. The correct answer is \"{}\".",
                question.options[question.correct_index]
            )
        };

        self.answers.push(AnswerRecord {
            question_id: question.id.to_string(),
            selected_index,
            correct,
        });
        self.feedback = Some(feedback.clone());

        Ok(AssessmentFeedbackDto {
            correct,
            feedback,
            correct_index: question.correct_index,
            is_last: self.current + 1 == self.questions.len(),
        })
    }

    /// Moves past the answered question. Returns the outcome when that was
    /// the last one.
    pub fn advance(&mut self) -> AppResult<Option<AssessmentOutcome>> {
        self.current_question()?;
        if self.feedback.is_none() {
            return Err(AppError::ValidationError(
                "Submit an answer before moving on".to_string(),
            ));
        }

        self.feedback = None;
        self.current += 1;
        if self.current < self.questions.len() {
            return Ok(None);
        }

        self.state = FlowState::Complete;
        Ok(self.outcome())
    }

    pub fn outcome(&self) -> Option<AssessmentOutcome> {
        if self.state != FlowState::Complete {
            return None;
        }
        let correct = self.answers.iter().filter(|a| a.correct).count();
        let total = self.questions.len();
        Some(AssessmentOutcome {
            correct,
            total,
            percentage: percentage(correct, total),
        })
    }

    /// The record to persist once the flow is complete.
    pub fn to_assessment(&self) -> Option<Assessment> {
        let outcome = self.outcome()?;

        let mut subjects_tested: Vec<String> = Vec::new();
        for q in self.questions {
            if !subjects_tested.iter().any(|s| s == q.subject) {
                subjects_tested.push(q.subject.to_string());
            }
        }

        Some(Assessment::initial(
            &self.student_id,
            outcome.percentage,
            outcome.total as i32,
            outcome.correct as i32,
            AssessmentSnapshot {
                answers: self.answers.clone(),
                grade: self.grade.clone(),
                subjects_tested,
            },
        ))
    }

    pub fn step(&self) -> AssessmentStepDto {
        match self.state {
            FlowState::Intro => AssessmentStepDto::Intro {
                grade: self.grade.clone(),
                total_questions: self.questions.len(),
            },
            FlowState::Questions => {
                let q = &self.questions[self.current.min(self.questions.len() - 1)];
                AssessmentStepDto::Questions {
                    question_index: self.current,
                    total_questions: self.questions.len(),
                    question: AssessmentQuestionView {
                        id: q.id.to_string(),
                        text: q.text.to_string(),
                        options: q.options.iter().map(|o| o.to_string()).collect(),
                        subject: q.subject.to_string(),
                    },
                    feedback: self.feedback.clone(),
                }
            }
            FlowState::Complete => {
                let correct = self.answers.iter().filter(|a| a.correct).count();
                AssessmentStepDto::Complete {
                    score: correct,
                    total: self.questions.len(),
                    percentage: percentage(correct, self.questions.len()),
                }
            }
        }
    }
}
