pub const TUTOR_SYSTEM_PROMPT: &str = "You are LearnSmart's AI tutor for K-12 students. Explain ideas step by step in language that fits the student's level. Prefer guiding questions and hints over handing out final answers to homework. Keep replies short, friendly and encouraging. If a question is unsafe or unrelated to learning, politely steer the conversation back to schoolwork.";

pub const TUTOR_FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

pub const TUTOR_TEMPERATURE: f32 = 0.7;
pub const TUTOR_MAX_TOKENS: u32 = 512;

pub const GRADING_TEMPERATURE: f32 = 0.2;
pub const GRADING_MAX_TOKENS: u32 = 256;

pub const GRADING_NO_FEEDBACK: &str = "No feedback.";

pub fn multiple_choice_grading_prompt(question: &str, answer: &str) -> String {
    format!(
        "You are an expert K-12 teacher. Grade the following multiple choice answer. Question: \"{}\" Student's answer: \"{}\". Reply with {{\"score\": 0 or 1, \"feedback\": \"...\"}}",
        question, answer
    )
}

pub fn open_ended_grading_prompt(question: &str, answer: &str) -> String {
    format!(
        "You are an expert K-12 teacher. Grade the following open-ended answer. Question: \"{}\" Student's answer: \"{}\". Reply with {{\"score\": 0-100, \"feedback\": \"...\"}}",
        question, answer
    )
}
