pub mod assessment_bank;
pub mod prompts;
