//! System-prompt templates and the offline placeholder reply.

use crate::PromptMode;

/// General study-assistant system prompt.
pub const STUDY_PROMPT: &str = "You are a helpful AI study assistant. Help users understand \
their problems, explain concepts clearly, and provide step-by-step solutions. When analyzing \
images, describe what you see and provide relevant help.";

/// Step-by-step reasoning system prompt. Asks for a structured JSON plan
/// whose steps can be revealed one at a time.
pub const REASONING_PROMPT: &str = r#"You are an expert tutor. Analyze this problem and create a detailed step-by-step solution.

Return your response as JSON with this EXACT structure:
{
    "problem_summary": "Brief description of what we're solving",
    "total_steps": 4,
    "steps": [
        {
            "step_number": 1,
            "title": "Short title (3-5 words)",
            "explanation": "Detailed explanation with math using $...$ for inline math.",
            "math": "Pure LaTeX for the KEY equation of this step (no $ delimiters)",
            "key_insight": "One sentence takeaway"
        }
    ],
    "final_answer": "Pure LaTeX for the final answer (no $ delimiters)"
}

FORMATTING RULES:
- "explanation": 2-4 sentences, $...$ for any math symbols
- "math" and "final_answer": raw LaTeX without $ delimiters
- Maximum 5 steps
- Explain WHY each step is done, not just WHAT"#;

/// The system prompt for a given template selection.
pub fn system_prompt(mode: PromptMode) -> &'static str {
    match mode {
        PromptMode::Standard => STUDY_PROMPT,
        PromptMode::Reasoning => REASONING_PROMPT,
    }
}

/// Deterministic offline reply used when no chat provider is available.
///
/// Chat degrades gracefully to this placeholder instead of surfacing an
/// error to the caller.
pub fn offline_reply(prompt: &str) -> String {
    format!(
        "I received your message: \"{prompt}\"\n\n\
         This is an offline response because no AI provider is currently available.\n\n\
         I can help you with:\n\
         \u{2022} Explaining concepts step by step\n\
         \u{2022} Analyzing screenshots and images\n\
         \u{2022} Solving problems and exercises\n\
         \u{2022} Answering questions about any topic"
    )
}
