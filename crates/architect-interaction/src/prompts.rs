//! Prompt text sent to the model.

use architect_core::prompt::SuperPromptRequest;

/// Section markers the super prompt must contain, in this order.
pub const SECTION_MARKERS: [&str; 5] = [
    "[PERSONA]",
    "[CONTEXT]",
    "[TASKS]",
    "[CONSTRAINTS]",
    "[OUTPUT FORMAT]",
];

/// System instruction for the generation stage.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are "Vertex Architect", an elite AI specialised in Prompt Engineering for Large Language Models, with a specific focus on Google Gemini and Vertex AI.

YOUR GOAL:
Turn a user's simple, vague idea (which may include images or files) into a structured, highly detailed "Super Prompt" optimised to get the best possible answers from an AI.

MANDATORY OUTPUT STRUCTURE:
Return ONLY the optimised prompt. It must strictly follow this structure, using the bracketed tags:

[PERSONA]
Define who the AI should be (e.g. Senior Specialist, Creative Consultant). Include tone of voice and level of expertise.

[CONTEXT]
Describe the scenario, the necessary background and why this task matters. If images were provided, incorporate their analysis here.

[TASKS]
A step-by-step, logical and detailed list of what the AI must do. Use action verbs.

[CONSTRAINTS]
What the AI must NOT do. Length limits, style, biases to avoid, etc.

[OUTPUT FORMAT]
How the answer must be presented (Markdown, table, JSON, code, etc.). Give an example if needed.

STYLE GUIDELINES:
- If the style is CODING: focus on Clean Code, SOLID, error handling and documentation.
- If the style is SALES: focus on persuasion, mental triggers (AIDA, PAS) and copywriting.
- If the style is DATA: focus on precision, statistical methodology and visualisation.
- If the style is VERTEX_EXPERT: write a technical System Instruction for configuring agents.

Do not add any conversation; deliver only the final structured prompt.
"#;

const ATTACHMENT_NOTE: &str = "NOTE: The user attached files. Analyse the visual/textual content of the attachments and use it as the foundation for the Super Prompt.";

/// Builds the text part of the generation request.
pub fn build_idea_prompt(request: &SuperPromptRequest) -> String {
    let mut text = format!(
        "User idea: \"{}\"\nDesired style: {}\nCreativity: {}\n",
        request.idea,
        request.style.label(),
        request.creativity.label(),
    );
    if !request.attachments.is_empty() {
        text.push('\n');
        text.push_str(ATTACHMENT_NOTE);
        text.push('\n');
    }
    text.push_str("\nGenerate the Super Prompt now.");
    text
}
