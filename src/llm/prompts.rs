// Prompt templates for the three generation operations
//
// Each operation pairs a fixed system instruction (the persona) with a user
// query built by substituting the caller's input.

use crate::models::PitchStyle;

/// A system instruction and the user query to send with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const PITCH_SYSTEM: &str = "You are PitchCraft AI, a professional startup copywriter and marketing expert. \
Your goal is to generate a compelling, concise, and persuasive pitch based on the user's input. \
Adapt your tone and structure perfectly to the requested pitch style.";

const ANALYSIS_SYSTEM: &str = "You are a sharp, insightful venture capitalist with years of experience \
listening to startup pitches. Your feedback is constructive, direct, and incredibly valuable. \
Analyze the provided pitch and give feedback formatted with markdown.";

const MARKETING_SYSTEM: &str = "You are a creative and strategic marketing expert specializing in tech \
startups. Your goal is to provide catchy slogans and innovative marketing angles based on the user's app idea.";

pub fn pitch_prompt(input: &str, style: PitchStyle) -> Prompt {
    Prompt {
        system: PITCH_SYSTEM.to_string(),
        user: format!(
            "Generate a \"{}\" pitch for the following app: [{}]. \
             Focus on its unique value proposition, core features, and target audience.",
            style, input
        ),
    }
}

pub fn analysis_prompt(pitch: &str) -> Prompt {
    Prompt {
        system: ANALYSIS_SYSTEM.to_string(),
        user: format!(
            "Please analyze the following startup pitch. Identify its strengths and weaknesses, \
             and provide specific, actionable suggestions for improvement. Structure your response \
             with the following markdown headers: **Strengths**, **Weaknesses**, and **Suggestions**.\
             \n\n---\nPITCH:\n\"{}\"",
            pitch
        ),
    }
}

pub fn marketing_prompt(input: &str) -> Prompt {
    Prompt {
        system: MARKETING_SYSTEM.to_string(),
        user: format!(
            "For the app described as '{}', generate the following:\n\n\
             **Catchy Slogans:**\n* A list of 3-5 catchy and memorable slogans.\n\n\
             **Marketing Angles:**\n* A list of 2-3 unique marketing angles, including the target \
             platform (e.g., TikTok, LinkedIn, Content Marketing) and a brief strategy for each.",
            input
        ),
    }
}
