//! The four fixed prompt operations.

use crate::client::OpenRouterClient;
use crate::error::OpenRouterError;
use crate::parse::{extract_json, parse_integer_reply};
use crate::persona::{CharacterBrief, Persona, PlanDraft};

/// Duration returned when the estimation reply cannot be parsed.
const FALLBACK_DURATION_SECS: i32 = 10;

/// Bounds the estimated duration is clamped into.
const MIN_DURATION_SECS: i32 = 5;
const MAX_DURATION_SECS: i32 = 15;

impl OpenRouterClient {
    /// Generate a persona profile for a new character.
    pub async fn generate_persona(
        &self,
        concept: &str,
        audience: &str,
    ) -> Result<Persona, OpenRouterError> {
        let user = format!(
            "Create a detailed personality profile for an AI influencer character.\n\
             \n\
             Concept: {concept}\n\
             Target Audience: {audience}\n\
             \n\
             Generate a JSON object with:\n\
             - archetype: Brief character archetype (1 sentence)\n\
             - personality_traits: 5-7 personality traits (list)\n\
             - tone_of_voice: Communication style (1-2 words)\n\
             - content_style: Type of content they create (1 word)\n\
             - content_themes: 3-5 content topics they cover (list)\n\
             - visual_description: Detailed physical appearance for AI image generation. \
             IMPORTANT: This should be a FRONT-FACING ID PHOTO style portrait (like passport \
             or professional headshot). Include: exact facial features, hair style/color, \
             clothing style, expression (neutral/professional), lighting (studio), \
             background (plain). Make it very detailed for consistent character representation.\n\
             \n\
             Return only valid JSON."
        );

        let reply = self
            .chat(
                "You are a character design expert. Always return valid JSON.",
                &user,
                0.8,
            )
            .await?;

        let persona: Persona = extract_json(&reply)?;
        persona.validate()?;
        Ok(persona)
    }

    /// Generate a single-video content plan (legacy flow).
    pub async fn generate_content_plan(
        &self,
        brief: &CharacterBrief,
        theme: &str,
    ) -> Result<PlanDraft, OpenRouterError> {
        let user = format!(
            "Create a SHORT-FORM VIDEO content plan for this character:\n\
             \n\
             Character: {name}\n\
             Personality: {traits}\n\
             Tone: {tone}\n\
             Style: {style}\n\
             \n\
             Theme: {theme}\n\
             \n\
             IMPORTANT: This is for ONE single video (not multiple scenes).\n\
             The video should be 5-10 seconds long for short-form content.\n\
             \n\
             Generate a JSON object with EXACTLY these fields:\n\
             - title: Content title (catchy, engaging)\n\
             - hook: Opening hook (1-2 sentences to grab attention)\n\
             - duration_seconds: Total video duration in seconds (5-10)\n\
             - first_frame_prompt: Detailed description of the STARTING IMAGE for this video. \
             This will be used for img2img generation from the character's ID photo. Describe: \
             exact pose, camera angle, setting, lighting, what the character is doing in the \
             first frame. Be very specific.\n\
             - video_prompt: Second-by-second description of the ENTIRE video. Format: \
             \"0-2s: [action], 2-5s: [action], 5-8s: [action], 8-10s: [action]\". Be very \
             specific about movements, expressions, camera angles, and transitions.\n\
             - call_to_action: Ending CTA (1 sentence)\n\
             \n\
             DO NOT include \"scenes\" - this is a SINGLE video with one continuous flow.\n\
             Return only valid JSON.",
            name = brief.name,
            traits = brief.personality_traits.join(", "),
            tone = brief.tone_of_voice,
            style = brief.content_style,
        );

        let reply = self
            .chat(
                "You are a content strategist specializing in short-form video. \
                 Always return valid JSON.",
                &user,
                0.7,
            )
            .await?;

        extract_json(&reply)
    }

    /// Generate a second-by-second video prompt from a concept. The
    /// reply is returned verbatim -- no JSON parsing.
    pub async fn generate_video_prompt(
        &self,
        brief: &CharacterBrief,
        concept: &str,
    ) -> Result<String, OpenRouterError> {
        let user = format!(
            "Create a detailed second-by-second video prompt for a short-form video.\n\
             \n\
             Character: {name}\n\
             Personality: {traits}\n\
             Tone: {tone}\n\
             Style: {style}\n\
             \n\
             Concept: {concept}\n\
             \n\
             Generate a detailed video prompt describing the ENTIRE video second-by-second.\n\
             The video can be 5-15 seconds long.\n\
             Format: \"0-2s: [action], 2-5s: [action], ...\"\n\
             Return ONLY the video prompt text, no JSON, no markdown.",
            name = brief.name,
            traits = brief.personality_traits.join(", "),
            tone = brief.tone_of_voice,
            style = brief.content_style,
        );

        self.chat(
            "You are a video director specializing in short-form content. \
             Return only the prompt text.",
            &user,
            0.7,
        )
        .await
    }

    /// Estimate the optimal duration for a video prompt, in seconds.
    ///
    /// The one operation that absorbs a malformed reply instead of
    /// surfacing it: an unparseable answer becomes the 10-second
    /// default, and parseable answers are clamped into [5, 15].
    pub async fn determine_video_duration(
        &self,
        video_prompt: &str,
    ) -> Result<i32, OpenRouterError> {
        let user = format!(
            "Analyze this video prompt and determine the optimal duration in seconds (5-15).\n\
             \n\
             Video prompt:\n\
             {video_prompt}\n\
             \n\
             Rules:\n\
             - Simple actions (waving, smiling, posing): 5s\n\
             - Medium actions (walking, talking, demonstrating): 8-10s\n\
             - Complex sequences (multiple scenes, storytelling): 12-15s\n\
             \n\
             Return ONLY a single integer (5-15), nothing else."
        );

        let reply = self
            .chat("Return only a single integer.", &user, 0.3)
            .await?;

        Ok(resolve_duration(parse_integer_reply(&reply)))
    }
}

/// Clamp a parsed duration into bounds, or fall back to the default
/// when the reply did not parse.
fn resolve_duration(parsed: Option<i32>) -> i32 {
    match parsed {
        Some(secs) => secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS),
        None => FALLBACK_DURATION_SECS,
    }
}
