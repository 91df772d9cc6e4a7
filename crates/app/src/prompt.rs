//! Prompt assembly for the generation endpoint.

/// Writing register for the generated summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Casual,
    Funny,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Casual, Tone::Funny];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Funny => "Funny",
        }
    }

    fn register(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "relaxed",
            Tone::Funny => "silly",
        }
    }
}

/// Build the generation prompt: four summaries labeled "1." through
/// "4.", in the requested tone, seeded with the user's description.
pub fn build_prompt(description: &str, tone: Tone) -> String {
    let humor = if tone == Tone::Funny {
        "Make the summaries humorous. "
    } else {
        ""
    };
    let terminator = if description.ends_with('.') { "" } else { "." };
    format!(
        "Generate 4 {register} LinkedIn job summaries with no hashtags, clearly labeled \
         \"1.\", \"2.\", \"3.\" and \"4.\". Only return these 4 summaries, nothing else. \
         {humor}Make sure each summary is less than 800 characters and uses the short \
         sentences found in LinkedIn job summaries. Feel free to use this context as \
         well: {description}{terminator}",
        register = tone.register(),
    )
}
