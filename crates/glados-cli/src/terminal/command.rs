//! Parsing of terminal input lines.

/// How a model is picked with `/model`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelector {
    /// 1-based position in the catalog listing.
    Index(usize),
    Name(String),
}

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text for the model.
    Say(String),
    ListModels,
    SelectModel(ModelSelector),
    NextModel,
    ToggleSpeech,
    Reset,
    Help,
    Quit,
    /// Blank line.
    Nothing,
    /// A slash command that could not be understood; holds the message to
    /// show.
    Invalid(String),
}

impl Command {
    /// Parse a line typed at the prompt.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Nothing;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Say(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "models" | "list" => Self::ListModels,
            "model" | "use" => parse_selector(arg),
            "next" => Self::NextModel,
            "tts" => Self::ToggleSpeech,
            "reset" | "clear" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Invalid(format!("Unknown command /{name}, try /help")),
        }
    }
}

fn parse_selector(arg: &str) -> Command {
    if arg.is_empty() {
        return Command::Invalid("Usage: /model <number|name>".to_string());
    }
    match arg.parse::<usize>() {
        Ok(0) => Command::Invalid("Model numbers start at 1".to_string()),
        Ok(index) => Command::SelectModel(ModelSelector::Index(index)),
        Err(_) => Command::SelectModel(ModelSelector::Name(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_said_trimmed() {
        assert_eq!(
            Command::parse("  Hello there  "),
            Command::Say("Hello there".to_string())
        );
        assert_eq!(Command::parse("   "), Command::Nothing);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(Command::parse("/models"), Command::ListModels);
        assert_eq!(Command::parse("/next"), Command::NextModel);
        assert_eq!(Command::parse("/TTS"), Command::ToggleSpeech);
        assert_eq!(Command::parse("/reset"), Command::Reset);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/quit"), Command::Quit);
    }

    #[test]
    fn model_selection_by_number_or_name() {
        assert_eq!(
            Command::parse("/model 2"),
            Command::SelectModel(ModelSelector::Index(2))
        );
        assert_eq!(
            Command::parse("/model   qwen3:0.6b "),
            Command::SelectModel(ModelSelector::Name("qwen3:0.6b".to_string()))
        );
    }

    #[test]
    fn bad_model_selection() {
        assert!(matches!(Command::parse("/model"), Command::Invalid(_)));
        assert!(matches!(Command::parse("/model 0"), Command::Invalid(_)));
    }

    #[test]
    fn unknown_command_names_itself() {
        assert_eq!(
            Command::parse("/dance now"),
            Command::Invalid("Unknown command /dance, try /help".to_string())
        );
    }
}
