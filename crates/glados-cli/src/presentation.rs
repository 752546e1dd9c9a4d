//! Formatting of everything the terminal prints.

use glados_core::ModelDescriptor;

/// Greeting printed when the terminal starts.
pub const WELCOME: &str = concat!("Welcome to GLaDOS Terminal v", env!("CARGO_PKG_VERSION"));

/// Commands understood by the terminal, one per line.
pub const HELP_LINES: [&str; 7] = [
    "/models            list available models",
    "/model <n|name>    switch to a model by number or name",
    "/next              cycle to the next model",
    "/tts               toggle spoken replies",
    "/reset             forget the conversation",
    "/help              show this help",
    "/quit              leave the terminal",
];

const NAME_WIDTH: usize = 32;

/// A line spoken by GLaDOS, tagged with the speech state.
#[must_use]
pub fn reply_line(reply: &str, speech_enabled: bool) -> String {
    let status = if speech_enabled { "(TTS)" } else { "(TTS off)" };
    format!("GLaDOS > {reply} {status}")
}

#[must_use]
pub fn system_line(message: &str) -> String {
    format!("System > {message}")
}

/// One catalog row: 1-based index, name, size and short id.
///
/// The active model is marked with `*`.
#[must_use]
pub fn model_line(index: usize, model: &ModelDescriptor, active: bool) -> String {
    let marker = if active { '*' } else { ' ' };
    let name = truncate_string(&model.name, NAME_WIDTH);
    let id = if model.short_id.is_empty() {
        "-"
    } else {
        model.short_id.as_str()
    };
    format!(
        "{marker} {:>2}. {name:<NAME_WIDTH$} {:>10}  {id}",
        index + 1,
        model.size_display()
    )
}

/// Every row of the catalog listing.
#[must_use]
pub fn model_table(models: &[ModelDescriptor], active: Option<&str>) -> Vec<String> {
    if models.is_empty() {
        return vec!["No models available.".to_string()];
    }
    models
        .iter()
        .enumerate()
        .map(|(index, model)| model_line(index, model, active == Some(model.name.as_str())))
        .collect()
}

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_line_shows_speech_state() {
        assert_eq!(reply_line("Hello.", true), "GLaDOS > Hello. (TTS)");
        assert_eq!(reply_line("Hello.", false), "GLaDOS > Hello. (TTS off)");
    }

    #[test]
    fn test_model_line_contents() {
        let model = ModelDescriptor::new("llama3.2:3b", 2_019_393_189, "a80c4f17acd55265feec");
        let line = model_line(0, &model, true);

        assert!(line.starts_with("*  1. llama3.2:3b"));
        assert!(line.contains("1.9 GB"));
        assert!(line.ends_with("a80c4f17acd5"));
    }

    #[test]
    fn test_unknown_size_and_id() {
        let model = ModelDescriptor::new("qwen3:0.6b", 0, "");
        let line = model_line(3, &model, false);

        assert!(line.starts_with("   4. qwen3:0.6b"));
        assert!(line.contains("Unknown"));
        assert!(line.ends_with(" -"));
    }

    #[test]
    fn test_model_table_marks_active() {
        let models = vec![
            ModelDescriptor::new("a", 0, ""),
            ModelDescriptor::new("b", 0, ""),
        ];
        let rows = model_table(&models, Some("b"));
        assert!(rows[0].starts_with(' '));
        assert!(rows[1].starts_with('*'));

        assert_eq!(model_table(&[], None), vec!["No models available."]);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
    }
}
