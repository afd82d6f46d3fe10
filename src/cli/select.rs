//! Select command implementation: a headless combobox session driven by a key script.

use crate::cli::output::{format_select_json, format_select_table, SelectReport};
use crate::cli::SelectArgs;
use crate::combobox::{Combobox, Key, KeyEvent};
use crate::form::ValidateConfig;

/// One step of a key script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Key(KeyEvent),
    Backspace,
    Focus,
    Blur,
}

/// Parse a comma-separated key script. `Comma` types a literal comma.
pub fn parse_script(script: &str) -> Vec<ScriptStep> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token {
            "Backspace" => ScriptStep::Backspace,
            "Focus" => ScriptStep::Focus,
            "Blur" => ScriptStep::Blur,
            "Comma" => ScriptStep::Key(KeyEvent::new(Key::Char(','))),
            // Infallible
            _ => ScriptStep::Key(token.parse().unwrap_or_else(|e| match e {})),
        })
        .collect()
}

/// Run `steps` against a focused combobox.
pub fn run_script(combobox: &mut Combobox, steps: &[ScriptStep]) {
    combobox.focus();
    for step in steps {
        match step {
            ScriptStep::Key(KeyEvent {
                key: Key::Char(c),
                alt: false,
            }) => combobox.type_text(&c.to_string()),
            ScriptStep::Key(event) => {
                let response = combobox.handle_key(event.clone());
                tracing::debug!(key = ?event, ?response, "key handled");
            }
            ScriptStep::Backspace => combobox.backspace(),
            ScriptStep::Focus => combobox.focus(),
            ScriptStep::Blur => combobox.blur(),
        }
    }
}

/// Handle `imagebuilder select`
pub fn handle_select(args: &SelectArgs) -> Result<String, Box<dyn std::error::Error>> {
    let mut combobox = Combobox::new("repo", args.label.as_str()).with_options(&args.options);
    if let Some(ref message) = args.required {
        combobox.set_validate(ValidateConfig::required(message.as_str()));
    }

    run_script(&mut combobox, &parse_script(&args.keys));

    let report = SelectReport {
        value: combobox.value().to_string(),
        list: combobox.list_state(),
        highlighted: combobox.highlighted_option().map(str::to_string),
        view: combobox.view(),
    };

    if args.json {
        Ok(format_select_json(&report)?)
    } else {
        Ok(format_select_table(&report))
    }
}
