//! Text rendering for option lists and help screens.

use reveal_core::{Context, HelpIndex};

const PLACEHOLDER: &str = "...";

// =============================================================================
// Option Lists
// =============================================================================

/// Render items as a 1-based numbered list.
///
/// Entries wider than `max_width` are collapsed onto whole words and cut
/// short with `...`.
pub fn numbered<S: AsRef<str>>(items: &[S], max_width: usize) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let line = format!("{}. {}", i + 1, item.as_ref());
            if line.chars().count() > max_width {
                shorten(&line, max_width)
            } else {
                line
            }
        })
        .collect()
}

/// Fit text into `width` characters, placeholder included.
fn shorten(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut kept = String::new();
    for word in collapsed.split(' ') {
        let extra = if kept.is_empty() { 0 } else { 1 };
        if kept.chars().count() + extra + word.chars().count() > budget {
            break;
        }
        if extra == 1 {
            kept.push(' ');
        }
        kept.push_str(word);
    }

    if kept.is_empty() {
        kept = collapsed.chars().take(budget).collect();
    }
    kept.push_str(PLACEHOLDER);
    kept
}

/// Hard-wrap lines longer than `width`. Continuation chunks are indented
/// by one space.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }

    let mut wrapped = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() <= width {
            wrapped.push(line.to_string());
            continue;
        }
        for (k, chunk) in chars.chunks(width).enumerate() {
            let chunk: String = chunk.iter().collect();
            if k == 0 {
                wrapped.push(chunk);
            } else {
                wrapped.push(format!(" {}", chunk));
            }
        }
    }
    wrapped
}

// =============================================================================
// Help
// =============================================================================

/// Screen title, e.g. `HELP - Page (42)`.
pub fn title(label: &str, context: &Context, subject: Option<&str>) -> String {
    let mut title = label.to_uppercase();
    title.push_str(" - ");
    title.push_str(&context.heading());
    if let Some(subject) = subject {
        title.push_str(&format!(" ({})", subject));
    }
    title
}

/// One line per available command, in table order.
pub fn help_lines(index: &HelpIndex) -> Vec<String> {
    index
        .commands
        .iter()
        .map(|(name, instruction)| {
            let shortcut = index
                .shortcuts
                .shortcut_for(name)
                .map(|token| format!("{} or ", token))
                .unwrap_or_default();
            let parameterized = instruction
                .parameterized
                .as_deref()
                .map(|hint| format!(" <{}>", hint))
                .unwrap_or_default();
            format!(
                "- {}{}{}: {}",
                shortcut, name, parameterized, instruction.description
            )
        })
        .collect()
}
