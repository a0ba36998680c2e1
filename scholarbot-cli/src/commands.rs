//! Maps a line of terminal input to user actions.

use scholarbot_session::UserAction;
use scholarbot_types::Reaction;

/// What a line of input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Dispatch these actions in order.
    Actions(Vec<UserAction>),
    /// Leave the program.
    Quit,
    /// Unrecognised slash command.
    Unknown(String),
}

/// Parse one input line. While the feedback prompt is open, plain text is
/// the feedback comment rather than a new question.
pub fn parse_line(line: &str, prompt_open: bool) -> Command {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return if prompt_open {
            Command::Actions(vec![UserAction::SubmitFeedbackText(line.to_string())])
        } else {
            Command::Actions(vec![
                UserAction::InputChanged(line.to_string()),
                UserAction::Submit,
            ])
        };
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let action = match (name, arg) {
        ("quit" | "exit", None) => return Command::Quit,
        ("clear", None) => UserAction::ClearSession,
        ("help", None) => UserAction::ShowHelp,
        ("cancel", None) => UserAction::CloseFeedbackPrompt,
        ("lang", Some(lang)) => UserAction::SwitchLocale(lang.to_string()),
        ("ask", Some(n)) => match n.parse() {
            Ok(n) => UserAction::AskExample(n),
            Err(_) => return Command::Unknown(trimmed.to_string()),
        },
        ("like" | "dislike", Some(id)) => match id.parse() {
            Ok(log_id) => UserAction::React {
                log_id,
                reaction: if name == "like" {
                    Reaction::Like
                } else {
                    Reaction::Dislike
                },
            },
            Err(_) => return Command::Unknown(trimmed.to_string()),
        },
        _ => return Command::Unknown(trimmed.to_string()),
    };
    Command::Actions(vec![action])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_submits_a_question() {
        assert_eq!(
            parse_line("有哪些獎學金?", false),
            Command::Actions(vec![
                UserAction::InputChanged("有哪些獎學金?".into()),
                UserAction::Submit,
            ])
        );
    }

    #[test]
    fn plain_text_with_open_prompt_is_feedback() {
        assert_eq!(
            parse_line("", true),
            Command::Actions(vec![UserAction::SubmitFeedbackText(String::new())])
        );
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_line("/quit", false), Command::Quit);
        assert_eq!(
            parse_line(" /lang en ", false),
            Command::Actions(vec![UserAction::SwitchLocale("en".into())])
        );
        assert_eq!(
            parse_line("/ask 3", false),
            Command::Actions(vec![UserAction::AskExample(3)])
        );
        assert_eq!(
            parse_line("/dislike 42", true),
            Command::Actions(vec![UserAction::React {
                log_id: 42,
                reaction: Reaction::Dislike
            }])
        );
        assert_eq!(
            parse_line("/cancel", true),
            Command::Actions(vec![UserAction::CloseFeedbackPrompt])
        );
    }

    #[test]
    fn malformed_commands_are_unknown() {
        assert_eq!(parse_line("/like abc", false), Command::Unknown("/like abc".into()));
        assert_eq!(parse_line("/lang", false), Command::Unknown("/lang".into()));
        assert_eq!(parse_line("/frobnicate", false), Command::Unknown("/frobnicate".into()));
    }
}
