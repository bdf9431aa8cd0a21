//! REPL (Read-Eval-Print Loop) for the interview

use colored::Colorize;
use interview_application::{InterviewPresenter, TurnController, TurnOutcome};
use interview_domain::{RespondentInput, SessionContext};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use std::sync::Arc;
use tracing::debug;

/// Status shown when the respondent submits a blank line
pub const STATUS_EMPTY_INPUT: &str = "Please enter a response.";

/// Slash commands understood by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    State,
}

impl ReplCommand {
    /// Parse a slash command; anything else, including answers that merely
    /// start with `/`, yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "/quit" | "/exit" | "/q" => Some(ReplCommand::Quit),
            "/help" | "/h" | "/?" => Some(ReplCommand::Help),
            "/state" => Some(ReplCommand::State),
            _ => None,
        }
    }
}

/// Interactive interview loop
pub struct InterviewRepl {
    controller: TurnController,
    presenter: Arc<dyn InterviewPresenter>,
    session: SessionContext,
}

impl InterviewRepl {
    pub fn new(
        controller: TurnController,
        presenter: Arc<dyn InterviewPresenter>,
        session: SessionContext,
    ) -> Self {
        Self {
            controller,
            presenter,
            session,
        }
    }

    /// Run until the respondent quits. Returns the final session.
    #[allow(unreachable_patterns)]
    pub async fn run(mut self) -> std::io::Result<SessionContext> {
        let mut line_editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("you".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();
        self.controller.open(&mut self.session);

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if let Some(command) = ReplCommand::parse(&line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }
                    self.process_answer(&line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => continue,
            }
        }

        Ok(self.session)
    }

    async fn process_answer(&mut self, line: &str) {
        let input = match RespondentInput::parse(line) {
            Ok(input) => input,
            Err(_) => {
                self.presenter.set_status(STATUS_EMPTY_INPUT);
                self.presenter.set_input_enabled(true);
                return;
            }
        };

        match self.controller.handle_turn(&mut self.session, input).await {
            TurnOutcome::Replied {
                agent, attempts, ..
            } => debug!("Turn answered by {} agent after {} attempt(s)", agent, attempts),
            TurnOutcome::Apologized { attempts, .. } => {
                debug!("Turn ended in apology after {} attempt(s)", attempts)
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Consumer Experience Interview        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Answer in your own words. Type /help for commands.");
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Thanks for your time. Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /state           - Show the interviewer's routing state");
                println!("  /quit, /exit, /q - End the interview");
                println!();
                false
            }
            ReplCommand::State => {
                println!();
                println!("{}", "Routing state:".cyan().bold());
                match serde_json::to_string_pretty(&self.session.state) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error: {}", e),
                }
                println!("Turns logged: {}", self.session.log.len());
                println!();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/quit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("  /q "), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/help"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/state"), Some(ReplCommand::State));
    }

    #[test]
    fn test_plain_answers_are_not_commands() {
        assert_eq!(ReplCommand::parse("It was fine"), None);
        assert_eq!(ReplCommand::parse("   "), None);
        assert_eq!(ReplCommand::parse("50/50 really"), None);
    }

    #[test]
    fn test_answers_starting_with_slash_are_kept() {
        assert_eq!(ReplCommand::parse("/s they never refunded me"), None);
        assert_eq!(ReplCommand::parse("/quit the store forever"), None);
        assert_eq!(ReplCommand::parse("/dance"), None);
    }
}
