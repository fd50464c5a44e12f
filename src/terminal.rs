//! The in-page terminal: a canned-response command table with shell-style
//! history. Responses are revealed after a short typing delay; the host
//! drives that delay by calling [`TerminalSession::tick`] with the current
//! time.

use crate::config::RuntimeConfig;
use crate::content::{TerminalContent, CANNED_COMMANDS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Banner,
    Prompt,
    Output,
    NotFound,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalLine {
    pub kind: LineKind,
    pub text: String,
}

impl TerminalLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Output, "")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Canned(&'static str),
    Clear,
    Exit,
    Unknown,
}

impl Command {
    /// Dispatch key for raw input: surrounding whitespace and case are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let key = input.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        let command = match key.as_str() {
            "clear" => Self::Clear,
            "exit" => Self::Exit,
            other => CANNED_COMMANDS
                .into_iter()
                .find(|name| *name == other)
                .map_or(Self::Unknown, Self::Canned),
        };
        Some(command)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Canned(name) => name,
            Self::Clear => "clear",
            Self::Exit => "exit",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// A response is still being revealed; nothing changed.
    Busy,
    Accepted(Command),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalSignal {
    Responded(Command),
    /// The farewell delay elapsed; the host should leave terminal mode.
    Exit,
}

#[derive(Clone, Debug, PartialEq)]
enum Pending {
    Response {
        command: Command,
        original: String,
        due_ms: f64,
    },
    Exit {
        due_ms: f64,
    },
}

impl Pending {
    fn due_ms(&self) -> f64 {
        match self {
            Self::Response { due_ms, .. } | Self::Exit { due_ms } => *due_ms,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TerminalSession {
    content: TerminalContent,
    typing_delay_ms: f64,
    exit_delay_ms: f64,
    output_log: Vec<TerminalLine>,
    command_history: Vec<String>,
    history_cursor: Option<usize>,
    pending_input: String,
    pending: Option<Pending>,
}

impl TerminalSession {
    pub fn new(content: TerminalContent, config: &RuntimeConfig) -> Self {
        let mut output_log: Vec<TerminalLine> = content
            .banner
            .iter()
            .map(|line| TerminalLine::new(LineKind::Banner, line.as_str()))
            .collect();
        output_log.push(TerminalLine::blank());

        Self {
            content,
            typing_delay_ms: config.typing_delay.as_secs_f64() * 1_000.0,
            exit_delay_ms: config.exit_delay.as_secs_f64() * 1_000.0,
            output_log,
            command_history: Vec::new(),
            history_cursor: None,
            pending_input: String::new(),
            pending: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.content.prompt
    }

    pub fn output_log(&self) -> &[TerminalLine] {
        &self.output_log
    }

    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Host time at which the next [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(Pending::due_ms)
    }

    /// Submits whatever is in the input buffer. The buffer is cleared unless
    /// the session is busy.
    pub fn submit_input(&mut self, now_ms: f64) -> SubmitOutcome {
        if self.is_busy() {
            return SubmitOutcome::Busy;
        }
        let input = std::mem::take(&mut self.pending_input);
        self.submit(&input, now_ms)
    }

    pub fn submit(&mut self, input: &str, now_ms: f64) -> SubmitOutcome {
        let Some(command) = Command::parse(input) else {
            return SubmitOutcome::Ignored;
        };
        if self.is_busy() {
            return SubmitOutcome::Busy;
        }

        self.command_history.retain(|entry| entry != input);
        self.command_history.push(input.to_string());
        self.history_cursor = None;

        self.output_log.push(TerminalLine::new(
            LineKind::Prompt,
            format!("{} {}", self.content.prompt, input),
        ));
        self.pending = Some(Pending::Response {
            command,
            original: input.to_string(),
            due_ms: now_ms + self.typing_delay_ms,
        });

        SubmitOutcome::Accepted(command)
    }

    /// Reveals whatever is due at `now_ms`. Returns the most significant
    /// signal produced, with [`TerminalSignal::Exit`] taking precedence.
    pub fn tick(&mut self, now_ms: f64) -> Option<TerminalSignal> {
        let mut signal = None;

        while let Some(pending) = self.pending.take() {
            if pending.due_ms() > now_ms {
                self.pending = Some(pending);
                break;
            }

            match pending {
                Pending::Response {
                    command,
                    original,
                    due_ms,
                } => {
                    self.reveal(command, &original);
                    if command == Command::Exit {
                        self.pending = Some(Pending::Exit {
                            due_ms: due_ms + self.exit_delay_ms,
                        });
                    }
                    signal = Some(TerminalSignal::Responded(command));
                }
                Pending::Exit { .. } => {
                    self.output_log.clear();
                    self.history_cursor = None;
                    return Some(TerminalSignal::Exit);
                }
            }
        }

        signal
    }

    fn reveal(&mut self, command: Command, original: &str) {
        match command {
            Command::Clear => self.output_log.clear(),
            Command::Exit => {
                self.output_log
                    .push(TerminalLine::new(LineKind::System, self.content.farewell.as_str()));
                self.output_log.push(TerminalLine::blank());
            }
            Command::Canned(name) => {
                let response = self.content.response(name).unwrap_or_default();
                self.output_log.extend(
                    response
                        .lines()
                        .map(|line| TerminalLine::new(LineKind::Output, line)),
                );
                self.output_log.push(TerminalLine::blank());
            }
            Command::Unknown => {
                self.output_log.push(TerminalLine::new(
                    LineKind::NotFound,
                    format!("Command not found: {original}"),
                ));
                self.output_log
                    .push(TerminalLine::new(LineKind::NotFound, self.content.hint.as_str()));
                self.output_log.push(TerminalLine::blank());
            }
        }
    }

    /// Steps toward older history entries, stopping at the oldest.
    pub fn history_previous(&mut self) {
        if self.command_history.is_empty() {
            return;
        }
        let index = match self.history_cursor {
            None => self.command_history.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.history_cursor = Some(index);
        self.pending_input = self.command_history[index].clone();
    }

    /// Steps toward newer entries; past the newest the input is cleared.
    pub fn history_next(&mut self) {
        let Some(index) = self.history_cursor else {
            return;
        };
        let next = index + 1;
        if next >= self.command_history.len() {
            self.history_cursor = None;
            self.pending_input.clear();
        } else {
            self.history_cursor = Some(next);
            self.pending_input = self.command_history[next].clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use proptest::prelude::*;
    use std::time::Duration;

    const DELAY: f64 = 300.0;
    const EXIT_DELAY: f64 = 1_000.0;

    fn session() -> TerminalSession {
        let content = SiteContent::load_embedded().expect("embedded content loads");
        let config = RuntimeConfig {
            typing_delay: Duration::from_millis(DELAY as u64),
            exit_delay: Duration::from_millis(EXIT_DELAY as u64),
            ..RuntimeConfig::default()
        };
        TerminalSession::new(content.terminal, &config)
    }

    fn texts(lines: &[TerminalLine]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    fn run(session: &mut TerminalSession, input: &str, now: f64) -> Option<TerminalSignal> {
        session.submit(input, now);
        session.tick(now + DELAY)
    }

    #[test]
    fn new_session_shows_banner() {
        let session = session();
        assert_eq!(
            texts(session.output_log()),
            vec![
                "Welcome to Noctyx Terminal",
                "Type 'help' for available commands",
                ""
            ]
        );
        assert_eq!(session.prompt(), "noctyx@portfolio:~$");
    }

    #[test]
    fn known_command_echoes_then_reveals_after_delay() {
        let mut session = session();
        let before = session.output_log().len();

        assert_eq!(
            session.submit("  WhoAmI ", 0.0),
            SubmitOutcome::Accepted(Command::Canned("whoami"))
        );
        assert!(session.is_busy());
        assert_eq!(session.next_deadline(), Some(DELAY));
        assert_eq!(
            session.output_log()[before].text,
            "noctyx@portfolio:~$   WhoAmI "
        );
        assert_eq!(session.output_log().len(), before + 1);

        assert_eq!(session.tick(DELAY - 1.0), None);
        assert_eq!(
            session.tick(DELAY),
            Some(TerminalSignal::Responded(Command::Canned("whoami")))
        );
        assert!(!session.is_busy());

        let revealed = texts(&session.output_log()[before + 1..]);
        assert_eq!(
            revealed,
            vec![
                "Elvis Baidoo - Developer & Hacker",
                "Also known as: Noctyx",
                "Status: Available for collaboration",
                ""
            ]
        );
    }

    #[test]
    fn unknown_command_reports_original_text() {
        let mut session = session();
        let before = session.output_log().len();
        run(&mut session, "Sudo Rm", 0.0);

        let tail = &session.output_log()[before + 1..];
        assert_eq!(tail[0].kind, LineKind::NotFound);
        assert_eq!(tail[0].text, "Command not found: Sudo Rm");
        assert_eq!(tail[1].text, "Type 'help' for available commands.");
        assert_eq!(tail[2].text, "");
    }

    #[test]
    fn unknown_command_keeps_surrounding_whitespace() {
        let mut session = session();
        run(&mut session, "  ls -la ", 0.0);

        let log = session.output_log();
        assert_eq!(log[log.len() - 3].text, "Command not found:   ls -la ");
    }

    #[test]
    fn blank_input_is_a_no_op() {
        let mut session = session();
        let before = session.clone();
        assert_eq!(session.submit("", 0.0), SubmitOutcome::Ignored);
        assert_eq!(session.submit("   \t", 0.0), SubmitOutcome::Ignored);
        assert_eq!(session, before);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut session = session();
        run(&mut session, "about", 0.0);
        run(&mut session, "clear", 1_000.0);
        assert!(session.output_log().is_empty());
        assert_eq!(session.command_history(), ["about", "clear"]);
    }

    #[test]
    fn exit_says_goodbye_then_signals_after_delay() {
        let mut session = session();
        assert_eq!(
            run(&mut session, "exit", 0.0),
            Some(TerminalSignal::Responded(Command::Exit))
        );
        assert!(session.is_busy());
        assert_eq!(
            session.output_log().last().map(|line| line.text.as_str()),
            Some("")
        );
        assert!(texts(session.output_log()).contains(&"Returning to GUI mode..."));

        assert_eq!(session.tick(DELAY + EXIT_DELAY - 1.0), None);
        assert_eq!(session.tick(DELAY + EXIT_DELAY), Some(TerminalSignal::Exit));
        assert!(session.output_log().is_empty());
    }

    #[test]
    fn late_tick_runs_exit_through_in_one_go() {
        let mut session = session();
        session.submit("EXIT", 0.0);
        assert_eq!(session.tick(60_000.0), Some(TerminalSignal::Exit));
        assert!(!session.is_busy());
    }

    #[test]
    fn submission_while_busy_is_dropped() {
        let mut session = session();
        session.submit("about", 0.0);
        let snapshot = session.clone();

        assert_eq!(session.submit("stack", 10.0), SubmitOutcome::Busy);
        assert_eq!(session, snapshot);

        session.set_input("stack");
        assert_eq!(session.submit_input(20.0), SubmitOutcome::Busy);
        assert_eq!(session.pending_input(), "stack");
    }

    #[test]
    fn submit_input_takes_the_buffer() {
        let mut session = session();
        session.set_input("help");
        assert_eq!(
            session.submit_input(0.0),
            SubmitOutcome::Accepted(Command::Canned("help"))
        );
        assert_eq!(session.pending_input(), "");
    }

    #[test]
    fn resubmitting_moves_entry_to_end() {
        let mut session = session();
        let mut now = 0.0;
        for command in ["whoami", "stack", "about", "stack"] {
            run(&mut session, command, now);
            now += 1_000.0;
        }
        assert_eq!(session.command_history(), ["whoami", "about", "stack"]);
    }

    #[test]
    fn history_navigation_clamps_at_both_ends() {
        let mut session = session();
        let mut now = 0.0;
        for command in ["one", "two", "three"] {
            run(&mut session, command, now);
            now += 1_000.0;
        }

        session.history_next();
        assert_eq!(session.history_cursor(), None);
        assert_eq!(session.pending_input(), "");

        session.history_previous();
        assert_eq!(session.pending_input(), "three");
        session.history_previous();
        session.history_previous();
        session.history_previous();
        session.history_previous();
        assert_eq!(session.history_cursor(), Some(0));
        assert_eq!(session.pending_input(), "one");

        session.history_next();
        assert_eq!(session.pending_input(), "two");
        session.history_next();
        session.history_next();
        assert_eq!(session.history_cursor(), None);
        assert_eq!(session.pending_input(), "");

        session.history_previous();
        run(&mut session, "four", now);
        assert_eq!(session.history_cursor(), None);
    }

    #[test]
    fn history_previous_on_empty_history_does_nothing() {
        let mut session = session();
        session.set_input("draft");
        session.history_previous();
        assert_eq!(session.history_cursor(), None);
        assert_eq!(session.pending_input(), "draft");
    }

    fn casing_variants(word: &'static str) -> impl Strategy<Value = String> {
        (proptest::collection::vec(any::<bool>(), word.len()), "[ \t]{0,3}", "[ \t]{0,3}").prop_map(
            move |(upper, lead, trail)| {
                let cased: String = word
                    .chars()
                    .zip(upper)
                    .map(|(ch, up)| if up { ch.to_ascii_uppercase() } else { ch })
                    .collect();
                format!("{lead}{cased}{trail}")
            },
        )
    }

    proptest! {
        #[test]
        fn canned_commands_append_one_block(
            (name, input) in (0..CANNED_COMMANDS.len()).prop_flat_map(|index| {
                let name = CANNED_COMMANDS[index];
                casing_variants(name).prop_map(move |input| (name, input))
            })
        ) {
            let mut session = session();
            let before = session.output_log().len();
            run(&mut session, &input, 0.0);

            let expected = session.content.response(name).unwrap_or_default().lines().count();
            prop_assert_eq!(session.output_log().len(), before + 1 + expected + 1);
        }

        #[test]
        fn unknown_commands_echo_original_text(
            word in "[A-Za-z][A-Za-z0-9]{0,11}",
            before in "[ \t]{0,3}",
            after in "[ \t]{0,3}",
        ) {
            prop_assume!(Command::parse(&word) == Some(Command::Unknown));
            let input = format!("{before}{word}{after}");
            let mut session = session();
            run(&mut session, &input, 0.0);

            let log = session.output_log();
            let message = format!("Command not found: {input}");
            prop_assert_eq!(log[log.len() - 3].text.as_str(), message.as_str());
        }

        #[test]
        fn distinct_commands_fill_history_in_order(
            words in proptest::collection::hash_set("[a-z]{1,8}", 1..12)
        ) {
            let words: Vec<String> = words.into_iter().collect();
            prop_assume!(words.iter().all(|word| word != "exit"));

            let mut session = session();
            for (index, word) in words.iter().enumerate() {
                run(&mut session, word, index as f64 * 1_000.0);
            }
            prop_assert_eq!(session.command_history(), words.as_slice());
        }

        #[test]
        fn enough_next_presses_always_reset(
            count in 1usize..6,
            previous in 0usize..10,
        ) {
            let mut session = session();
            for index in 0..count {
                run(&mut session, &format!("cmd{index}"), index as f64 * 1_000.0);
            }
            for _ in 0..previous {
                session.history_previous();
            }
            for _ in 0..=count {
                session.history_next();
            }
            prop_assert_eq!(session.history_cursor(), None);
            prop_assert_eq!(session.pending_input(), "");
        }
    }
}
