#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
use std::io::{self, Write};

#[cfg(not(target_arch = "wasm32"))]
use portfolio::terminal::TerminalLine;

/// Outside the browser the page has nothing to render, but the terminal
/// interpreter still works over stdin.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::BufRead;
    use std::time::{Duration, Instant};

    use portfolio::config::RuntimeConfig;
    use portfolio::content::SiteContent;
    use portfolio::logging::Logger;
    use portfolio::terminal::{SubmitOutcome, TerminalSession, TerminalSignal};

    let config = RuntimeConfig::from_lookup(|key| {
        let name = format!("PORTFOLIO_{}", key.replace('-', "_").to_ascii_uppercase());
        std::env::var(name).ok()
    });
    let logger = Logger::new(config.log_level);

    let content = match SiteContent::load_embedded() {
        Ok(content) => content,
        Err(err) => {
            logger.warn("content_invalid", serde_json::json!({ "error": err.to_string() }));
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    let now_ms = || started.elapsed().as_secs_f64() * 1_000.0;
    let mut session = TerminalSession::new(content.terminal, &config);
    let mut printed = 0;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if write_lines(&mut stdout, &session.output_log()[printed..]).is_err()
            || write_prompt(&mut stdout, session.prompt()).is_err()
        {
            break;
        }
        printed = session.output_log().len();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let outcome = session.submit(input.trim_end_matches(['\r', '\n']), now_ms());
        logger.debug("terminal_command", serde_json::json!({ "outcome": format!("{outcome:?}") }));
        if let SubmitOutcome::Accepted(_) = outcome {
            // The echo is already on screen as the typed line.
            printed += 1;
        }

        while let Some(deadline) = session.next_deadline() {
            let wait = (deadline - now_ms()).max(0.0);
            std::thread::sleep(Duration::from_secs_f64(wait / 1_000.0));
            let before = session.output_log().len();
            let signal = session.tick(now_ms());
            if session.output_log().len() < before {
                printed = 0;
            }
            if signal == Some(TerminalSignal::Exit) {
                return;
            }
            if write_lines(&mut stdout, &session.output_log()[printed..]).is_err() {
                return;
            }
            printed = session.output_log().len();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_lines<W: Write>(out: &mut W, lines: &[TerminalLine]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line.text)?;
    }
    out.flush()
}

#[cfg(not(target_arch = "wasm32"))]
fn write_prompt<W: Write>(out: &mut W, prompt: &str) -> io::Result<()> {
    write!(out, "{prompt} ")?;
    out.flush()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use portfolio::terminal::LineKind;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn line(text: &str) -> TerminalLine {
        TerminalLine {
            kind: LineKind::Output,
            text: text.to_string(),
        }
    }

    #[test]
    fn lines_are_written_one_per_row() {
        let mut out = Vec::new();
        write_lines(&mut out, &[line("Noctyx"), line("")]).expect("in-memory write");
        write_prompt(&mut out, "noctyx@portfolio:~$").expect("in-memory write");
        assert_eq!(String::from_utf8_lossy(&out), "Noctyx\n\nnoctyx@portfolio:~$ ");
    }

    #[test]
    fn closed_stdout_is_reported() {
        let error = write_lines(&mut ClosedPipe, &[line("lost")]).expect_err("pipe closed");
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
        assert!(write_prompt(&mut ClosedPipe, "$").is_err());
    }
}
