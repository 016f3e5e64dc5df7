#![cfg(all(target_os = "linux", feature = "pty-tests"))]

use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use serial_test::serial;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const PROMPT: &str = "filecmd> ";

struct PtySession {
    writer: Box<dyn Write + Send>,
    rx: Receiver<String>,
    buffer: String,
}

impl PtySession {
    fn spawn(home: &Path) -> anyhow::Result<Self> {
        let pty_system = native_pty_system();
        let pair = pty_system.openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })?;
        let rc = home.join(".filecmdrc");
        fs::write(&rc, format!("prompt = \"{PROMPT}\"\n"))?;
        let mut cmd = CommandBuilder::new(env!("CARGO_BIN_EXE_filecmd"));
        cmd.arg(format!("--root={}", home.display()));
        cmd.env("HOME", home);
        cmd.env("FILECMD_RC", &rc);
        cmd.env("FILECMD_LOG", "off");
        let _child = pair.slave.spawn_command(cmd)?;

        let mut reader = pair.master.try_clone_reader()?;
        let writer = pair.master.take_writer()?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = [0u8; 1024];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            writer,
            rx,
            buffer: String::new(),
        })
    }

    fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\r")?;
        self.writer.flush()?;
        Ok(())
    }

    fn send_ctrl(&mut self, ch: u8) -> anyhow::Result<()> {
        self.writer.write_all(&[ch])?;
        self.writer.flush()?;
        Ok(())
    }

    /// Wait for the first prompt, before anything has been typed.
    fn read_until_prompt(&mut self, timeout: Duration) -> anyhow::Result<String> {
        self.read_until("", timeout)
    }

    /// Wait until `needle` shows up followed by a fresh prompt. Line editing
    /// redraws the prompt on each keystroke, so a bare prompt match is not
    /// enough once input has been sent.
    fn read_until(&mut self, needle: &str, timeout: Duration) -> anyhow::Result<String> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if let Ok(chunk) = self.rx.recv_timeout(Duration::from_millis(50)) {
                self.buffer.push_str(&chunk);
                let clean = strip_escapes(&self.buffer);
                if let Some(idx) = clean.find(needle) {
                    if clean[idx + needle.len()..].contains(PROMPT) {
                        self.buffer.clear();
                        return Ok(clean);
                    }
                }
            }
        }
        Err(anyhow::anyhow!(
            "timeout waiting for {needle:?}; got {:?}",
            strip_escapes(&self.buffer)
        ))
    }

    fn drain(&mut self, settle: Duration) {
        thread::sleep(settle);
        while self.rx.try_recv().is_ok() {}
        self.buffer.clear();
    }
}

/// Drop CSI sequences and carriage returns from terminal output.
fn strip_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                } else {
                    chars.next();
                }
            }
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

#[test]
#[serial]
fn pty_create_and_exit_saves_history() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let mut session = PtySession::spawn(home.path())?;
    session.read_until_prompt(Duration::from_secs(5))?;
    session.send_line("create file pty.txt")?;
    session.read_until("created pty.txt", Duration::from_secs(5))?;
    assert!(home.path().join("pty.txt").is_file());
    session.send_line("exit")?;
    thread::sleep(Duration::from_millis(300));
    let history = fs::read_to_string(home.path().join(".filecmd_history"))?;
    assert!(history.contains("create file pty.txt"));
    Ok(())
}

#[test]
#[serial]
fn pty_ctrl_c_returns_to_prompt() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let mut session = PtySession::spawn(home.path())?;
    session.read_until_prompt(Duration::from_secs(5))?;
    session.writer.write_all(b"copy file a")?;
    session.send_ctrl(0x03)?;
    session.drain(Duration::from_millis(300));
    // A partial line left behind would turn this into a copy rejection.
    session.send_line("launch file a")?;
    let output = session.read_until("unknown command 'launch'", Duration::from_secs(5))?;
    assert!(!output.contains("connector"));
    session.send_line("exit")?;
    Ok(())
}
