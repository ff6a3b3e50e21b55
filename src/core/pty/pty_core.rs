/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use std::{borrow::Cow, path::PathBuf, pin::Pin};

use portable_pty::{CommandBuilder, MasterPty, SlavePty};
use tokio::task::JoinHandle;

use crate::osc::OscEvent;

use super::pty_config::PtyConfig;

// Buffer size for reading PTY output.
pub const READ_BUFFER_SIZE: usize = 4096;

// Type aliases for better readability.
pub type Controlled = Box<dyn SlavePty + Send>;
pub type Controller = Box<dyn MasterPty>;
pub type ControlledChild = Box<dyn portable_pty::Child>;

/// The command template handed to `portable_pty` once a [`PtyCommandBuilder`] has been
/// built.
pub type PtyCommand = CommandBuilder;

/// A still-running PTY session's orchestration task, boxed and pinned so it can sit
/// next to other futures in a `select!` without requiring the caller to pin it.
pub type PtyCompletionHandle = Pin<Box<JoinHandle<miette::Result<portable_pty::ExitStatus>>>>;

/// Unified event type for PTY output that can contain both OSC sequences and raw output
/// data.
#[derive(Debug)]
pub enum PtyEvent {
    /// OSC sequence event (if OSC capture is enabled).
    Osc(OscEvent),
    /// Raw output data (stdout/stderr combined).
    Output(Vec<u8>),
    /// A write, flush, or resize against the PTY master failed. The session terminates
    /// immediately after this event is sent.
    WriteError(std::io::Error),
    /// Process exited with status.
    Exit(portable_pty::ExitStatus),
}

/// Commands accepted by a read-write PTY session's input handler task.
///
/// Input and output are dumb pipes: the child process determines terminal modes
/// (cooked/raw), interprets environment variables, and owns all terminal-specific
/// behavior. This enum is just the transport.
#[derive(Debug)]
pub enum PtyInput {
    /// Write raw bytes to the PTY.
    Write(Vec<u8>),
    /// Write a line of text followed by `\n`.
    WriteLine(String),
    /// Encode and write a control character or named key.
    SendControl(ControlChar),
    /// Toggle whether [`ControlChar`] arrow keys encode using application-cursor-keys
    /// (DECCKM) sequences. The embedding terminal control should send this whenever it
    /// observes the emulator's own DECCKM mode change, so outgoing key encoding tracks
    /// what the child process last requested.
    SetApplicationCursorKeys(bool),
    /// Encode and write a mouse event, in the encoding (X10 or SGR) the child most
    /// recently requested via private modes 1000/1002/1003 and 1006.
    SendMouse(super::mouse_encoding::MouseEvent),
    /// Toggle whether [`PtyInput::SendMouse`] encodes using the SGR-extended protocol
    /// (mode 1006) instead of the classic 3-byte X10 form.
    SetMouseSgrMode(bool),
    /// Resize the PTY.
    Resize(portable_pty::PtySize),
    /// Flush the writer without sending any new data.
    Flush,
    /// Terminate the session's input handler.
    Close,
}

/// A bidirectional PTY session: send [`PtyInput`] commands on `input`, receive
/// [`PtyEvent`]s on `output`. Dropping `input` (or sending [`PtyInput::Close`]) begins
/// an orderly shutdown; `handle` resolves once the child has exited and every
/// background task has joined.
pub struct PtySession {
    pub input: tokio::sync::mpsc::UnboundedSender<PtyInput>,
    pub output: tokio::sync::mpsc::UnboundedReceiver<PtyEvent>,
    pub handle: PtyCompletionHandle,
}

/// Named keys and control characters that can be sent to a child process over a PTY,
/// encoded the way a real terminal would encode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlChar {
    CtrlA,
    CtrlC,
    CtrlD,
    CtrlE,
    CtrlK,
    CtrlL,
    CtrlU,
    CtrlZ,
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Insert,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key, 1-based (F1..=F12). Out-of-range values encode as a bare escape.
    F(u8),
    /// Caller-supplied bytes, sent verbatim.
    RawSequence(Vec<u8>),
}

impl ControlChar {
    /// Encodes this key the way xterm would, consulting `application_cursor_keys` for
    /// the arrow-key encoding (`ESC[A` vs `ESCOA`) per DECCKM.
    #[must_use]
    pub fn to_bytes(&self, application_cursor_keys: bool) -> Cow<'static, [u8]> {
        match self {
            Self::CtrlA => Cow::Borrowed(&[0x01]),
            Self::CtrlC => Cow::Borrowed(&[0x03]),
            Self::CtrlD => Cow::Borrowed(&[0x04]),
            Self::CtrlE => Cow::Borrowed(&[0x05]),
            Self::CtrlK => Cow::Borrowed(&[0x0B]),
            Self::CtrlL => Cow::Borrowed(&[0x0C]),
            Self::CtrlU => Cow::Borrowed(&[0x15]),
            Self::CtrlZ => Cow::Borrowed(&[0x1A]),
            Self::Tab => Cow::Borrowed(b"\t"),
            Self::Enter => Cow::Borrowed(b"\r"),
            Self::Escape => Cow::Borrowed(b"\x1b"),
            Self::Backspace => Cow::Borrowed(&[0x7F]),
            Self::Delete => Cow::Borrowed(b"\x1b[3~"),
            Self::Insert => Cow::Borrowed(b"\x1b[2~"),
            Self::PageUp => Cow::Borrowed(b"\x1b[5~"),
            Self::PageDown => Cow::Borrowed(b"\x1b[6~"),
            Self::Home => Cow::Borrowed(b"\x1bOH"),
            Self::End => Cow::Borrowed(b"\x1bOF"),
            Self::ArrowUp => Cow::Borrowed(if application_cursor_keys { b"\x1bOA" } else { b"\x1b[A" }),
            Self::ArrowDown => Cow::Borrowed(if application_cursor_keys { b"\x1bOB" } else { b"\x1b[B" }),
            Self::ArrowRight => Cow::Borrowed(if application_cursor_keys { b"\x1bOC" } else { b"\x1b[C" }),
            Self::ArrowLeft => Cow::Borrowed(if application_cursor_keys { b"\x1bOD" } else { b"\x1b[D" }),
            Self::F(1) => Cow::Borrowed(b"\x1bOP"),
            Self::F(2) => Cow::Borrowed(b"\x1bOQ"),
            Self::F(3) => Cow::Borrowed(b"\x1bOR"),
            Self::F(4) => Cow::Borrowed(b"\x1bOS"),
            Self::F(5) => Cow::Borrowed(b"\x1b[15~"),
            Self::F(6) => Cow::Borrowed(b"\x1b[17~"),
            Self::F(7) => Cow::Borrowed(b"\x1b[18~"),
            Self::F(8) => Cow::Borrowed(b"\x1b[19~"),
            Self::F(9) => Cow::Borrowed(b"\x1b[20~"),
            Self::F(10) => Cow::Borrowed(b"\x1b[21~"),
            Self::F(11) => Cow::Borrowed(b"\x1b[23~"),
            Self::F(12) => Cow::Borrowed(b"\x1b[24~"),
            Self::F(_) => Cow::Borrowed(b"\x1b"),
            Self::RawSequence(bytes) => Cow::Owned(bytes.clone()),
        }
    }
}

/// Free-function form of [`ControlChar::to_bytes`], matching the shape callers already
/// use alongside [`control_char_to_bytes`]'s sibling helpers elsewhere in this crate.
#[must_use]
pub fn control_char_to_bytes(ctrl: &ControlChar, application_cursor_keys: bool) -> Cow<'static, [u8]> {
    ctrl.to_bytes(application_cursor_keys)
}

/// Configuration builder for PTY commands with sensible defaults.
///
/// This builder ensures critical settings are not forgotten when creating PTY commands:
/// - Automatically sets the current working directory if not specified
/// - Provides methods for common terminal environment variables
/// - Ensures commands spawn in the correct context (not in `$HOME`)
///
/// # Examples
///
/// Basic cargo command with OSC sequences:
///
/// ```rust
/// # use vt_compositor::PtyCommandBuilder;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cmd = PtyCommandBuilder::new("cargo")
///     .args(["build", "--release"])
///     .enable_osc_sequences()
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// Command with custom working directory:
///
/// ```rust
/// # use vt_compositor::PtyCommandBuilder;
/// # use std::env;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cmd = PtyCommandBuilder::new("npm")
///     .args(["install"])
///     .cwd(env::temp_dir()) // Use temp dir instead of "/path/to/project"
///     .env("NODE_ENV", "production")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PtyCommandBuilder {
    command: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env_vars: Vec<(String, String)>,
}

impl PtyCommandBuilder {
    /// Creates a new PTY command builder for the specified command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            cwd: None,
            env_vars: Vec::new(),
        }
    }

    /// Adds arguments to the command.
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    ///
    /// If not called, defaults to the current directory when [`build()`](Self::build) is
    /// invoked.
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    /// Adds an environment variable to the command's environment.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Enables OSC sequence emission by setting appropriate environment variables.
    ///
    /// Cargo requires specific terminal environment variables to emit OSC 9;4 progress
    /// sequences. This method automatically detects and configures the appropriate
    /// environment based on the current terminal:
    ///
    /// - **Windows Terminal**: Detected via `WT_SESSION` (no additional config needed)
    /// - **`ConEmu`**: Detected via `ConEmuANSI=ON` (no additional config needed)
    /// - **`WezTerm`**: Set via `TERM_PROGRAM=WezTerm` (fallback for all platforms)
    ///
    /// This approach ensures maximum compatibility across different terminals and
    /// operating systems, particularly on Windows where Windows Terminal is the
    /// default in Windows 11.
    ///
    /// Here is a link to the Cargo source code that emits these sequences:
    /// - <https://github.com/rust-lang/cargo/blob/master/src/cargo/core/shell.rs#L594-L600>
    #[must_use]
    pub fn enable_osc_sequences(self) -> Self {
        // Windows Terminal sets WT_SESSION automatically, so we don't need to override
        // it.
        if std::env::var("WT_SESSION").is_ok() {
            // Already in Windows Terminal, no need to set anything.
            self
        } else if std::env::var("ConEmuANSI").ok() == Some("ON".into()) {
            // Already in ConEmu with ANSI enabled.
            self
        } else {
            // Fall back to WezTerm which works on all platforms.
            self.env("TERM_PROGRAM", "WezTerm")
        }
    }

    /// Builds the final [`CommandBuilder`] with all configurations applied.
    ///
    /// Always sets a working directory - uses the provided one or defaults to current
    /// directory. This is critical to ensure the PTY starts in the expected location,
    /// since by default it uses `$HOME`.
    ///
    /// # Returns
    /// * `Ok(CommandBuilder)` - Configured command ready for PTY execution
    /// * `Err(miette::Error)` - If current directory cannot be determined
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined when no
    /// working directory was explicitly provided.
    ///
    /// # Panics
    /// Panics if `cwd` is `None` after attempting to set it to the current directory,
    /// which should be impossible in practice.
    pub fn build(mut self) -> miette::Result<CommandBuilder> {
        // Ensure working directory is always set - use current if not specified. This
        // prevents PTY from spawning in an unexpected location.
        if self.cwd.is_none() {
            let current_dir = std::env::current_dir()
                .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
            self = self.cwd(current_dir);
        }

        // Create the command to return.
        let mut cmd_to_return = CommandBuilder::new(&self.command);

        // Add all arguments.
        for arg in &self.args {
            cmd_to_return.arg(arg);
        }

        // Set the working directory. This is guaranteed to be Some at this point because
        // we ensure it's set above. Using unwrap_or_else with unreachable!() makes the
        // invariant explicit while avoiding clippy warnings.
        let cwd = self.cwd.unwrap_or_else(|| {
            unreachable!("Working directory must be set - we ensure this above")
        });
        cmd_to_return.cwd(cwd);

        // Default TERM so children render as a real xterm-256color terminal unless the
        // caller has already picked one.
        if !self.env_vars.iter().any(|(key, _)| key == "TERM") {
            cmd_to_return.env("TERM", "xterm-256color");
        }

        // Apply all environment variables.
        for (key, value) in &self.env_vars {
            cmd_to_return.env(key, value);
        }

        Ok(cmd_to_return)
    }

    /// Spawns the command in a PTY, returning a bidirectional [`PtySession`] for
    /// reading output and sending input.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined when no working
    /// directory was explicitly provided. Failures that occur after spawning (PTY
    /// allocation, `exec`, I/O) surface as [`PtyEvent::WriteError`]/[`PtyEvent::Exit`]
    /// on the session's `output` channel rather than here.
    pub fn spawn_read_write(self, config: impl Into<PtyConfig>) -> miette::Result<PtySession> {
        Ok(super::spawn_pty_read_write_impl(self, config))
    }
}
