//! # Clipboard
//!
//! Copying goes through two paths:
//!
//! 1. **Primary**: the platform clipboard API ([`SystemClipboard`], via arboard).
//! 2. **Fallback**, only when the primary path is unavailable or refuses:
//!    a [`FallbackCopier`] acquires a scratch buffer, loads the text into it,
//!    commits the copy, and releases the buffer. The production copier
//!    ([`CommandCopier`]) pipes the text into a clipboard helper process
//!    (`wl-copy`, `xclip`, `xsel`, `pbcopy` or `clip`).
//!
//! The buffer is held by a [`ScopedBuffer`] guard, so it is released on every
//! exit path, including a failed commit. Each copy owns its own buffer.
//!
//! On X11 and Wayland the clipboard owner must stay alive to serve the text.
//! Short-lived processes use [`ClipboardService::one_shot`], which sends
//! copies there straight to a helper that keeps running after exit.
//!
//! A copy that fails on both paths is logged and otherwise swallowed:
//! [`ClipboardService::copy`] reports a [`CopyOutcome`] but never errors.

use crate::error::{Result, VdError};
use std::io::Write;
use std::process::{Child, Command, Stdio};

/// What happened to a copy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    Failed,
}

/// The platform's clipboard write capability.
pub trait PrimaryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// A legacy, buffer-based way of putting text on the clipboard.
pub trait FallbackCopier {
    type Buffer;

    /// Create a fresh buffer owned by one copy request.
    fn acquire(&mut self) -> Result<Self::Buffer>;

    /// Put `text` into the buffer.
    fn load(&mut self, buffer: &mut Self::Buffer, text: &str) -> Result<()>;

    /// Copy the buffer's contents to the clipboard.
    fn commit(&mut self, buffer: &mut Self::Buffer) -> Result<()>;

    /// Dispose of the buffer. Must not fail.
    fn release(&mut self, buffer: Self::Buffer);
}

/// Holds a fallback buffer and releases it when dropped.
pub struct ScopedBuffer<'a, C: FallbackCopier> {
    copier: &'a mut C,
    buffer: Option<C::Buffer>,
}

impl<'a, C: FallbackCopier> ScopedBuffer<'a, C> {
    pub fn acquire(copier: &'a mut C) -> Result<Self> {
        let buffer = copier.acquire()?;
        Ok(Self {
            copier,
            buffer: Some(buffer),
        })
    }

    pub fn load(&mut self, text: &str) -> Result<()> {
        match self.buffer.as_mut() {
            Some(buffer) => self.copier.load(buffer, text),
            None => Err(VdError::Clipboard("buffer already released".to_string())),
        }
    }

    pub fn commit(&mut self) -> Result<()> {
        match self.buffer.as_mut() {
            Some(buffer) => self.copier.commit(buffer),
            None => Err(VdError::Clipboard("buffer already released".to_string())),
        }
    }
}

impl<C: FallbackCopier> Drop for ScopedBuffer<'_, C> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.copier.release(buffer);
        }
    }
}

pub struct ClipboardService<P: PrimaryClipboard, C: FallbackCopier> {
    primary: P,
    fallback: C,
}

impl ClipboardService<SystemClipboard, CommandCopier> {
    /// The real clipboard with the platform's helper commands as fallback.
    pub fn system() -> Self {
        Self::new(SystemClipboard::new(), CommandCopier::for_platform())
    }

    /// Like [`system`](Self::system), for a process that exits right after
    /// copying.
    pub fn one_shot() -> Self {
        Self::new(SystemClipboard::one_shot(), CommandCopier::for_platform())
    }
}

impl<P: PrimaryClipboard, C: FallbackCopier> ClipboardService<P, C> {
    pub fn new(primary: P, fallback: C) -> Self {
        Self { primary, fallback }
    }

    /// Best-effort copy. Never fails from the caller's point of view.
    pub fn copy(&mut self, text: &str) -> CopyOutcome {
        match self.primary.write_text(text) {
            Ok(()) => {
                tracing::debug!("copied via primary clipboard");
                return CopyOutcome::Primary;
            }
            Err(e) => tracing::debug!(error = %e, "primary clipboard unavailable, falling back"),
        }

        match self.copy_with_fallback(text) {
            Ok(()) => {
                tracing::debug!("copied via fallback clipboard");
                CopyOutcome::Fallback
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                CopyOutcome::Failed
            }
        }
    }

    fn copy_with_fallback(&mut self, text: &str) -> Result<()> {
        let mut scoped = ScopedBuffer::acquire(&mut self.fallback)?;
        scoped.load(text)?;
        scoped.commit()
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &C {
        &self.fallback
    }
}

/// The OS clipboard through arboard.
///
/// Opened lazily on first use and kept for the session: on X11 and Wayland
/// the copied text is only served while the handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
    one_shot: bool,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// For processes that exit right after copying. Where the selection dies
    /// with its owner, this declines every write so the copy goes to a helper
    /// process that keeps serving it.
    pub fn one_shot() -> Self {
        Self {
            handle: None,
            one_shot: true,
        }
    }

    /// Whether text written here is still on the clipboard after exit.
    pub fn outlives_process(&self) -> bool {
        !self.one_shot || !selection_dies_with_owner()
    }
}

/// X11 and Wayland hand the selection out on request from its owner.
fn selection_dies_with_owner() -> bool {
    cfg!(all(
        unix,
        not(any(target_os = "macos", target_os = "ios", target_os = "android"))
    ))
}

impl PrimaryClipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if !self.outlives_process() {
            return Err(VdError::Clipboard(
                "selection would be lost when the process exits".to_string(),
            ));
        }
        if self.handle.is_none() {
            let handle = arboard::Clipboard::new()
                .map_err(|e| VdError::Clipboard(format!("clipboard unavailable: {}", e)))?;
            self.handle = Some(handle);
        }
        match self.handle.as_mut() {
            Some(handle) => handle
                .set_text(text.to_string())
                .map_err(|e| VdError::Clipboard(format!("clipboard refused text: {}", e))),
            None => Err(VdError::Clipboard("clipboard unavailable".to_string())),
        }
    }
}

/// Pipes text into a clipboard helper, moving on to the next candidate when
/// one cannot start or exits unsuccessfully.
pub struct CommandCopier {
    candidates: Vec<Vec<String>>,
}

/// A running helper plus what is needed to retry with the next one.
pub struct HelperProcess {
    child: Child,
    program: String,
    /// Index of the candidate to try if this one fails.
    next: usize,
    text: String,
}

impl CommandCopier {
    /// Helpers for the current OS, in order of preference.
    pub fn for_platform() -> Self {
        let candidates: &[&[&str]] = if cfg!(target_os = "macos") {
            &[&["pbcopy"]]
        } else if cfg!(target_os = "windows") {
            &[&["clip"]]
        } else {
            &[
                &["wl-copy"],
                &["xclip", "-selection", "clipboard"],
                &["xsel", "--clipboard", "--input"],
            ]
        };
        Self::with_candidates(
            candidates
                .iter()
                .map(|argv| argv.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    pub fn with_candidates(candidates: Vec<Vec<String>>) -> Self {
        Self { candidates }
    }

    /// Start the first helper at or after `start` that spawns.
    fn spawn_from(&self, start: usize) -> Result<HelperProcess> {
        let mut last_error = None;
        for (i, argv) in self.candidates.iter().enumerate().skip(start) {
            let Some((program, args)) = argv.split_first() else {
                continue;
            };
            match Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => {
                    return Ok(HelperProcess {
                        child,
                        program: program.clone(),
                        next: i + 1,
                        text: String::new(),
                    })
                }
                Err(e) => last_error = Some(format!("{}: {}", program, e)),
            }
        }
        Err(VdError::Clipboard(format!(
            "no clipboard helper available ({})",
            last_error.unwrap_or_else(|| "none left to try".to_string())
        )))
    }
}

fn feed(helper: &mut HelperProcess) -> Result<()> {
    let stdin = helper
        .child
        .stdin
        .as_mut()
        .ok_or_else(|| VdError::Clipboard("helper has no stdin".to_string()))?;
    stdin
        .write_all(helper.text.as_bytes())
        .map_err(|e| VdError::Clipboard(format!("failed to write to {}: {}", helper.program, e)))
}

impl FallbackCopier for CommandCopier {
    type Buffer = HelperProcess;

    fn acquire(&mut self) -> Result<HelperProcess> {
        self.spawn_from(0)
    }

    fn load(&mut self, helper: &mut HelperProcess, text: &str) -> Result<()> {
        helper.text = text.to_string();
        // A helper that already quit shows up as a failed exit in commit.
        if let Err(e) = feed(helper) {
            tracing::debug!(error = %e, "clipboard helper closed its input");
        }
        Ok(())
    }

    fn commit(&mut self, helper: &mut HelperProcess) -> Result<()> {
        loop {
            // Closing stdin is what tells the helper the text is complete.
            drop(helper.child.stdin.take());
            let status = helper
                .child
                .wait()
                .map_err(|e| VdError::Clipboard(format!("failed to wait for helper: {}", e)))?;
            if status.success() {
                tracing::debug!(program = %helper.program, "clipboard helper done");
                return Ok(());
            }
            tracing::debug!(program = %helper.program, %status, "clipboard helper failed");

            let mut next = self.spawn_from(helper.next).map_err(|e| {
                VdError::Clipboard(format!("{} exited with {}; {}", helper.program, status, e))
            })?;
            next.text = std::mem::take(&mut helper.text);
            if let Err(e) = feed(&mut next) {
                tracing::debug!(error = %e, "clipboard helper closed its input");
            }
            *helper = next;
        }
    }

    fn release(&mut self, mut helper: HelperProcess) {
        drop(helper.child.stdin.take());
        if let Ok(None) = helper.child.try_wait() {
            let _ = helper.child.kill();
        }
        let _ = helper.child.wait();
    }
}
