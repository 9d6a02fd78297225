//! External link actions
//!
//! Open the selected row's Instagram link or copy it, through the commands
//! configured in config.yaml.

use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

use crate::{log_debug, App};

/// Wait for a spawned command off the UI thread so it does not linger as a zombie
fn reap_in_background(mut child: Child) {
    thread::spawn(move || {
        let _ = child.wait();
    });
}

/// Start `program` with `arg` and return without waiting for it
fn spawn_detached(program: &str, arg: &str) -> io::Result<()> {
    let child = Command::new(program)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    reap_in_background(child);
    Ok(())
}

/// Feed `text` to `program` on stdin and wait for it to exit
///
/// Clipboard helpers read to EOF and exit (forking a holder when they need
/// one), so the wait is short.
fn pipe_to_command(program: &str, text: &str) -> io::Result<ExitStatus> {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Dropping stdin closes it and signals EOF
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            let _ = child.wait();
            return Err(e);
        }
    }
    child.wait()
}

impl App {
    pub(crate) fn open_selected_link(&mut self) {
        let Some(ref open_cmd) = self.open_command else {
            self.model.show_toast("Error: open_command not configured".to_string());
            return;
        };

        let Some(link) = self.model.selected_link() else {
            return;
        };

        // A browser may keep running; it is reaped off the UI thread
        match spawn_detached(open_cmd, &link) {
            Ok(()) => {
                log_debug(&format!("open_command: spawned {} {}", open_cmd, link));
                self.model.show_toast(format!("Opened: {}", link));
            }
            Err(e) => {
                log_debug(&format!("Failed to execute open_command '{}': {}", open_cmd, e));
                let toast_msg = format!("Error: Failed to open with '{}'", open_cmd);
                self.model.show_toast(toast_msg);
            }
        }
    }

    pub(crate) fn copy_selected_link(&mut self) {
        let Some(ref clipboard_cmd) = self.clipboard_command else {
            log_debug("No clipboard_command configured - set clipboard_command in config.yaml");
            self.model
                .show_toast("Error: clipboard_command not configured".to_string());
            return;
        };

        let Some(link) = self.model.selected_link() else {
            return;
        };

        let result = pipe_to_command(clipboard_cmd, &link).and_then(|status| {
            if status.success() {
                Ok(())
            } else {
                Err(io::Error::other(format!("exited with {}", status)))
            }
        });

        match result {
            Ok(()) => {
                log_debug(&format!("Copied to clipboard via {}: {}", clipboard_cmd, link));
                self.model.show_toast(format!("Copied to clipboard: {}", link));
            }
            Err(e) => {
                log_debug(&format!(
                    "ERROR: Failed to execute clipboard command '{}': {}",
                    clipboard_cmd, e
                ));
                let toast_msg = format!("Error: Failed to copy with '{}'", clipboard_cmd);
                self.model.show_toast(toast_msg);
            }
        }
    }
}
