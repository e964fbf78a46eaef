use crate::command::{Arity, Builtin};
use crate::env::Environment;
use crate::error::ShellError;
use crate::external::ExternalTool;
use anyhow::{Context, Result};
use rand::Rng;
use std::env;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Longest password `myone` will generate.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

/// Characters `myone` draws passwords from.
pub const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_=+";

/// `mycd [dir]`: report or change the working directory.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "mycd"
    }

    fn arity(&self) -> Arity {
        Arity::Optional
    }

    fn summary(&self) -> &'static str {
        "Change to the given directory, or show the current one."
    }

    fn execute(
        &self,
        arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        let Some(target) = arg else {
            let cwd = env::current_dir().unwrap_or_else(|_| env.current_dir.clone());
            writeln!(stdout, "Current directory: {}", cwd.display())?;
            return Ok(());
        };

        let target = PathBuf::from(target);
        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical =
            fs::canonicalize(&new_dir).with_context(|| format!("mycd: {}", new_dir.display()))?;
        env::set_current_dir(&canonical)
            .with_context(|| format!("mycd: {}", canonical.display()))?;
        env.record_chdir(&canonical);

        writeln!(stdout, "Directory changed to: {}", canonical.display())?;
        Ok(())
    }
}

/// `myclr`: clear the terminal.
pub struct Clr;

impl Builtin for Clr {
    fn name(&self) -> &'static str {
        "myclr"
    }

    fn arity(&self) -> Arity {
        Arity::None
    }

    fn summary(&self) -> &'static str {
        "Clear the screen."
    }

    fn execute(
        &self,
        _arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        stdout.flush()?;
        ExternalTool::new("clear").run(env)?;
        Ok(())
    }
}

/// `mydir [dir]`: list a directory with `ls`.
pub struct Dir;

impl Builtin for Dir {
    fn name(&self) -> &'static str {
        "mydir"
    }

    fn arity(&self) -> Arity {
        Arity::Optional
    }

    fn summary(&self) -> &'static str {
        "List the contents of the given or current directory."
    }

    fn execute(
        &self,
        arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        stdout.flush()?;
        ExternalTool::new("ls")
            .args(arg.unwrap_or_default().split_whitespace())
            .run(env)?;
        Ok(())
    }
}

/// `myenviron`: print every environment variable.
pub struct Environ;

impl Builtin for Environ {
    fn name(&self) -> &'static str {
        "myenviron"
    }

    fn arity(&self) -> Arity {
        Arity::None
    }

    fn summary(&self) -> &'static str {
        "List all environment strings."
    }

    fn execute(
        &self,
        _arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        for (key, value) in &env.vars {
            writeln!(stdout, "{key}={value}")?;
        }
        Ok(())
    }
}

/// `myecho [text]`: print the text on its own line.
pub struct Echo;

impl Builtin for Echo {
    fn name(&self) -> &'static str {
        "myecho"
    }

    fn arity(&self) -> Arity {
        Arity::Optional
    }

    fn summary(&self) -> &'static str {
        "Display the given text, collapsing runs of blanks."
    }

    fn execute(
        &self,
        arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<()> {
        writeln!(stdout, "{}", arg.unwrap_or_default())?;
        Ok(())
    }
}

/// `myhelp`: page the user manual through `more`.
#[derive(Debug, Default)]
pub struct Help {
    text: String,
}

impl Help {
    /// A manual listing `commands` in order.
    pub fn listing<'a>(commands: impl IntoIterator<Item = &'a dyn Builtin>) -> Self {
        Self {
            text: help_text(commands),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The manual shown by `myhelp`, one line per builtin.
pub fn help_text<'a>(commands: impl IntoIterator<Item = &'a dyn Builtin>) -> String {
    let mut text = String::from("MyShell Help\n-------------\n");
    for cmd in commands {
        let usage = match cmd.arity() {
            Arity::None => cmd.name().to_string(),
            Arity::Optional => format!("{} [arg]", cmd.name()),
            Arity::Required => format!("{} <arg>", cmd.name()),
        };
        text.push_str(&format!("{usage:<16} - {}\n", cmd.summary()));
    }
    text
}

impl Builtin for Help {
    fn name(&self) -> &'static str {
        "myhelp"
    }

    fn arity(&self) -> Arity {
        Arity::None
    }

    fn summary(&self) -> &'static str {
        "Display the user manual."
    }

    fn execute(
        &self,
        _arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        stdout.flush()?;
        if let Err(e) = ExternalTool::new("more").run_with_input(env, self.text.as_bytes()) {
            log::debug!("pager unavailable, printing directly: {e:#}");
            stdout.write_all(self.text.as_bytes())?;
        }
        Ok(())
    }
}

/// `mypause`: wait until Enter is pressed.
pub struct Pause;

impl Builtin for Pause {
    fn name(&self) -> &'static str {
        "mypause"
    }

    fn arity(&self) -> Arity {
        Arity::None
    }

    fn summary(&self) -> &'static str {
        "Pause the shell until 'Enter' is pressed."
    }

    fn execute(
        &self,
        _arg: Option<&str>,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<()> {
        write!(stdout, "Press Enter to continue...")?;
        stdout.flush()?;
        let mut byte = [0u8; 1];
        loop {
            match stdin.read(&mut byte) {
                Ok(0) => break,
                Ok(_) if byte[0] == b'\n' => break,
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// `myquit`: leave the shell with status 0.
pub struct Quit;

impl Builtin for Quit {
    fn name(&self) -> &'static str {
        "myquit"
    }

    fn arity(&self) -> Arity {
        Arity::None
    }

    fn summary(&self) -> &'static str {
        "Quit the shell."
    }

    fn execute(
        &self,
        _arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<()> {
        writeln!(stdout, "Exiting MyShell...")?;
        stdout.flush()?;
        std::process::exit(0)
    }
}

/// `myone <length>`: print a random password.
pub struct One;

/// Parse the `myone` length argument.
///
/// Anything but an integer in `1..=MAX_PASSWORD_LENGTH` is rejected.
pub fn parse_password_length(arg: Option<&str>) -> Result<usize, ShellError> {
    let invalid = || ShellError::InvalidArgument("Invalid password length".to_string());
    let length: i64 = arg
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(invalid)?;
    if length <= 0 {
        return Err(invalid());
    }
    match usize::try_from(length) {
        Ok(n) if n <= MAX_PASSWORD_LENGTH => Ok(n),
        _ => Err(ShellError::InvalidArgument(format!(
            "Password length must not exceed {MAX_PASSWORD_LENGTH}"
        ))),
    }
}

/// Draw `length` characters uniformly from [`PASSWORD_CHARSET`].
pub fn generate_password<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

impl Builtin for One {
    fn name(&self) -> &'static str {
        "myone"
    }

    fn arity(&self) -> Arity {
        Arity::Required
    }

    fn summary(&self) -> &'static str {
        "Generate a random password of the given length."
    }

    fn execute(
        &self,
        arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<()> {
        let length = parse_password_length(arg)?;
        let password = generate_password(length, &mut rand::thread_rng());
        writeln!(stdout, "Generated password: {password}")?;
        Ok(())
    }
}

/// `mytwo`: show disk usage with `df -h`.
pub struct Two;

impl Builtin for Two {
    fn name(&self) -> &'static str {
        "mytwo"
    }

    fn arity(&self) -> Arity {
        Arity::None
    }

    fn summary(&self) -> &'static str {
        "Display disk usage."
    }

    fn execute(
        &self,
        _arg: Option<&str>,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        stdout.flush()?;
        ExternalTool::new("df").arg("-h").run(env)?;
        Ok(())
    }
}
