//! Argument-vector commands.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// A program invocation held as an argument vector.
///
/// Arguments are never joined into a shell string for execution; the
/// [`Display`](fmt::Display) form quotes them only for humans to read.
///
/// # Examples
///
/// ```
/// use wpcodecept::docker::DockerCommand;
///
/// let cmd = DockerCommand::docker()
///     .arg("network")
///     .arg("create")
///     .arg("my project_wpcodecept-network");
///
/// assert_eq!(cmd.get_args().len(), 3);
/// assert_eq!(
///     cmd.to_string(),
///     "docker network create 'my project_wpcodecept-network'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerCommand {
    program: String,
    args: Vec<String>,
}

impl DockerCommand {
    /// Starts a command for an arbitrary program.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Starts a `docker` command.
    #[must_use]
    pub fn docker() -> Self {
        Self::new("docker")
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends `flag value` when `value` is present.
    #[must_use]
    pub fn opt(self, flag: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// The program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, excluding the program.
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for DockerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// POSIX single-quoting for display.
fn quote(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+%".contains(c));

    if plain {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}
