use std::collections::BTreeMap;
use std::env as stdenv;
use std::path::{Path, PathBuf};

/// Variables the shell keeps in step with directory changes.
pub const PWD: &str = "PWD";
pub const OLDPWD: &str = "OLDPWD";

/// The shell's view of its process environment.
///
/// Variables are captured once at startup and then owned by the session, so
/// `mycd` can update `PWD` and `OLDPWD` without touching the real process
/// environment. External utilities are spawned with this map and with
/// [`Environment::current_dir`] as their working directory.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables, ordered by key.
    pub vars: BTreeMap<String, String>,
    /// Directory the shell last changed into.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state.
    pub fn new() -> Self {
        let vars = stdenv::vars().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, current_dir }
    }

    /// Build an environment from explicit parts, without reading the process.
    pub fn with_vars<I, K, V>(vars: I, current_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            current_dir: current_dir.into(),
        }
    }

    /// Get the value of an environment variable.
    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Set or override an environment variable.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Record a successful directory change.
    ///
    /// `OLDPWD` receives the previous `PWD`, or the previous working directory
    /// when `PWD` was never set.
    pub fn record_chdir(&mut self, new_dir: &Path) {
        let previous = match self.vars.get(PWD) {
            Some(pwd) => pwd.clone(),
            None => self.current_dir.to_string_lossy().into_owned(),
        };
        self.set_var(OLDPWD, previous);
        self.set_var(PWD, new_dir.to_string_lossy());
        self.current_dir = new_dir.to_path_buf();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_set_and_get_var() {
        let mut env = Environment::with_vars(Vec::<(String, String)>::new(), "/");

        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);

        env.set_var("KEY", "VALUE");

        assert_eq!(env.get_var("KEY"), Some("VALUE"));
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
    }

    #[test]
    fn test_record_chdir_moves_pwd_into_oldpwd() {
        let mut env = Environment::with_vars([(PWD, "/srv")], "/srv");

        env.record_chdir(Path::new("/tmp"));

        assert_eq!(env.get_var(OLDPWD), Some("/srv"));
        assert_eq!(env.get_var(PWD), Some("/tmp"));
        assert_eq!(env.current_dir, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_record_chdir_without_pwd_uses_current_dir() {
        let mut env = Environment::with_vars(Vec::<(String, String)>::new(), "/var");

        env.record_chdir(Path::new("/opt"));

        assert_eq!(env.get_var(OLDPWD), Some("/var"));
        assert_eq!(env.get_var(PWD), Some("/opt"));
    }
}
