use crate::env::Environment;
use anyhow::Result;
use std::collections::HashMap;
use std::io::{Read, Write};

/// How many arguments a builtin takes after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Takes nothing; anything typed after the name is ignored.
    None,
    /// May be given one argument.
    Optional,
    /// Must be given one argument; the handler reports its absence.
    Required,
}

/// A command the shell knows at compile time.
///
/// Handlers run in-process and receive at most one argument. Errors they
/// return are printed by the dispatcher; they never end the session.
pub trait Builtin {
    /// Canonical lowercase name, e.g. "mycd".
    fn name(&self) -> &'static str;

    fn arity(&self) -> Arity;

    /// One-line description used by `myhelp`.
    fn summary(&self) -> &'static str;

    /// Executes the command using provided IO streams and environment.
    fn execute(
        &self,
        arg: Option<&str>,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()>;
}

/// Ordered, immutable set of builtins.
///
/// Lookup is by name; iteration keeps insertion order, which is the order
/// completion offers names in.
pub struct Registry {
    commands: Vec<Box<dyn Builtin>>,
    by_name: HashMap<&'static str, usize>,
}

impl Registry {
    /// Create a registry from builtins in listing order.
    ///
    /// A later builtin with an already registered name is ignored.
    pub fn new(commands: Vec<Box<dyn Builtin>>) -> Self {
        let mut by_name = HashMap::with_capacity(commands.len());
        let mut unique = Vec::with_capacity(commands.len());
        for cmd in commands {
            if by_name.contains_key(cmd.name()) {
                log::warn!("duplicate builtin {} ignored", cmd.name());
                continue;
            }
            by_name.insert(cmd.name(), unique.len());
            unique.push(cmd);
        }
        Self {
            commands: unique,
            by_name,
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.by_name.get(name).map(|&i| &*self.commands[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Builtin> {
        self.commands.iter().map(|cmd| &**cmd)
    }

    /// Names in registry order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|cmd| cmd.name()).collect()
    }

    /// Like [`Registry::new`], but a `myhelp` entry is replaced by a manual
    /// listing exactly these builtins.
    pub fn with_manual(mut commands: Vec<Box<dyn Builtin>>) -> Self {
        use crate::builtin::Help;
        let help = Help::listing(commands.iter().map(|cmd| &**cmd));
        if let Some(slot) = commands.iter_mut().find(|cmd| cmd.name() == help.name()) {
            *slot = Box::new(help);
        }
        Self::new(commands)
    }
}

impl Default for Registry {
    /// The ten builtins of the shell, in the order `myhelp` lists them.
    fn default() -> Self {
        use crate::builtin::*;
        Self::with_manual(vec![
            Box::new(Cd),
            Box::new(Clr),
            Box::new(Dir),
            Box::new(Environ),
            Box::new(Echo),
            Box::new(Help::default()),
            Box::new(Pause),
            Box::new(Quit),
            Box::new(One),
            Box::new(Two),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Builtin for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn arity(&self) -> Arity {
            Arity::None
        }

        fn summary(&self) -> &'static str {
            ""
        }

        fn execute(
            &self,
            _arg: Option<&str>,
            _stdin: &mut dyn Read,
            _stdout: &mut dyn Write,
            _env: &mut Environment,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_registry_order() {
        assert_eq!(
            Registry::default().names(),
            vec![
                "mycd",
                "myclr",
                "mydir",
                "myenviron",
                "myecho",
                "myhelp",
                "mypause",
                "myquit",
                "myone",
                "mytwo"
            ]
        );
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let registry = Registry::new(vec![
            Box::new(Named("a")),
            Box::new(Named("b")),
            Box::new(Named("a")),
        ]);
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert!(registry.get("b").is_some());
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_manual_lists_the_registry_in_use() {
        let registry = Registry::with_manual(vec![
            Box::new(Named("a")),
            Box::new(crate::builtin::Help::default()),
        ]);
        let mut env = Environment::with_vars([("PATH", "")], std::env::temp_dir());
        let mut out = Vec::new();

        registry
            .get("myhelp")
            .unwrap()
            .execute(None, &mut std::io::empty(), &mut out, &mut env)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\na "));
        assert!(text.contains("\nmyhelp "));
        assert!(!text.contains("mycd"));
    }
}
