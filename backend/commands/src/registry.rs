/// Command registry: names to descriptors.
use std::collections::HashMap;
use std::sync::Arc;

use crate::command::Command;

pub struct CommandRegistry<M> {
    commands: HashMap<String, Arc<Command<M>>>,
}

impl<M> CommandRegistry<M> {
    pub fn new() -> Self {
        Self { commands: HashMap::new() }
    }

    /// Insert under the command's own name. Returns the descriptor it replaced, if any.
    pub fn insert(&mut self, command: Arc<Command<M>>) -> Option<Arc<Command<M>>> {
        self.commands.insert(command.name().to_string(), command)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Command<M>>> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All commands, sorted by name.
    pub fn all(&self) -> Vec<Arc<Command<M>>> {
        let mut all: Vec<_> = self.commands.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<M> Default for CommandRegistry<M> {
    fn default() -> Self { Self::new() }
}
