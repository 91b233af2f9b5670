//! `site-lang` command-line front end over a file-backed preference store.

use crate::config::Config;
use crate::controller::LanguageController;
use crate::i18n::{Language, LanguageRegistry};
use crate::page::MemoryPage;
use crate::storage::PreferenceStore;
use anyhow::{bail, Context, Result};

pub const USAGE: &str = "usage: site-lang <get | set <code> | list>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the stored language (default when unset)
    Get,
    /// Persist a language
    Set(Language),
    /// Print the enabled languages
    List,
}

impl Command {
    /// Parse arguments following the program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match args.as_slice() {
            ["get"] => Ok(Command::Get),
            ["list"] => Ok(Command::List),
            ["set", code] => {
                let language = Language::from_code(code)
                    .with_context(|| format!("cannot set language '{}'", code))?;
                Ok(Command::Set(language))
            }
            _ => bail!("{}", USAGE),
        }
    }

    /// Execute against `store`, returning the text to print.
    pub fn run<S: PreferenceStore>(self, store: S, config: &Config) -> Result<String> {
        let mut controller = LanguageController::with_config(store, MemoryPage::new(), config);

        match self {
            Command::Get => Ok(controller.get_language().code().to_string()),
            Command::Set(language) => {
                controller
                    .try_persist(language)
                    .context("failed to save language preference")?;
                Ok(format!("Language set to {} ({})", language, language.name()))
            }
            Command::List => Ok(list_languages()),
        }
    }
}

fn list_languages() -> String {
    LanguageRegistry::get()
        .list_enabled()
        .iter()
        .map(|lang| {
            let marker = if lang.is_default { " [default]" } else { "" };
            format!("{}  {} ({}){}", lang.code, lang.name, lang.native_name, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
