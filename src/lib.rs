#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod path_utils;
pub mod shell;
pub mod vars;

#[cfg(test)]
pub mod test_utils;

use crate::config::ENV_LANG;

pub fn init_locale() {
    match std::env::var(ENV_LANG) {
        Ok(locale) if !locale.trim().is_empty() => rust_i18n::set_locale(&locale),
        _ => rust_i18n::set_locale("en"),
    }
}
