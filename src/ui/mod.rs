//! Interactive terminal pieces.

mod select;

pub use select::{
    is_interactive, list_line, prompt_secret, prompt_text, selection_label, DialogSelector,
    EnvironmentSelector, SelectError,
};
