use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub disabled: bool,
}

/// Interactive selection and confirmation. An empty selection or a declined
/// confirmation is a normal answer, not an error.
pub trait Prompter: Send + Sync {
    /// Returns the indices of the chosen options, in ascending order.
    /// Disabled options are never returned.
    fn multi_select(&self, prompt: &str, options: &[SelectOption]) -> AppResult<Vec<usize>>;
    fn confirm(&self, prompt: &str, default: bool) -> AppResult<bool>;
}
