use bulkcal_core::launcher::Prompt;
use bulkcal_core::{BulkCalError, BulkCalResult};
use dialoguer::Input;

/// Waits for RETURN on the controlling terminal
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn wait_for_user(&self, message: &str) -> BulkCalResult<()> {
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| BulkCalError::Prompt(e.to_string()))?;
        Ok(())
    }
}
