pub mod chat;
pub mod search;
pub mod ticket;

use crate::adapter::{ERROR_PREFIX, is_error_text};
use crate::error::{AppError, AppResult};

/// Lifts an adapter result string back into an error for command-line use,
/// where a failed call should end with a non-zero exit status.
pub fn tool_result(text: String) -> AppResult<String> {
    if is_error_text(&text) {
        return Err(tool_error(text));
    }
    Ok(text)
}

pub fn tool_error(text: String) -> AppError {
    AppError::ToolHost(text.trim_start_matches(ERROR_PREFIX).trim_start().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifts_error_strings() {
        assert_eq!(tool_result("Ticket updated".to_string()).unwrap(), "Ticket updated");
        let err = tool_result("Error: Invalid status".to_string()).unwrap_err();
        assert!(matches!(err, AppError::ToolHost(message) if message == "Invalid status"));
    }
}
