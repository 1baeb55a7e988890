use crate::Response;

/// Number of responses shown for the selected task.
pub const RESPONSE_WINDOW: usize = 5;

/// Keeps the last [`RESPONSE_WINDOW`] responses of a history, newest first.
///
/// The service appends responses in capture order, so the tail of the history
/// is the most recent. The input is left untouched.
pub fn window(responses: &[Response]) -> Vec<Response> {
    let start = responses.len().saturating_sub(RESPONSE_WINDOW);
    responses[start..].iter().rev().cloned().collect()
}
