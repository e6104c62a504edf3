use std::str;

use crate::errors::GuestbookError;
use crate::persistence::Record;

/// Parse a raw datagram body as a URL-encoded form submission.
///
/// The whole body is percent-decoded first (`+` as space), then split into
/// segments on `&` and each segment on its first `=`. A segment with no `=`
/// is a malformed submission. Only `username` and `message` are kept;
/// unknown keys are ignored and absent keys default to the empty string.
pub fn parse_submission(data: &[u8]) -> Result<Record, GuestbookError> {
    let raw = str::from_utf8(data)
        .map_err(|e| GuestbookError::MalformedSubmission(format!("body is not UTF-8: {e}")))?;

    let decoded = unquote_plus(raw)?;

    let mut username = String::new();
    let mut message = String::new();

    for segment in decoded.split('&') {
        let (key, value) = segment.split_once('=').ok_or_else(|| {
            GuestbookError::MalformedSubmission(format!("segment without '=': {segment:?}"))
        })?;

        match key {
            "username" => username = value.to_string(),
            "message" => message = value.to_string(),
            _ => {}
        }
    }

    Ok(Record { username, message })
}

/// Percent-decode with form semantics: `+` means space.
fn unquote_plus(raw: &str) -> Result<String, GuestbookError> {
    let spaced = raw.replace('+', " ");

    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            GuestbookError::MalformedSubmission(format!("invalid percent-encoding: {e}"))
        })
}
