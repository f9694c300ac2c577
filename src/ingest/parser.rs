//! Line-oriented email parsing.
//!
//! Messages are scanned once, top to bottom. Until the first empty line the
//! scanner is in header mode and only looks at `From: `, `To: ` and
//! `Subject: `. Everything after that line is body text. There is no MIME
//! handling: multi-part messages, encoded words and attachments come through
//! as literal text.

const FROM_PREFIX: &str = "From: ";
const TO_PREFIX: &str = "To: ";
const SUBJECT_PREFIX: &str = "Subject: ";

/// Header fields and body extracted from one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Parse the full text of one message.
///
/// Header values are kept verbatim after the prefix; a repeated header keeps
/// its last occurrence. Each body line is terminated with `\n`, so a message
/// without a blank line produces an empty body. Lines are split on `\n` and a
/// trailing `\r` is dropped.
pub fn parse_message(text: &str) -> ParsedMessage {
    let mut parsed = ParsedMessage::default();
    let mut in_body = false;

    for line in text.lines() {
        if in_body {
            parsed.body.push_str(line);
            parsed.body.push('\n');
            continue;
        }

        if let Some(value) = line.strip_prefix(FROM_PREFIX) {
            parsed.from = value.to_string();
        } else if let Some(value) = line.strip_prefix(TO_PREFIX) {
            parsed.to = value.to_string();
        } else if let Some(value) = line.strip_prefix(SUBJECT_PREFIX) {
            parsed.subject = value.to_string();
        } else if line.is_empty() {
            in_body = true;
        }
    }

    parsed
}

/// Parse raw file bytes, replacing invalid UTF-8 sequences.
pub fn parse_message_bytes(raw: &[u8]) -> ParsedMessage {
    parse_message(&String::from_utf8_lossy(raw))
}
