//! Parse HTTP response header lines.

/// Status line details and headers of the final response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHead {
    /// Reason phrase (`Not Found`); empty for HTTP/2 or when absent.
    pub reason: String,
    pub content_type: Option<String>,
}

/// Decodes a raw header line: UTF-8 when valid, Latin-1 otherwise.
pub(crate) fn decode_header_line(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.trim_end().to_string(),
        Err(_) => data
            .iter()
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string(),
    }
}

/// Parse collected header lines. With redirects followed, curl reports the
/// headers of every hop; each status line starts a new response so only the
/// last one is kept.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head = ResponseHead {
                reason: line.splitn(3, ' ').nth(2).unwrap_or("").trim().to_string(),
                content_type: None,
            };
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                head.content_type = Some(value.trim().to_string());
            }
        }
    }

    head
}
