use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s).+?(?:[.?!;]+\s+|[。！？]+\s*|\n+|$)").expect("sentence regex")
});

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Packs `text` into chunks of at most `max_chars` characters, breaking at sentence or line ends
/// when possible. Concatenating the chunks yields `text` again.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut cur_chars = 0usize;
    for m in SENTENCE_RE.find_iter(text) {
        let piece = m.as_str();
        let piece_chars = piece.chars().count();
        if cur_chars + piece_chars <= max_chars {
            cur.push_str(piece);
            cur_chars += piece_chars;
            continue;
        }
        if !cur.is_empty() {
            chunks.push(std::mem::take(&mut cur));
            cur_chars = 0;
        }
        if piece_chars <= max_chars {
            cur.push_str(piece);
            cur_chars = piece_chars;
            continue;
        }
        // Oversized sentence: hard split on char boundaries.
        let mut rest: Vec<char> = piece.chars().collect();
        while rest.len() > max_chars {
            let tail = rest.split_off(max_chars);
            chunks.push(rest.into_iter().collect());
            rest = tail;
        }
        cur_chars = rest.len();
        cur = rest.into_iter().collect();
    }
    if !cur.is_empty() {
        chunks.push(cur);
    }
    chunks
}

pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}
