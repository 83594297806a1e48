// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove any `[ ... ]` segments (footnote markers like `[1]`, `[a]`).
/// Greedy within each bracket pair, no nesting.
pub fn strip_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_bracket = false;
    for ch in s.chars() {
        match ch {
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            _ if !in_bracket => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Comparison key for header labels: lower-case, single spaces.
pub fn header_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}

/// Lower-case, strip common Latin diacritics and punctuation, split into tokens.
/// Good enough to tell "Mesut Özil" and "OEZIL Mesut" apart from a different player.
pub fn name_tokens(s: &str) -> Vec<String> {
    let mut folded = String::with_capacity(s.len());
    for ch in s.chars().flat_map(char::to_lowercase) {
        match fold_char(ch) {
            Some(f) => folded.push_str(f),
            None if ch.is_alphanumeric() => folded.push(ch),
            None => folded.push(' '),
        }
    }
    folded.split_whitespace().map(|t| s!(t)).collect()
}

fn fold_char(ch: char) -> Option<&'static str> {
    Some(match ch {
        'à' | 'á' | 'â' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ä' | 'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ı' => "i",
        'ł' | 'ľ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ø' | 'ō' | 'ő' => "o",
        'ö' | 'œ' => "oe",
        'ř' => "r",
        'ś' | 'š' | 'ş' | 'ș' => "s",
        'ß' => "ss",
        'ť' | 'ț' => "t",
        'ù' | 'ú' | 'û' | 'ū' | 'ů' | 'ű' => "u",
        'ü' => "ue",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    })
}
