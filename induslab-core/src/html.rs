//! Minimal HTML string helpers for table extraction.
//!
//! Deliberately naive and tailored to a stable table layout: a structural
//! change on the source page surfaces as a parse failure, never a repair.
//! Matching is ASCII case-insensitive on tag names.

/// Content between the first tag matching `open_pat` and the next
/// occurrence of `close_pat`, excluding both tags.
///
/// `open_pat` may stop mid-tag (`"<tbody"`), so attributes on the opening
/// tag are tolerated.
pub fn slice_inside<'a>(html: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = ascii_lower(html);
    let open = lc.find(&ascii_lower(open_pat))?;
    let after_open = html[open..].find('>')? + open + 1;
    let close = lc[after_open..].find(&ascii_lower(close_pat))?;
    Some(&html[after_open..after_open + close])
}

/// Inner content of every `<tag ...>...</tag>` block, in document order.
///
/// Matching is shallow: nested blocks of the same tag are not handled,
/// which is fine for `<tr>`/`<td>` rows that never nest.
pub fn inner_blocks<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = ascii_lower(html);
    let open_pat = format!("<{}", ascii_lower(tag));
    let close_pat = format!("</{}", ascii_lower(tag));

    let mut out = Vec::new();
    let mut from = 0;
    while let Some(rel) = lc[from..].find(&open_pat) {
        let start = from + rel;
        // `<td` must not match `<tdata`: the tag name ends at a delimiter
        match lc.as_bytes().get(start + open_pat.len()) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {}
            _ => {
                from = start + open_pat.len();
                continue;
            }
        }
        let Some(gt) = lc[start..].find('>') else {
            break;
        };
        let inner_start = start + gt + 1;
        let Some(close_rel) = lc[inner_start..].find(&close_pat) else {
            break;
        };
        out.push(&html[inner_start..inner_start + close_rel]);

        let after_close = inner_start + close_rel;
        from = match lc[after_close..].find('>') {
            Some(g) => after_close + g + 1,
            None => break,
        };
    }
    out
}

/// Visible text of a cell: tags stripped, `&nbsp;`/`&amp;` decoded,
/// whitespace collapsed and trimmed.
pub fn cell_text(block: &str) -> String {
    let mut stripped = String::with_capacity(block.len());
    let mut in_tag = false;
    for ch in block.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }
    collapse_ws(&decode_entities(&stripped))
}

/// Minimal entity decoding: the membership table only needs these two.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// ASCII-only lowercasing: byte length is preserved, so indices found on
/// the lowered copy are valid in the original.
fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}
