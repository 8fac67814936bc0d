//! Light text minifiers for the assembled page.
//!
//! These are deliberately conservative: pure text-in/text-out transforms
//! that strip comments and insignificant whitespace without parsing the
//! languages. They must preserve rendered behavior on any well-formed
//! input, so the JS pass keeps line boundaries (automatic semicolon
//! insertion makes joining lines unsafe) and the HTML pass never touches
//! the contents of `<script>` or `<style>` elements.

/// Minify CSS: strip `/* */` comments, collapse lines.
pub fn css(input: &str) -> String {
    strip_block_comments(input)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

/// Minify JS: drop whole-line `//` comments and blank lines, trim
/// indentation. Lines are kept separate.
pub fn js(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minify HTML: strip `<!-- -->` comments and per-line indentation outside
/// raw-text elements; script and style contents pass through verbatim.
pub fn html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut raw = false;
    let mut in_comment = false;

    for line in input.lines() {
        if raw {
            out.push_str(line);
            out.push('\n');
            if closes_raw_element(line) {
                raw = false;
            }
            continue;
        }

        let line = strip_html_comments(line, &mut in_comment);
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            out.push_str(trimmed);
            out.push('\n');
        }

        if opens_raw_element(trimmed) {
            raw = true;
        }
    }

    out
}

/// A line opens a raw-text region when its last `<script`/`<style` open tag
/// has no matching close tag after it.
fn opens_raw_element(line: &str) -> bool {
    let open = last_index(line, &["<script", "<style"]);
    let close = last_index(line, &["</script>", "</style>"]);
    match (open, close) {
        (Some(open), Some(close)) => close < open,
        (Some(_), None) => true,
        _ => false,
    }
}

fn closes_raw_element(line: &str) -> bool {
    last_index(line, &["</script>", "</style>"]).is_some()
}

fn last_index(line: &str, needles: &[&str]) -> Option<usize> {
    needles.iter().filter_map(|n| line.rfind(n)).max()
}

fn strip_html_comments(line: &str, in_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        if *in_comment {
            match rest.find("-->") {
                Some(end) => {
                    *in_comment = false;
                    rest = &rest[end + 3..];
                }
                None => return out,
            }
        } else {
            match rest.find("<!--") {
                Some(start) => {
                    out.push_str(&rest[..start]);
                    *in_comment = true;
                    rest = &rest[start + 4..];
                }
                None => {
                    out.push_str(rest);
                    return out;
                }
            }
        }
    }
}

fn strip_block_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start..].find("*/") {
            Some(end) => rest = &rest[start + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}
