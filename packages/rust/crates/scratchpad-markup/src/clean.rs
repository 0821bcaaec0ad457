/// Normalize extracted text.
///
/// Strips trailing whitespace on every line, collapses runs of three or more
/// blank lines into a single blank line, and trims the result. Cleaning is a
/// fixed point: `clean_text(&clean_text(x)) == clean_text(x)`.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        flush_blank_run(&mut lines, blank_run);
        blank_run = 0;
        lines.push(line);
    }
    flush_blank_run(&mut lines, blank_run);

    lines.join("\n").trim().to_string()
}

fn flush_blank_run(lines: &mut Vec<&str>, run: usize) {
    let keep = if run >= 3 { 1 } else { run };
    lines.extend(std::iter::repeat_n("", keep));
}
