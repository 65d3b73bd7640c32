/// Keywords that mark a line as fault-related (matched on the lowercased line).
pub const FAULT_KEYWORDS: &[&str] = &[
    "error",
    "exception",
    "failed",
    "fatal",
    "critical",
    "warning",
];

/// Lines kept on each side of a fault line.
const CONTEXT_RADIUS: usize = 2;

/// Split raw log text into trimmed, non-empty lines.
pub fn clean_lines(text: &str) -> Vec<&str> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_fault_line(line: &str) -> bool {
    let lowered = line.to_lowercase();
    FAULT_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Collect every fault line together with its surrounding window.
///
/// Windows of nearby fault lines overlap and are appended as-is, so a line can
/// show up more than once. When nothing looks like a fault, every cleaned line
/// is returned.
pub fn extract_context(text: &str) -> Vec<String> {
    let lines = clean_lines(text);

    let mut context = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if !is_fault_line(line) {
            continue;
        }
        let start = i.saturating_sub(CONTEXT_RADIUS);
        let end = (i + CONTEXT_RADIUS + 1).min(lines.len());
        context.extend(lines[start..end].iter().map(|l| (*l).to_string()));
    }

    if context.is_empty() {
        lines.into_iter().map(str::to_string).collect()
    } else {
        context
    }
}
