//! Plan length extraction from raw solver output.
//!
//! Both planners print every plan action on its own line prefixed with `0:`,
//! whatever the real step index is. Counting those lines gives the makespan.
//! Other lines that happen to start with `0:` are counted too.

pub const PLAN_STEP_MARKER: &str = "0:";

/// Splits on every line boundary a planner may emit, bare `\r` included.
fn output_lines(output: &str) -> impl Iterator<Item = &str> {
    output.split(|c: char| {
        matches!(
            c,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
    })
}

pub fn is_plan_step(line: &str) -> bool {
    line.trim().starts_with(PLAN_STEP_MARKER)
}

pub fn plan_steps(output: &str) -> Vec<&str> {
    output_lines(output)
        .map(str::trim)
        .filter(|line| line.starts_with(PLAN_STEP_MARKER))
        .collect()
}

pub fn makespan(output: &str) -> u32 {
    let steps = output_lines(output).filter(|line| is_plan_step(line)).count();
    u32::try_from(steps).unwrap_or(u32::MAX)
}
