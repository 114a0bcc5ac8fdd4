// Display strings for the single bundled locale (Croatian).
use crate::catalog::humanize_id;

pub const AND_WORD: &str = "i";
pub const NO_SOUNDS: &str = "nijedan zvuk";
pub const NO_RECIPIENTS: &str = "nitko";

// "a", "a i b", "a, b i c"
fn join_with_and(items: &[String]) -> Option<String> {
    match items {
        [] => None,
        [only] => Some(only.clone()),
        [head @ .., last] => Some(format!("{} {} {}", head.join(", "), AND_WORD, last)),
    }
}

pub fn format_sounds<S: AsRef<str>>(ids: &[S]) -> String {
    let names: Vec<String> = ids.iter().map(|id| humanize_id(id.as_ref())).collect();
    join_with_and(&names).unwrap_or_else(|| NO_SOUNDS.to_string())
}

pub fn format_recipients<S: AsRef<str>>(labels: &[S]) -> String {
    let names: Vec<String> = labels.iter().map(|l| l.as_ref().to_lowercase()).collect();
    join_with_and(&names).unwrap_or_else(|| NO_RECIPIENTS.to_string())
}
