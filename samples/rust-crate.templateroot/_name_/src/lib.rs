//! _description_

/// Returns a greeting from the _name_ crate.
pub fn greet(who: &str) -> String {
    format!("Hello {} from _name_!", who)
}
