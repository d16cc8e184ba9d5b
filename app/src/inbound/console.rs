//! Blocking console prompt helpers.
//!
//! All reads return `None` when the input stream ends or fails, which the
//! menus treat as "abort this menu and hand control upward". Everything
//! else is a trimmed line; validation loops live at the call sites or in
//! the typed helpers here.

use std::io::{self, BufRead, Write};

/// Show a label and read one trimmed line.
///
/// Returns `None` on end-of-input or a read failure.
pub fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_owned()),
        Err(_) => None,
    }
}

/// Re-prompt until a positive whole number is entered.
pub fn prompt_positive(label: &str) -> Option<u32> {
    loop {
        let raw = prompt(label)?;
        match raw.parse::<u32>() {
            Ok(value) if value > 0 => return Some(value),
            _ => println!("[ERROR] Please enter a positive whole number."),
        }
    }
}
