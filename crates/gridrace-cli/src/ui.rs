//! UI helpers for CLI display.

use console::{style, Style};

use gridrace_core::participant::ParticipantId;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Terminal style for an entrant, keyed by its roster name.
#[must_use]
pub fn lane_style(name: &str) -> Style {
    let base = Style::new().bold();
    match name {
        "Yellow" => base.yellow(),
        "White" => base.white(),
        "Red" => base.red(),
        "Blue" => base.blue(),
        _ => base,
    }
}

/// Indicatif color name for an entrant's bar.
#[must_use]
pub fn bar_color(name: &str) -> &'static str {
    match name {
        "Yellow" => "yellow",
        "Red" => "red",
        "Blue" => "blue",
        _ => "white",
    }
}

/// Print a styled header.
pub fn print_header(text: &str) {
    if is_color_disabled() {
        println!("=== {text} ===");
    } else {
        println!("{}", style(format!("=== {text} ===")).bold().cyan());
    }
}

/// Print the winner banner.
pub fn print_winner(name: &str, id: ParticipantId) {
    if is_color_disabled() {
        println!("[WIN] {name} {id}");
    } else {
        println!(
            "{} {}",
            style("[WIN]").green().bold(),
            lane_style(name).apply_to(format!("{name} {id}"))
        );
    }
}

/// Print an error message.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_colors_cover_roster() {
        assert_eq!(bar_color("Yellow"), "yellow");
        assert_eq!(bar_color("White"), "white");
        assert_eq!(bar_color("Red"), "red");
        assert_eq!(bar_color("Blue"), "blue");
        assert_eq!(bar_color("Green"), "white");
    }

    #[test]
    fn lane_style_keeps_text() {
        let styled = lane_style("Red").apply_to("Red #2").to_string();
        assert!(styled.contains("Red #2"));
    }

    #[test]
    fn print_functions_do_not_panic() {
        print_header("Race finished");
        print_winner("Blue", ParticipantId(3));
        print_error("lane blocked");
        print_header("");
    }
}
