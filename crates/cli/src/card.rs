//! Recipe cards
//!
//! A card is the recipe name, an underline, and one aligned row per
//! ingredient with its quantity.

use console::measure_text_width;
use cookbuddy_search::Record;
use owo_colors::OwoColorize;

const INDENT: &str = "  ";
const GAP: usize = 3;

/// Render a recipe as plain text
pub fn render_card(record: &Record) -> String {
    let title = record.name.trim();
    let mut out = String::new();

    out.push_str(title);
    out.push('\n');
    out.push_str(&"═".repeat(measure_text_width(title).max(1)));
    out.push('\n');

    if record.attributes.is_empty() {
        out.push_str(INDENT);
        out.push_str("(no ingredients listed)\n");
        return out;
    }

    let width = label_width(record);
    for attribute in &record.attributes {
        out.push_str(INDENT);
        out.push_str(&pad(&attribute.label, width + GAP));
        out.push_str(&attribute.value);
        out.push('\n');
    }

    out
}

/// Print a recipe card to stdout with a highlighted title
pub fn print_card(record: &Record) {
    let card = render_card(record);
    let mut lines = card.lines();

    if let Some(title) = lines.next() {
        println!("{}", title.bold().green());
    }
    for line in lines {
        println!("{}", line);
    }
}

fn label_width(record: &Record) -> usize {
    record
        .attributes
        .iter()
        .map(|a| measure_text_width(&a.label))
        .max()
        .unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligned_columns() {
        let record = Record::new("Idli")
            .with_attribute("Rice", "2 cups")
            .with_attribute("Urad dal", "1 cup")
            .with_attribute("Salt", "1 tsp");

        let card = render_card(&record);
        let lines: Vec<&str> = card.lines().collect();

        assert_eq!(lines[0], "Idli");
        assert_eq!(lines[1], "════");
        assert_eq!(lines[2], "  Rice       2 cups");
        assert_eq!(lines[3], "  Urad dal   1 cup");
        assert_eq!(lines[4], "  Salt       1 tsp");
    }

    #[test]
    fn test_render_without_attributes() {
        let card = render_card(&Record::new("Kesari"));
        assert_eq!(card, "Kesari\n══════\n  (no ingredients listed)\n");
    }

    #[test]
    fn test_render_trims_title() {
        let card = render_card(&Record::new("  Upma "));
        assert!(card.starts_with("Upma\n════\n"));
    }

    #[test]
    fn test_render_non_ascii_width() {
        let record = Record::new("Pongal")
            .with_attribute("Jeera", "1 tsp")
            .with_attribute("Ghee é", "2 tbsp");
        let card = render_card(&record);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[2], "  Jeera    1 tsp");
        assert_eq!(lines[3], "  Ghee é   2 tbsp");
    }
}
