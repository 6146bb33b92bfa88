//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{Item, Metric};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One line per item: position, id, then membership.
///
/// Sections list their children, members name the section they belong to.
pub fn item_line(item: &Item) -> String {
    let pos = format!("{:>3}", item.order).dimmed();
    if item.is_section() {
        format!(
            "{} {} [{}]",
            pos,
            item.id.cyan().bold(),
            item.child_ids.join(", ")
        )
    } else if let Some(section) = item.section_ref() {
        format!("{}   {} {}", pos, item.id, format!("(in {})", section).dimmed())
    } else {
        format!("{} {}", pos, item.id)
    }
}

pub fn items(items: &[Item]) {
    for item in items {
        detail(&item_line(item));
    }
}

pub fn metrics(metrics: &[Metric]) {
    for (i, metric) in metrics.iter().enumerate() {
        detail(&format!("{} {}", format!("{:>3}", i).dimmed(), metric.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;

    #[test]
    fn given_items_when_formatting_lines_then_shows_membership() {
        colored::control::set_override(false);

        let mut section = Item::section("s");
        section.order = 1;
        section.child_ids = vec!["a".into(), "b".into()];
        assert_eq!(item_line(&section), "  1 s [a, b]");

        let mut member = Item::new("a", ItemKind::Chart).in_section("s");
        member.order = 2;
        assert_eq!(item_line(&member), "  2   a (in s)");

        assert_eq!(item_line(&Item::new("top", ItemKind::Text)), "  0 top");
    }
}
