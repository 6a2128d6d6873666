use colored::{ColoredString, Colorize};
use kanboard::api::{CmdMessage, FieldError, MessageLevel};
use kanboard::model::{Card, List, Priority};
use kanboard::search::SearchHit;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const META_WIDTH: usize = 30;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("  {}: {}", error.field.bold(), error.message.red());
    }
}

pub(super) fn print_board(lists: &[List]) {
    if lists.is_empty() {
        println!("The board is empty.");
        return;
    }

    for (i, list) in lists.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_list(list);
    }
}

pub(super) fn print_hits(hits: &[SearchHit]) {
    for (i, hit) in hits.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_list(&hit.list);
    }
}

pub(super) fn print_config(entries: &[(&'static str, String)]) {
    for (key, value) in entries {
        println!("{} = {}", key, value);
    }
}

fn print_list(list: &List) {
    let header = format!("{}. {}", list.id, list.title);
    println!(
        "{} {}",
        paint(&header, &list.color).bold(),
        format!("({})", list.cards.len()).dimmed()
    );

    if list.cards.is_empty() {
        println!("    {}", "no cards".dimmed());
        return;
    }
    for card in &list.cards {
        print_card(card);
    }
}

fn print_card(card: &Card) {
    let idx_str = format!("    #{} ", card.id);
    let available = LINE_WIDTH.saturating_sub(idx_str.width() + META_WIDTH);

    let title_display = truncate_to_width(&card.title, available);
    let padding = available.saturating_sub(title_display.width());

    let priority = match card.priority {
        Priority::High => "high  ".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low   ".normal(),
    };
    let tag = if card.tag.is_empty() {
        "".normal()
    } else {
        paint(&format!("[{}]", card.tag), &card.tag_color)
    };

    println!(
        "{}{}{} {} {} {}",
        idx_str.yellow(),
        title_display,
        " ".repeat(padding),
        priority,
        card.due.format("%Y-%m-%d").to_string().dimmed(),
        tag
    );
}

/// Color `text` with a `#RRGGBB` string; anything else leaves it plain.
fn paint(text: &str, color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_wide_text() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#FF8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex("#ff8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex("red"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex(""), None);
    }
}
