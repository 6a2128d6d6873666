//! Fixtures shared by the unit tests.

use crate::model::{Card, CardId, List, ListId, Priority};
use chrono::NaiveDate;

pub fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date")
}

pub fn card(id: CardId, title: &str) -> Card {
    Card {
        id,
        title: title.to_string(),
        description: format!("Description for {}", title),
        due: due(),
        tag: "work".to_string(),
        tag_color: "#336699".to_string(),
        priority: Priority::Medium,
    }
}

pub fn list(id: ListId, title: &str, cards: Vec<Card>) -> List {
    List {
        id,
        title: title.to_string(),
        color: String::new(),
        cards,
    }
}

/// Two lists holding cards [1, 2] and [3, 4].
pub fn two_lists() -> Vec<List> {
    vec![
        list(1, "To Do", vec![card(1, "Task 1"), card(2, "Task 2")]),
        list(2, "Doing", vec![card(3, "Task 3"), card(4, "Task 4")]),
    ]
}
