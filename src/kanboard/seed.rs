//! The sample board a first run starts from.

use crate::model::{Card, List, Priority};
use chrono::{Days, Local, NaiveDate};
use rand::Rng;

const DUE_WINDOW_DAYS: u64 = 15;

/// Three lists with five sample cards, due within the next 15 days.
pub fn default_lists<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<List> {
    let mut card = |id: u64, tag: &str, priority: Priority| Card {
        id,
        title: format!("Task {}", id),
        description: format!("Description for Task {}", id),
        due: random_due(today, &mut *rng),
        tag: tag.to_string(),
        tag_color: random_color(&mut *rng),
        priority,
    };

    vec![
        List {
            id: 1,
            title: "To Do".to_string(),
            color: String::new(),
            cards: vec![card(1, "work", Priority::High), card(2, "personal", Priority::Medium)],
        },
        List {
            id: 2,
            title: "In Progress".to_string(),
            color: String::new(),
            cards: vec![card(3, "work", Priority::Low), card(4, "personal", Priority::High)],
        },
        List {
            id: 3,
            title: "Done".to_string(),
            color: String::new(),
            cards: vec![card(5, "work", Priority::Medium)],
        },
    ]
}

/// The sample board, dated from today.
pub fn sample_board() -> Vec<List> {
    default_lists(Local::now().date_naive(), &mut rand::thread_rng())
}

pub fn random_due<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> NaiveDate {
    let offset = rng.gen_range(0..DUE_WINDOW_DAYS);
    today.checked_add_days(Days::new(offset)).unwrap_or(today)
}

/// A random `#RRGGBB` color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06X}", rng.gen_range(0..=0xFF_FFFFu32))
}
