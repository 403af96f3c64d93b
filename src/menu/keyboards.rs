//! Reply keyboards for every menu.

use crate::catalog::{
    BACK, BlogAnswer, CASE_NEXT, CaseItem, FaqQuestion, GoalAnswer, MainOption, MenuOption, PAID,
    Video,
};
use crate::channels::Keyboard;

pub fn main_menu() -> Keyboard {
    use MainOption::*;
    Keyboard::new([
        [Videos.label(), Faq.label()],
        [Qualifier.label(), Cases.label()],
        [Pay.label(), Support.label()],
    ])
}

/// One option per row, then "back".
fn column<T: MenuOption>() -> Keyboard {
    let mut rows: Vec<Vec<&'static str>> = T::ALL.iter().map(|o| vec![o.label()]).collect();
    rows.push(vec![BACK]);
    Keyboard::new(rows)
}

pub fn videos_menu() -> Keyboard {
    column::<Video>()
}

pub fn faq_menu() -> Keyboard {
    use FaqQuestion::*;
    Keyboard::new(vec![
        vec![Budget.label(), Trust.label()],
        vec![Guarantees.label(), Fit.label()],
        vec![Earnings.label()],
        vec![BACK],
    ])
}

pub fn qualifier_blog() -> Keyboard {
    Keyboard::new(vec![
        vec![BlogAnswer::HasBlog.label(), BlogAnswer::StartingOut.label()],
        vec![BACK],
    ])
}

pub fn qualifier_goal() -> Keyboard {
    column::<GoalAnswer>()
}

pub fn cases_menu() -> Keyboard {
    column::<CaseItem>()
}

/// Shown while a case narrative is playing.
pub fn case_playback() -> Keyboard {
    Keyboard::new([[CASE_NEXT], [BACK]])
}

/// Shown after the pay link.
pub fn after_pay() -> Keyboard {
    Keyboard::new([[PAID], [BACK]])
}
