//! Keyboard mapping
//!
//! Translates key presses into navigation actions for the screen that is
//! showing. The app turns those into quiz inputs.

use crate::quiz::options::label_for;
use crate::quiz::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move highlight up (arrow up, k)
    Up,
    /// Move highlight down (arrow down, j)
    Down,
    /// Previous action button (arrow left, h)
    Left,
    /// Next action button (arrow right, l)
    Right,
    /// Activate the highlighted option or button (Enter, Space)
    Select,
    /// Answer with the option at this display position
    Choose(usize),
    /// Skip or move on (n, Tab, arrow right)
    Skip,
    /// Open the review transcript (v)
    Review,
    /// Back to results (b, Esc, Backspace, arrow left)
    Back,
    /// Start over (r)
    Restart,
    /// Quit application (q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Convert a key event to a navigation action. `option_count` is the
/// number of options on screen. Option labels stop at 'I', so they never
/// shadow the quiz screen's command letters.
pub fn key_to_navigation(key: KeyEvent, screen: Screen, option_count: usize) -> NavigationAction {
    if let KeyCode::Char('c') = key.code {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return NavigationAction::Quit;
        }
    }

    if screen == Screen::Quiz {
        if let Some(index) = option_index(key.code, option_count) {
            return NavigationAction::Choose(index);
        }
    }

    match (screen, key.code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Char('Q')) => NavigationAction::Quit,

        (Screen::Quiz, KeyCode::Up) | (Screen::Quiz, KeyCode::Char('k')) => NavigationAction::Up,
        (Screen::Quiz, KeyCode::Down) | (Screen::Quiz, KeyCode::Char('j')) => {
            NavigationAction::Down
        }
        (Screen::Quiz, KeyCode::Enter) | (Screen::Quiz, KeyCode::Char(' ')) => {
            NavigationAction::Select
        }
        (Screen::Quiz, KeyCode::Char('n'))
        | (Screen::Quiz, KeyCode::Tab)
        | (Screen::Quiz, KeyCode::Right) => NavigationAction::Skip,

        (Screen::Results, KeyCode::Char('v')) => NavigationAction::Review,
        (Screen::Results, KeyCode::Left) | (Screen::Results, KeyCode::Char('h')) => {
            NavigationAction::Left
        }
        (Screen::Results, KeyCode::Right) | (Screen::Results, KeyCode::Char('l')) => {
            NavigationAction::Right
        }
        (Screen::Results, KeyCode::Enter) | (Screen::Results, KeyCode::Char(' ')) => {
            NavigationAction::Select
        }

        (Screen::Review, KeyCode::Char('b'))
        | (Screen::Review, KeyCode::Esc)
        | (Screen::Review, KeyCode::Backspace)
        | (Screen::Review, KeyCode::Left) => NavigationAction::Back,
        (Screen::Review, KeyCode::Up) | (Screen::Review, KeyCode::Char('k')) => {
            NavigationAction::Up
        }
        (Screen::Review, KeyCode::Down) | (Screen::Review, KeyCode::Char('j')) => {
            NavigationAction::Down
        }

        (Screen::Results, KeyCode::Char('r')) | (Screen::Review, KeyCode::Char('r')) => {
            NavigationAction::Restart
        }

        _ => NavigationAction::None,
    }
}

/// Map a letter label or a 1-9 digit to an option position
fn option_index(code: KeyCode, option_count: usize) -> Option<usize> {
    let index = match code {
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => c as usize - '1' as usize,
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            let upper = c.to_ascii_uppercase();
            (0..option_count).find(|i| label_for(*i) == Some(upper))?
        }
        _ => return None,
    };
    (index < option_count).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_option_keys_on_quiz_screen() {
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('a')), Screen::Quiz, 4),
            NavigationAction::Choose(0)
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('D')), Screen::Quiz, 4),
            NavigationAction::Choose(3)
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('2')), Screen::Quiz, 4),
            NavigationAction::Choose(1)
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('5')), Screen::Quiz, 4),
            NavigationAction::None
        );
    }

    #[test]
    fn test_command_letters_outside_label_range() {
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('n')), Screen::Quiz, 4),
            NavigationAction::Skip
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('q')), Screen::Quiz, 4),
            NavigationAction::Quit
        );
        // Commands survive the largest allowed option count
        let most = crate::models::MAX_OPTIONS;
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('i')), Screen::Quiz, most),
            NavigationAction::Choose(8)
        );
        for (c, action) in [
            ('n', NavigationAction::Skip),
            ('j', NavigationAction::Down),
            ('k', NavigationAction::Up),
            ('q', NavigationAction::Quit),
        ] {
            assert_eq!(key_to_navigation(key(KeyCode::Char(c)), Screen::Quiz, most), action);
        }
        // Even a count past the limit yields no label beyond 'I'
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('n')), Screen::Quiz, 20),
            NavigationAction::Skip
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            key_to_navigation(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Screen::Quiz,
                4
            ),
            NavigationAction::Quit
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('Q')), Screen::Review, 0),
            NavigationAction::Quit
        );
    }

    #[test]
    fn test_results_and_review_keys() {
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('v')), Screen::Results, 0),
            NavigationAction::Review
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('r')), Screen::Results, 0),
            NavigationAction::Restart
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Right), Screen::Results, 0),
            NavigationAction::Right
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Enter), Screen::Results, 0),
            NavigationAction::Select
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Esc), Screen::Review, 0),
            NavigationAction::Back
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('r')), Screen::Review, 0),
            NavigationAction::Restart
        );
        // Letters are not option keys off the quiz screen
        assert_eq!(
            key_to_navigation(key(KeyCode::Char('a')), Screen::Results, 4),
            NavigationAction::None
        );
    }

    #[test]
    fn test_navigation_keys_on_quiz_screen() {
        assert_eq!(key_to_navigation(key(KeyCode::Up), Screen::Quiz, 4), NavigationAction::Up);
        assert_eq!(
            key_to_navigation(key(KeyCode::Down), Screen::Quiz, 4),
            NavigationAction::Down
        );
        assert_eq!(
            key_to_navigation(key(KeyCode::Enter), Screen::Quiz, 4),
            NavigationAction::Select
        );
        assert_eq!(key_to_navigation(key(KeyCode::Tab), Screen::Quiz, 4), NavigationAction::Skip);
    }
}
