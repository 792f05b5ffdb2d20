//! History survives a restart through the JSON file store.

use pretty_assertions::assert_eq;
use scicalc::history::HISTORY_LIMIT;
use scicalc::{Calculator, Event, HistoryLog, HistoryStore, JsonFileStore};
use tempfile::tempdir;

fn press(calculator: &mut Calculator, labels: &str) {
    for label in labels.split_whitespace() {
        let event = Event::from_label(label).expect("known label");
        let _ = calculator.handle(event);
    }
}

fn lines(calculator: &Calculator) -> Vec<String> {
    calculator.history().all().map(ToString::to_string).collect()
}

#[test]
fn history_is_reloaded_after_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut first = Calculator::new(HistoryLog::load(Box::new(JsonFileStore::new(&path))));
    press(&mut first, "2 + 3 =");
    press(&mut first, "5 0 % 2 0 =");
    press(&mut first, "1 0 / 0 =");
    drop(first);

    let second = Calculator::new(HistoryLog::load(Box::new(JsonFileStore::new(&path))));
    assert_eq!(
        lines(&second),
        vec!["2+3 = 5".to_string(), "50.0% of 20.0 = 10".to_string()]
    );
}

#[test]
fn file_holds_a_json_array_of_strings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut calculator = Calculator::new(HistoryLog::load(Box::new(JsonFileStore::new(&path))));
    press(&mut calculator, "4 x² =");

    let content = std::fs::read_to_string(&path).unwrap();
    let saved: Vec<String> = serde_json::from_str(&content).unwrap();
    assert_eq!(saved, vec!["16 = 16".to_string()]);
}

#[test]
fn corrupt_file_starts_empty_and_is_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "[1, 2, oops").unwrap();

    let mut calculator = Calculator::new(HistoryLog::load(Box::new(JsonFileStore::new(&path))));
    assert!(calculator.history().is_empty());

    press(&mut calculator, "7 * 6 =");
    let store = JsonFileStore::new(&path);
    assert_eq!(store.load().unwrap(), vec!["7*6 = 42".to_string()]);
}

#[test]
fn saved_history_is_capped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut calculator = Calculator::new(HistoryLog::load(Box::new(JsonFileStore::new(&path))));
    for _ in 0..(HISTORY_LIMIT + 5) {
        press(&mut calculator, "1 + 1 =");
    }

    let saved = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(saved.len(), HISTORY_LIMIT);
}

#[test]
fn unwritable_history_location_is_not_fatal() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-directory");
    std::fs::write(&blocker, "").unwrap();
    let path = blocker.join("history.json");

    let mut calculator = Calculator::new(HistoryLog::load(Box::new(JsonFileStore::new(&path))));
    press(&mut calculator, "2 * 2 =");
    assert_eq!(calculator.display(), "4");
    assert_eq!(lines(&calculator), vec!["2*2 = 4".to_string()]);
}
