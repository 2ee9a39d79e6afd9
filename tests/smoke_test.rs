use balance_core::{
    grammar::{Command, CommandGrammar},
    init,
    ledger::{Ledger, MoneyAmount},
    storage::MemoryStore,
};
use chrono::NaiveDate;

#[test]
fn ledger_smoke() {
    init();

    let store = MemoryStore::new();
    let mut ledger = Ledger::new(Box::new(store.clone()));
    ledger.load().expect("load empty store");

    let grammar = CommandGrammar::new();
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for line in ["made 0.10", "made 0.20", "spent 0.30 #change"] {
        match grammar.classify(line, today).expect("classify") {
            Command::Add(request) => {
                ledger.add(request);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    assert_eq!(ledger.total(), MoneyAmount::default());
    assert_eq!(ledger.total().to_string(), "0.00");
    assert_eq!(ledger.save().expect("save"), 3);
    assert_eq!(
        store.contents().as_deref(),
        Some("0.10 on 2025-01-01\n0.20 on 2025-01-01\n-0.30 on 2025-01-01 #change\n")
    );
}
