//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how observable containers pair every mutation with exactly one
//! change notification.

use observable_collections::{ChangeRecord, ObservableDictionary, ObservableList};

fn main() {
    println!("=== Observable Collections README Example ===");

    let list = ObservableList::new();

    let _subscription = list.subscribe(|record| {
        println!("list changed: {record:?}");
    });

    list.add("x");
    assert_eq!(list.len(), 1);

    let dictionary = ObservableDictionary::new();

    dictionary.add("a", 1).unwrap();
    dictionary.add("b", 2).unwrap();
    dictionary.remove(&"a");

    assert_eq!(
        dictionary.last_change(),
        Some(ChangeRecord::Removed { old_item: ("a", 1) })
    );
    assert_eq!(dictionary.to_vec(), vec![("b", 2)]);

    println!("README example completed successfully!");
}
