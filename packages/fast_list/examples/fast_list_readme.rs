//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how to use `FastList` for positional edits, sorting and search.

use fast_list::FastList;

fn main() {
    println!("=== FastList README Example ===");

    let mut list = FastList::new();

    list.push(5);
    list.push(3);
    list.push(1);
    list.push(4);

    println!("Unsorted: {list:?}");

    list.sort();
    assert_eq!(list.as_slice(), &[1, 3, 4, 5]);
    assert_eq!(list.binary_search(&4), Ok(2));

    println!("Sorted: {list:?}");

    list.insert(0, 0);
    assert_eq!(list.remove_at(0), 0);

    println!("README example completed successfully!");
}
