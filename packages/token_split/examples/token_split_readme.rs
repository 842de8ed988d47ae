//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how to use the `token_split` module for parsing and emitting
//! delimiter-separated token strings.

fn main() {
    println!("=== Token Split README Example ===");

    let tokens = token_split::parse("alpha,\"b,c\",gamma", ',').unwrap();
    assert_eq!(tokens, vec!["alpha", "b,c", "gamma"]);

    println!("Tokens: {tokens:?}");
    println!("As token string: {}", token_split::emit(&tokens, ',').unwrap());

    println!("README example completed successfully!");
}
