// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use specdown_engine::MemoryStore;

#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "Paragraph with some content.\n\n- Bullet point\n  - Nested item\n    ```rust\n    fn example() {}\n    ```\n- Another item\n\n\n    indented code\n\n";
    base.repeat(size)
}

/// A list nested `depth` levels deep, each item carrying a fenced block.
#[allow(dead_code)]
pub fn generate_nested_list(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        let indent = "  ".repeat(level);
        content.push_str(&format!("{indent}- Level {level}\n"));
        content.push_str(&format!("{indent}  ```\n{indent}  code {level}\n{indent}  ```\n"));
    }
    content
}

/// A store whose root includes `fanout` chapters, each including a shared
/// code listing by marker range.
#[allow(dead_code)]
pub fn generate_include_store(fanout: usize) -> MemoryStore {
    let mut store = MemoryStore::new();
    let mut root = String::new();
    for i in 0..fanout {
        root.push_str(&format!("{{{{chapters/{i}.md}}}}\n\n"));
        store
            .insert(
                &format!("chapters/{i}.md"),
                format!("Chapter {i}.\n\n1. Step\n   <{{{{../code/listing.go}}}}[/START/,/END/]\n"),
            )
            .unwrap();
    }
    store.insert("root.md", root).unwrap();
    store
        .insert(
            "code/listing.go",
            "package main\n// START\nfunc main() {}\n// END\n",
        )
        .unwrap();
    store
}
