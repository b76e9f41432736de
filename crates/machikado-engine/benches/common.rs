// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_shop_body(sections: usize) -> String {
    let mut content = String::from("# 喫茶ひとつ\n\n");

    for section in 0..sections {
        content.push_str(&format!("## メニュー {section}\n\n"));
        content.push_str(
            "Paragraph with **strong**, *emphasis* and a [link](https://example.jp/menu).\n\n",
        );
        content.push_str("- ブレンド 500円\n  - おかわり 300円\n- [予約](tel:03-1234-5678)\n\n");
        content.push_str("| 曜日 | 営業 |\n|:--|--:|\n| 月 | 休み |\n\n");
        content.push_str("```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n");
        content.push_str(&format!("{{{{maps:東京都渋谷区道玄坂{section}-1}}}}\n\n"));
        content.push_str("<!-- {{maps:commented out}} -->\n\n");
    }

    content
}
