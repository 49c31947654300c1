use set_plays::commands::run_sort;
use set_plays::PlaysError;
use std::fs;
use std::path::Path;

#[test]
fn run_sort_prints_list_in_play_order() {
    let path = std::env::temp_dir().join(format!("set-plays-sort-{}.md", std::process::id()));
    fs::write(
        &path,
        "# All sets\n\n\
         * [Low](https://example.test/low) _//_ 12🎧\n\
         * Faixa Azul (June 2023) _// NOT PUBLISHED YET_\n\
         * [High](https://example.test/high) _//_ 2.5k🎧\n\
         * [High again](https://example.test/high) _//_ 9.9M🎧\n\
         \n\
         Total plays: **2.5k🎧**\n",
    )
    .unwrap();

    let mut out = Vec::new();
    run_sort(&path, &mut out).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "* [High](https://example.test/high) _//_ 2.5k🎧\n\
         * [Low](https://example.test/low) _//_ 12🎧\n\
         * Faixa Azul (June 2023) _// NOT PUBLISHED YET_\n"
    );
}

#[test]
fn run_sort_on_unreadable_list_is_fatal() {
    let mut out = Vec::new();

    let err = run_sort(Path::new("/nonexistent/all-sets.md"), &mut out).unwrap_err();

    assert!(matches!(err, PlaysError::Io(_)));
    assert!(out.is_empty());
}
