use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use indoc::indoc;
use predicates::prelude::*;

fn main_binary() -> Command {
    let mut cmd = Command::cargo_bin("listkit").unwrap();
    cmd.args(["--color", "never"]);
    cmd
}

fn path_with(temp: &TempDir, name: &str, contents: &str) -> String {
    let f = temp.child(name);
    f.write_str(contents).unwrap();
    f.path().to_str().unwrap().to_string()
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn requires_subcommand() {
    Command::cargo_bin("listkit").unwrap().assert().failure();
}

#[test]
fn fail_on_missing_file() {
    main_binary()
        .args(["clean", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Can't read file: no-such-file.txt"));
}

#[test]
fn diff_shows_all_four_views() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.txt", "apple, banana\ncherry,,banana");
    let b = path_with(&temp, "b.txt", "cherry\ndate\napple\n");
    let out = stdout_of(main_binary().args(["diff", &a, &b]));
    assert_eq!(
        out,
        indoc! {"
            List A: 4 items
            List B: 3 items

            Only in A (but not in B) (1 item)
            banana

            Only in B (but not in A) (1 item)
            date

            A ∩ B (A AND B) (2 items)
            apple
            cherry

            A ∪ B (A OR B) (4 items)
            apple
            banana
            cherry
            date
        "}
    );
}

#[test]
fn diff_reads_standard_input() {
    let temp = TempDir::new().unwrap();
    let b = path_with(&temp, "b.txt", "x");
    main_binary()
        .args(["diff", "-", &b])
        .write_stdin("x,y")
        .assert()
        .success()
        .stdout(predicate::str::contains("Only in A (but not in B) (1 item)\ny\n"));
}

#[test]
fn clean_removes_duplicates_and_marks_them() {
    let temp = TempDir::new().unwrap();
    let list = path_with(&temp, "list.txt", "b,a,b\nc,a");
    let out = stdout_of(main_binary().args(["clean", &list, "--mark"]));
    assert_eq!(
        out,
        indoc! {"
            Duplicates found: b, a

            Marked input (duplicates highlighted):
            b  (duplicate group 1)
            a  (duplicate group 2)
            b  (duplicate group 1)
            c
            a  (duplicate group 2)

            Output list:
            b
            a
            c
        "}
    );
}

#[test]
fn repeated_sort_flag_alternates_direction() {
    let temp = TempDir::new().unwrap();
    let list = path_with(&temp, "list.txt", "banana,Apple,cherry,apple");
    let once = stdout_of(main_binary().args(["clean", &list, "-s"]));
    assert!(once.ends_with("Output list:\napple\nApple\nbanana\ncherry\n"), "{once}");
    let twice = stdout_of(main_binary().args(["clean", &list, "-ss"]));
    assert!(twice.ends_with("Output list:\ncherry\nbanana\nApple\napple\n"), "{twice}");
}

#[test]
fn clean_without_duplicates_says_nothing_about_them() {
    let temp = TempDir::new().unwrap();
    let list = path_with(&temp, "list.txt", "x\ny\n");
    let out = stdout_of(main_binary().args(["clean", &list]));
    assert_eq!(out, "Output list:\nx\ny\n");
}

#[test]
fn filter_by_kind() {
    let temp = TempDir::new().unwrap();
    let list = path_with(&temp, "list.txt", "Alpha,beta,alphabet,gamma,ALPHA");
    let out = stdout_of(main_binary().args(["filter", &list, "-k", "exact", "-x", "alpha"]));
    assert_eq!(
        out,
        indoc! {"
            Total items: 5
            Matched: 2
            Filtered result: 2

            Filtered list:
            Alpha
            ALPHA
        "}
    );

    let out = stdout_of(main_binary().args(["filter", &list, "-k", "startsWith", "-x", "alpha", "-c", "-i"]));
    assert!(out.contains("Excluded: 1\n"), "{out}");
    assert!(out.ends_with("Filtered list:\nAlpha\nbeta\ngamma\nALPHA\n"), "{out}");

    let out = stdout_of(main_binary().args(["filter", &list, "-k", "length-less", "-x", "5"]));
    assert!(out.ends_with("Filtered list:\nbeta\n"), "{out}");
}

#[test]
fn filter_by_regex() {
    let temp = TempDir::new().unwrap();
    let list = path_with(&temp, "list.txt", "a1\nb22\nc\n");
    let out = stdout_of(main_binary().args(["filter", &list, "--kind", "regex", "--value", r"\d+$"]));
    assert!(out.ends_with("Filtered list:\na1\nb22\n"), "{out}");
}

#[test]
fn bad_filter_values_exit_with_failure() {
    let temp = TempDir::new().unwrap();
    let list = path_with(&temp, "list.txt", "a,b");
    main_binary()
        .args(["filter", &list, "-k", "regex", "-x", "(unclosed"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Filtered list:").not())
        .stderr("Invalid regex pattern\n");
    main_binary()
        .args(["filter", &list, "-k", "length-equals", "-x", "abc"])
        .assert()
        .failure()
        .stderr("Invalid length value\n");
}

const DOC: &str = r#"{"name":"Ada","tags":["math","code"],"born":{"year":1815}}"#;

#[test]
fn json_shows_root_expanded() {
    let temp = TempDir::new().unwrap();
    let doc = path_with(&temp, "doc.json", DOC);
    let out = stdout_of(main_binary().args(["json", &doc]));
    assert_eq!(
        out,
        indoc! {r#"
            ▼ root: {3 keys}
              name: "Ada"
              ▶ tags: [2 items]
              ▶ born: {1 keys}
        "#}
    );
}

#[test]
fn json_expand_all_and_toggle() {
    let temp = TempDir::new().unwrap();
    let doc = path_with(&temp, "doc.json", DOC);
    let out = stdout_of(main_binary().args(["json", &doc, "--expand-all", "-t", "root.tags", "-p"]));
    assert_eq!(
        out,
        indoc! {r#"
            ▼ root: {3 keys}  root
              name: "Ada"  root.name
              ▶ tags: [2 items]  root.tags
              ▼ born: {1 keys}  root.born
                year: 1815  root.born.year
        "#}
    );
}

#[test]
fn json_search_prunes_the_tree() {
    let temp = TempDir::new().unwrap();
    let doc = path_with(&temp, "doc.json", DOC);
    let out = stdout_of(main_binary().args(["json", &doc, "-e", "-s", "CODE"]));
    assert_eq!(
        out,
        indoc! {r#"
            ▼ root: {3 keys}
              ▼ tags: [2 items]
                1: "code"
        "#}
    );
    let out = stdout_of(main_binary().args(["json", &doc, "-s", "nowhere"]));
    assert_eq!(out, "");
}

#[test]
fn json_beautify() {
    main_binary()
        .args(["json", "-", "--beautify"])
        .write_stdin(r#"{"b":[1,2],"a":null}"#)
        .assert()
        .success()
        .stdout("{\n  \"b\": [\n    1,\n    2\n  ],\n  \"a\": null\n}\n");
}

#[test]
fn invalid_json_exits_with_failure() {
    main_binary()
        .args(["json", "-"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::starts_with("Invalid JSON: "));
}
