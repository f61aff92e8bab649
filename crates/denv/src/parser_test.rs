// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_parse_basic_assignments() {
    let vars = parse_config("FOO=bar\nBAZ=qux\n").expect("Should parse");

    assert_eq!(vars.len(), 2);
    assert_eq!(vars["FOO"], "bar");
    assert_eq!(vars["BAZ"], "qux");
}

#[rstest]
fn test_skips_comments_and_blank_lines() {
    let vars = parse_config(
        r#"
# leading comment

FOO=1
   # indented comment
"#,
    )
    .expect("Should parse");

    assert_eq!(vars.len(), 1);
    assert_eq!(vars["FOO"], "1");
}

#[rstest]
fn test_export_prefix_stripped() {
    let vars = parse_config("export FOO=bar\n").expect("Should parse");

    assert_eq!(vars["FOO"], "bar");
    assert!(!vars.contains_key("export FOO"));
}

#[rstest]
#[case("VAR=\"a b\"", "a b")]
#[case("VAR='a b'", "a b")]
#[case("VAR=a b", "a b")]
#[case("VAR=\"'nested'\"", "'nested'")]
#[case("VAR='unterminated", "'unterminated")]
#[case("VAR=\"mismatched'", "\"mismatched'")]
#[case("VAR=", "")]
fn test_value_quoting(#[case] line: &str, #[case] expected: &str) {
    let vars = parse_config(line).expect("Should parse");

    assert_eq!(vars["VAR"], expected);
}

#[rstest]
fn test_invalid_names_silently_skipped() {
    let vars = parse_config("1BAD=x\nBAD-NAME=y\n=z\nnot a line\nGOOD=1\n")
        .expect("Should parse");

    assert_eq!(vars.len(), 1);
    assert_eq!(vars["GOOD"], "1");
}

#[rstest]
fn test_last_write_wins_within_file() {
    let vars = parse_config("VAR=first\nVAR=second\n").expect("Should parse");

    assert_eq!(vars["VAR"], "second");
}

#[rstest]
fn test_dangerous_names_always_dropped() {
    let vars = parse_config("PATH=/evil\nLD_PRELOAD=/evil.so\nSAFE=1\n")
        .expect("Should parse");

    assert_eq!(vars.len(), 1);
    assert!(!vars.contains_key("PATH"));
    assert!(!vars.contains_key("LD_PRELOAD"));
    assert_eq!(vars["SAFE"], "1");
}

#[rstest]
fn test_interpolation_resolves_chains() {
    let vars = parse_config("A=${B}/bin\nB=${C}\nC=/opt\n").expect("Should parse");

    assert_eq!(vars["A"], "/opt/bin");
    assert_eq!(vars["B"], "/opt");
    assert_eq!(vars["C"], "/opt");
}

#[rstest]
fn test_unknown_references_left_verbatim() {
    let vars = parse_config("X=a${UNDEFINED}b\n").expect("Should parse");

    assert_eq!(vars["X"], "a${UNDEFINED}b");
}

#[rstest]
fn test_self_reference_is_a_cycle() {
    let result = parse_config("VAR=${VAR}\n");

    match result {
        Err(crate::Error::CyclicReference { chain }) => {
            assert_eq!(chain, "VAR -> VAR");
        }
        other => panic!("Expected CyclicReference, got: {:?}", other),
    }
}

#[rstest]
fn test_mutual_reference_is_a_cycle() {
    let result = parse_config("A=${B}\nB=${A}\n");

    match result {
        Err(crate::Error::CyclicReference { chain }) => {
            // Names resolve in sorted order, so A is attempted first.
            assert_eq!(chain, "A -> B -> A");
        }
        other => panic!("Expected CyclicReference, got: {:?}", other),
    }
}

#[rstest]
fn test_chain_at_depth_limit_resolves() {
    let mut content = String::new();
    for i in 1..=9 {
        content.push_str(&format!("L{:02}=${{L{:02}}}\n", i, i + 1));
    }
    content.push_str("L10=end\n");

    let vars = parse_config(&content).expect("Should parse");

    assert_eq!(vars["L01"], "end");
}

#[rstest]
fn test_chain_beyond_depth_limit_rejected() {
    let mut content = String::new();
    for i in 1..=10 {
        content.push_str(&format!("L{:02}=${{L{:02}}}\n", i, i + 1));
    }
    content.push_str("L11=end\n");

    let result = parse_config(&content);

    assert!(matches!(
        result,
        Err(crate::Error::InterpolationTooDeep { .. })
    ));
}

#[rstest]
fn test_parsing_is_deterministic() {
    let content = "A=${B}\nB=base\nC=${UNDEFINED}\nD='quoted value'\n";

    let first = parse_config(content).expect("Should parse");
    let second = parse_config(content).expect("Should parse");

    assert_eq!(first, second);
}
