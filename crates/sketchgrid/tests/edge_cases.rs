//! Edge cases: malformed input, cycles, self references and wide text

use sketchgrid::prelude::*;
use sketchgrid::{parse_flowchart, parse_sequence, render};

fn lines(art: &str) -> Vec<&str> {
    art.lines().collect()
}

#[test]
fn test_single_node() {
    let art = render("graph LR\nA", false).unwrap();
    assert_eq!(art, "┌───┐\n│   │\n│ A │\n│   │\n└───┘");
}

#[test]
fn test_self_edge_draws_only_the_box() {
    let art = render("graph LR; A-->A", false).unwrap();
    assert_eq!(art, render("graph LR\nA", false).unwrap());
    assert_eq!(parse_flowchart("graph LR; A-->A").unwrap().edge_count(), 1);
}

#[test]
fn test_cycle_terminates_and_keeps_every_node() {
    let art = render("graph TD\nA-->B\nB-->C\nC-->A", false).unwrap();
    for id in ["A", "B", "C"] {
        assert!(art.contains(&format!("│ {} │", id)), "missing {}", id);
    }
}

#[test]
fn test_back_edges_never_erase_labels() {
    let inputs = [
        "graph LR\nA-->B\nB-->C\nC-->A",
        "graph LR\nA[Start]-->B[Middle]-->C[End]\nA-->C",
        "graph RL\nA-->B\nB-->C\nC-->A",
    ];
    for input in inputs {
        let db = parse_flowchart(input).unwrap();
        let art = render(input, false).unwrap();
        for node in db.nodes() {
            assert!(
                art.contains(&format!(" {} ", node.label)),
                "label {} lost in {:?}:\n{}",
                node.label,
                input,
                art
            );
        }
    }
}

#[test]
fn test_semicolons_in_labels_survive_rendering() {
    let art = render("graph LR\nA[x; y] -->|yes; really| B", false).unwrap();
    assert!(art.contains("x; y"));
    assert!(art.contains("yes; really"));
}

#[test]
fn test_right_left_arrows_point_left() {
    let art = render("graph RL; A-->B", false).unwrap();
    assert!(art.contains("│ B │◄─────┤ A │"));
}

#[test]
fn test_bottom_up_lays_out_like_top_down() {
    assert_eq!(
        render("graph BT; A-->B", false).unwrap(),
        render("graph TD; A-->B", false).unwrap()
    );
}

#[test]
fn test_comment_lines_are_ignored() {
    assert_eq!(
        render("graph LR\n%% a comment --> here\nA-->B", false).unwrap(),
        render("graph LR\nA-->B", false).unwrap()
    );
}

#[test]
fn test_stray_connector_is_skipped() {
    assert_eq!(
        render("graph LR\nA-->B\n-->\n", false).unwrap(),
        render("graph LR\nA-->B", false).unwrap()
    );
}

#[test]
fn test_connector_text_inside_label() {
    let db = parse_flowchart("graph LR; A[a-->b]-->B").unwrap();
    assert_eq!(db.node_count(), 2);
    assert_eq!(db.edge_count(), 1);
    assert_eq!(db.get_node("A").unwrap().label, "a-->b");
}

#[test]
fn test_wide_characters_keep_boxes_aligned() {
    let art = render("graph LR; A[日本]-->B", false).unwrap();
    let rows = lines(&art);
    assert_eq!(rows[0], "┌──────┐      ┌───┐");
    assert_eq!(rows[2], "│ 日本 ├─────►│ B │");
}

#[test]
fn test_redeclared_label_wins() {
    let db = parse_flowchart("graph LR\nA-->B\nA[First]\nA[Second]").unwrap();
    assert_eq!(db.get_node("A").unwrap().label, "Second");
    assert_eq!(db.node_count(), 2);
}

#[test]
fn test_header_only_renders_nothing() {
    assert_eq!(render("graph TD", false).unwrap(), "");
    assert_eq!(render("sequenceDiagram", false).unwrap(), "");
}

#[test]
fn test_sequence_unknown_lines_are_skipped() {
    let db = parse_sequence("sequenceDiagram\nnote over A: hi\nloop Every minute\nA->>B: x\nend")
        .unwrap();
    assert_eq!(db.node_count(), 2);
    assert_eq!(db.edge_count(), 1);
}

#[test]
fn test_sequence_alias_is_keyed_by_id() {
    let art = render("sequenceDiagram\nparticipant A as Alice\nA->>B: hi", false).unwrap();
    let header = lines(&art)[1];
    assert!(header.contains("Alice"));
    assert!(!header.contains(" A "));
    assert_eq!(parse_sequence("sequenceDiagram\nparticipant A as Alice\nA->>B: hi")
        .unwrap()
        .participant_count(), 2);
}

#[test]
fn test_sequence_self_message_is_quiet() {
    let art = render("sequenceDiagram\nA->>A: think\nA->>B: say", false).unwrap();
    assert!(!art.contains("think"));
    assert!(art.contains("say"));
    assert_eq!(art.matches('►').count(), 1);
}

#[test]
fn test_sequence_long_message_widens_columns() {
    let text = "this message is longer than the default gap";
    let art = render(&format!("sequenceDiagram\nA->>B: {}", text), false).unwrap();
    assert!(art.contains(text));
}
