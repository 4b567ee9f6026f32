mod common;

use common::{make_entry, plain_render_config};
use scantree::render::{line_to_plain_text, render_tree, tree_to_lines};

#[test]
fn test_terminal_control_chars_are_sanitized_in_rendered_output() {
    let entries = vec![
        make_entry("root", 0, true, 0),
        make_entry("evil\u{001B}[31mname\twith\ncontrols\r", 1, false, 5),
    ];

    let lines = tree_to_lines(&entries, &plain_render_config(120));
    assert_eq!(lines.len(), 2);
    let rendered = line_to_plain_text(&lines[1]);

    // No raw ESC/control chars should remain in rendered tree lines.
    assert!(!rendered.contains('\u{001B}'));
    assert!(!rendered.contains('\n'));
    assert!(!rendered.contains('\r'));
    assert!(!rendered.contains('\t'));

    // Escaped forms stay visible.
    assert!(rendered.contains("\\x1B"));
    assert!(rendered.contains("\\n"));
    assert!(rendered.contains("\\r"));
    assert!(rendered.contains("\\t"));

    let mut buf = Vec::new();
    render_tree(&mut buf, &entries, &plain_render_config(120)).unwrap();
    let console = String::from_utf8(buf).unwrap();
    assert!(!console.contains('\u{001B}'));
    assert!(!console.contains('\r'));
    assert_eq!(console.lines().count(), 2);
}
