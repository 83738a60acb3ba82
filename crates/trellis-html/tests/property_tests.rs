//! Property tests for the renderer over generated trees.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use trellis_dom::ElementNode;
use trellis_html::{INDENT_WIDTH, render, render_to_string};

const VOID_TAGS: &[&str] = &["br", "hr", "meta"];
const TAGS: &[&str] = &["div", "span", "p", "ul", "li"];
const TEXT_CHARS: &[char] = &['a', 'z', '&', '<', '>', 'é', '"'];
const MAX_DEPTH: usize = 4;

/// A randomly shaped element tree.
#[derive(Debug, Clone)]
struct Tree(ElementNode);

impl Arbitrary for Tree {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_node(g, 0))
    }
}

fn pick<T: Copy>(g: &mut Gen, items: &[T]) -> T {
    *g.choose(items).unwrap()
}

fn arbitrary_text(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 8 + 1;
    (0..len).map(|_| pick(g, TEXT_CHARS)).collect()
}

fn arbitrary_node(g: &mut Gen, depth: usize) -> ElementNode {
    let mut node = match u8::arbitrary(g) % 4 {
        0 => ElementNode::void(pick(g, VOID_TAGS)),
        1 => ElementNode::element(pick(g, TAGS)).with_text(arbitrary_text(g)),
        _ if depth >= MAX_DEPTH => ElementNode::element(pick(g, TAGS)),
        _ => {
            let count = usize::arbitrary(g) % 4;
            ElementNode::element(pick(g, TAGS))
                .with_children((0..count).map(|_| arbitrary_node(g, depth + 1)).collect::<Vec<_>>())
        }
    };
    for i in 0..u8::arbitrary(g) % 3 {
        node = node.with_attr(format!("data-{i}"), u32::arbitrary(g));
    }
    node
}

/// Expected indentation of every output line, from the tree's structure.
fn expected_indents(node: &ElementNode, depth: usize, out: &mut Vec<usize>) {
    out.push(depth * INDENT_WIDTH);
    if node.is_void() {
        return;
    }
    if node.has_text() {
        out.push((depth + 1) * INDENT_WIDTH);
    } else {
        for child in node.children().unwrap_or_default() {
            expected_indents(child, depth + 1, out);
        }
    }
    out.push(depth * INDENT_WIDTH);
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

#[quickcheck]
fn prop_render_is_idempotent(tree: Tree) -> bool {
    render_to_string(&tree.0) == render_to_string(&tree.0)
}

#[quickcheck]
fn prop_indent_matches_depth(tree: Tree) -> bool {
    let mut expected = Vec::new();
    expected_indents(&tree.0, 0, &mut expected);

    let out = render_to_string(&tree.0);
    let actual: Vec<usize> = out.lines().map(leading_spaces).collect();
    out.ends_with('\n') && actual == expected
}

#[quickcheck]
fn prop_void_elements_have_no_end_tag(tree: Tree) -> bool {
    let out = render_to_string(&tree.0);
    let void_nodes = tree.0.traverse().filter(|n| n.is_void()).count();
    let void_lines = out
        .lines()
        .filter(|line| VOID_TAGS.iter().any(|tag| line.trim_start().starts_with(&format!("<{tag}"))))
        .count();

    void_lines == void_nodes && VOID_TAGS.iter().all(|tag| !out.contains(&format!("</{tag}>")))
}

#[quickcheck]
fn prop_text_lines_are_escaped(tree: Tree) -> bool {
    render_to_string(&tree.0)
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.starts_with('<'))
        .all(|line| {
            !line.contains('<')
                && !line.contains('>')
                && line.match_indices('&').all(|(i, _)| {
                    let rest = &line[i..];
                    rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;")
                })
        })
}

#[quickcheck]
fn prop_resume_after_any_prefix(tree: Tree, split: usize) -> bool {
    let full = render_to_string(&tree.0);
    let split = split % (full.chars().count() + 1);

    let mut chars = render(&tree.0, 0);
    let mut resumed: String = chars.by_ref().take(split).collect();
    resumed.extend(chars);
    resumed == full
}
