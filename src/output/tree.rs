use crate::crawler::NodeSet;
use crate::mirror::MirrorWriter;

/// Renders the node set as an indented listing
///
/// Each node is indented by its depth below the tree root and followed by the
/// directory its resources would be written to.
pub fn format_tree(nodes: &NodeSet, writer: &MirrorWriter) -> String {
    let mut out = String::new();
    for node in nodes {
        let depth = node.ancestor_path.len().saturating_sub(1);
        let label = if node.label.is_empty() {
            "(no label)"
        } else {
            node.label.as_str()
        };
        out.push_str(&format!(
            "{}- {}  [{}]\n{}  -> {}\n",
            "  ".repeat(depth),
            label,
            node.url,
            "  ".repeat(depth),
            writer.node_dir(node).display()
        ));
    }
    out
}

/// Prints the node set to stdout
pub fn print_tree(nodes: &NodeSet, writer: &MirrorWriter) {
    println!("Tree nodes ({}):", nodes.len());
    print!("{}", format_tree(nodes, writer));
}
