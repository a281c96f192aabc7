//! Markup serialization.
//!
//! Attribute values and text are escaped here; the parser owns decoding.
//! Together the two sides keep marker payloads byte-identical across a
//! serialize → parse round trip.

use crate::dom::parser::{is_raw_text_tag, is_void_tag};
use crate::dom::{Dom, NodeId, NodeType};

impl Dom {
    pub fn to_html(&self) -> String {
        self.dump_node(self.root())
    }

    fn dump_node(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.dump_node(*child));
                }
                out
            }
            NodeType::Text(text) => escape_text(text),
            NodeType::Comment(text) => format!("<!--{text}-->"),
            NodeType::Declaration(text) => format!("<!{text}>"),
            NodeType::Element(element) => {
                let mut out = String::new();
                out.push('<');
                out.push_str(&element.tag_name);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');

                if is_void_tag(&element.tag_name) {
                    return out;
                }

                for child in &self.nodes[node_id.0].children {
                    if is_raw_text_tag(&element.tag_name) {
                        if let NodeType::Text(text) = &self.nodes[child.0].node_type {
                            out.push_str(text);
                        }
                    } else {
                        out.push_str(&self.dump_node(*child));
                    }
                }

                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
                out
            }
        }
    }
}

fn escape_text(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for ch in src.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for ch in src.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
