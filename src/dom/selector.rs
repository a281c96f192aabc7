//! Selector subset: `*`, tag, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! `[attr~=value]`, descendant and child combinators, comma-separated
//! groups. Anything else is an `UnsupportedSelector` error; callers
//! resolving deferred targets treat that as zero matches.

use crate::dom::{Dom, Element, NodeId};
use crate::errors::DomError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists { name: String },
    Equals { name: String, value: String },
    Includes { name: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SelectorStep {
    universal: bool,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorPart {
    /// Combinator joining this part to the previous one; `None` on the
    /// first part of a chain.
    combinator: Option<Combinator>,
    step: SelectorStep,
}

/// Parsed selector: one or more chains joined by commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Vec<SelectorPart>>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomError::UnsupportedSelector("empty selector".into()));
        }

        let mut groups = Vec::new();
        for group in split_groups(trimmed)? {
            groups.push(parse_chain(group.trim())?);
        }
        Ok(Self { groups })
    }
}

fn split_groups(input: &str) -> Result<Vec<&str>, DomError> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;

    for (i, ch) in input.char_indices() {
        match ch {
            '"' | '\'' => {
                if quote == Some(ch) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(ch);
                }
            }
            '[' if quote.is_none() => depth += 1,
            ']' if quote.is_none() => depth = depth.saturating_sub(1),
            ',' if quote.is_none() && depth == 0 => {
                groups.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    groups.push(&input[start..]);

    if groups.iter().any(|group| group.trim().is_empty()) {
        return Err(DomError::UnsupportedSelector(format!(
            "empty selector group in '{input}'"
        )));
    }
    Ok(groups)
}

fn parse_chain(group: &str) -> Result<Vec<SelectorPart>, DomError> {
    let bytes = group.as_bytes();
    let mut parts = Vec::new();
    let mut pending: Option<Combinator> = None;
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            if pending.is_none() && !parts.is_empty() {
                pending = Some(Combinator::Descendant);
            }
            i += 1;
            continue;
        }

        if bytes[i] == b'>' {
            if parts.is_empty() {
                return Err(DomError::UnsupportedSelector(format!(
                    "leading combinator in '{group}'"
                )));
            }
            pending = Some(Combinator::Child);
            i += 1;
            continue;
        }

        let (step, next) = parse_step(group, i)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        parts.push(SelectorPart { combinator, step });
        i = next;
    }

    if pending.is_some() {
        return Err(DomError::UnsupportedSelector(format!(
            "dangling combinator in '{group}'"
        )));
    }
    if parts.is_empty() {
        return Err(DomError::UnsupportedSelector(format!(
            "empty selector '{group}'"
        )));
    }
    Ok(parts)
}

fn parse_step(group: &str, start: usize) -> Result<(SelectorStep, usize), DomError> {
    let bytes = group.as_bytes();
    let mut step = SelectorStep::default();
    let mut i = start;
    let mut matched_any = false;

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let (ident, next) = parse_ident(group, i + 1)?;
                step.id = Some(ident);
                i = next;
            }
            b'.' => {
                let (ident, next) = parse_ident(group, i + 1)?;
                step.classes.push(ident);
                i = next;
            }
            b'[' => {
                let (condition, next) = parse_attr_condition(group, i + 1)?;
                step.attrs.push(condition);
                i = next;
            }
            b if b.is_ascii_whitespace() || b == b'>' => break,
            b if is_ident_char(b) => {
                let (ident, next) = parse_ident(group, i)?;
                step.tag = Some(ident.to_ascii_lowercase());
                i = next;
            }
            other => {
                return Err(DomError::UnsupportedSelector(format!(
                    "unsupported token '{}' in '{group}'",
                    other as char
                )));
            }
        }
        matched_any = true;
    }

    if !matched_any {
        return Err(DomError::UnsupportedSelector(format!(
            "empty compound selector in '{group}'"
        )));
    }
    Ok((step, i))
}

fn parse_ident(group: &str, start: usize) -> Result<(String, usize), DomError> {
    let bytes = group.as_bytes();
    let mut i = start;
    while i < bytes.len() && is_ident_char(bytes[i]) {
        i += 1;
    }
    if i == start {
        return Err(DomError::UnsupportedSelector(format!(
            "missing identifier in '{group}'"
        )));
    }
    Ok((group[start..i].to_string(), i))
}

fn parse_attr_condition(group: &str, start: usize) -> Result<(AttrCondition, usize), DomError> {
    let bytes = group.as_bytes();
    let mut i = start;

    skip_ws(bytes, &mut i);
    let (name, next) = parse_attr_name(group, i)?;
    i = next;
    skip_ws(bytes, &mut i);

    match bytes.get(i) {
        Some(b']') => Ok((AttrCondition::Exists { name }, i + 1)),
        Some(b'=') => {
            i += 1;
            let (value, next) = parse_attr_value(group, i)?;
            i = next;
            expect_close(group, bytes, &mut i)?;
            Ok((AttrCondition::Equals { name, value }, i))
        }
        Some(b'~') if bytes.get(i + 1) == Some(&b'=') => {
            i += 2;
            let (value, next) = parse_attr_value(group, i)?;
            i = next;
            expect_close(group, bytes, &mut i)?;
            Ok((AttrCondition::Includes { name, value }, i))
        }
        _ => Err(DomError::UnsupportedSelector(format!(
            "malformed attribute condition in '{group}'"
        ))),
    }
}

fn expect_close(group: &str, bytes: &[u8], i: &mut usize) -> Result<(), DomError> {
    skip_ws(bytes, i);
    if bytes.get(*i) == Some(&b']') {
        *i += 1;
        Ok(())
    } else {
        Err(DomError::UnsupportedSelector(format!(
            "unclosed attribute condition in '{group}'"
        )))
    }
}

fn parse_attr_name(group: &str, start: usize) -> Result<(String, usize), DomError> {
    let bytes = group.as_bytes();
    let mut i = start;
    while i < bytes.len() && (is_ident_char(bytes[i]) || bytes[i] == b':') {
        i += 1;
    }
    if i == start {
        return Err(DomError::UnsupportedSelector(format!(
            "missing attribute name in '{group}'"
        )));
    }
    Ok((group[start..i].to_ascii_lowercase(), i))
}

fn parse_attr_value(group: &str, start: usize) -> Result<(String, usize), DomError> {
    let bytes = group.as_bytes();
    let mut i = start;
    skip_ws(bytes, &mut i);

    if matches!(bytes.get(i), Some(b'"') | Some(b'\'')) {
        let quote = bytes[i];
        i += 1;
        let value_start = i;
        while i < bytes.len() && bytes[i] != quote {
            i += 1;
        }
        if i >= bytes.len() {
            return Err(DomError::UnsupportedSelector(format!(
                "unclosed quoted value in '{group}'"
            )));
        }
        let value = group[value_start..i].to_string();
        return Ok((value, i + 1));
    }

    let value_start = i;
    while i < bytes.len() && bytes[i] != b']' && !bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i == value_start {
        return Err(DomError::UnsupportedSelector(format!(
            "missing attribute value in '{group}'"
        )));
    }
    Ok((group[value_start..i].to_string(), i))
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn has_class(element: &Element, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .map(|classes| classes.split_whitespace().any(|c| c == class_name))
        .unwrap_or(false)
}

impl Dom {
    /// Elements matching `selector` anywhere in the document, in document
    /// order.
    pub fn query(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.query_scoped(self.root(), selector)
    }

    /// Descendants of `scope` matching `selector`, in document order.
    /// `scope` itself is never part of the result set.
    pub fn query_scoped(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;

        let mut candidates = Vec::new();
        self.collect_descendant_elements(scope, &mut candidates);

        Ok(candidates
            .into_iter()
            .filter(|&candidate| {
                selector
                    .groups
                    .iter()
                    .any(|chain| self.matches_chain(candidate, chain))
            })
            .collect())
    }

    fn matches_chain(&self, node_id: NodeId, parts: &[SelectorPart]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return false;
        };
        if !self.matches_step(node_id, &last.step) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }

        match last.combinator.unwrap_or(Combinator::Descendant) {
            Combinator::Child => match self.parent_element(node_id) {
                Some(parent) => self.matches_chain(parent, rest),
                None => false,
            },
            Combinator::Descendant => {
                let mut cursor = self.parent_element(node_id);
                while let Some(ancestor) = cursor {
                    if self.matches_chain(ancestor, rest) {
                        return true;
                    }
                    cursor = self.parent_element(ancestor);
                }
                false
            }
        }
    }

    fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if !step.universal {
            if let Some(tag) = &step.tag {
                if !element.tag_name.eq_ignore_ascii_case(tag) {
                    return false;
                }
            }
        } else if step.tag.is_some() {
            return false;
        }

        if let Some(id) = &step.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        if step
            .classes
            .iter()
            .any(|class_name| !has_class(element, class_name))
        {
            return false;
        }

        for condition in &step.attrs {
            let matched = match condition {
                AttrCondition::Exists { name } => element.attrs.contains_key(name),
                AttrCondition::Equals { name, value } => {
                    element.attrs.get(name) == Some(value)
                }
                AttrCondition::Includes { name, value } => element
                    .attrs
                    .get(name)
                    .is_some_and(|attr| attr.split_whitespace().any(|token| token == value)),
            };
            if !matched {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn dom() -> Dom {
        parse_document(
            r#"<div id="outer" class="box wrap">
                 <p class="inner lead" data-role="intro">one</p>
                 <section>
                   <p class="inner">two</p>
                 </section>
               </div>
               <p class="inner">three</p>"#,
        )
        .unwrap()
    }

    fn texts(dom: &Dom, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| dom.attributes(id).get("class").cloned().unwrap_or_default())
            .collect()
    }

    #[test]
    fn tag_class_and_id_steps() {
        let dom = dom();
        assert_eq!(dom.query("p").unwrap().len(), 3);
        assert_eq!(dom.query(".inner").unwrap().len(), 3);
        assert_eq!(dom.query("#outer").unwrap().len(), 1);
        assert_eq!(dom.query("p.lead").unwrap().len(), 1);
        assert_eq!(dom.query(".box.wrap").unwrap().len(), 1);
        assert_eq!(dom.query("*").unwrap().len(), 5);
    }

    #[test]
    fn attribute_conditions() {
        let dom = dom();
        assert_eq!(dom.query("[data-role]").unwrap().len(), 1);
        assert_eq!(dom.query(r#"[data-role=intro]"#).unwrap().len(), 1);
        assert_eq!(dom.query(r#"[data-role="intro"]"#).unwrap().len(), 1);
        assert_eq!(dom.query("[class~=lead]").unwrap().len(), 1);
        assert_eq!(dom.query("[data-role=other]").unwrap().len(), 0);
    }

    #[test]
    fn descendant_and_child_combinators() {
        let dom = dom();
        assert_eq!(dom.query("#outer .inner").unwrap().len(), 2);
        assert_eq!(dom.query("#outer > .inner").unwrap().len(), 1);
        assert_eq!(dom.query("div section p").unwrap().len(), 1);
    }

    #[test]
    fn comma_groups_stay_in_document_order() {
        let dom = dom();
        let matched = dom.query("section p, p.lead").unwrap();
        assert_eq!(texts(&dom, &matched), vec!["inner lead", "inner"]);
    }

    #[test]
    fn scoped_query_excludes_the_scope_and_non_descendants() {
        let dom = dom();
        let outer = dom.query("#outer").unwrap()[0];
        let inner = dom.query_scoped(outer, ".inner").unwrap();
        assert_eq!(inner.len(), 2);

        let boxes = dom.query_scoped(outer, ".box").unwrap();
        assert!(boxes.is_empty());
    }

    #[test]
    fn unsupported_selectors_error() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("p:first-child").is_err());
        assert!(Selector::parse("a + b").is_err());
        assert!(Selector::parse("div >").is_err());
        assert!(Selector::parse("a,,b").is_err());
        assert!(Selector::parse("[unclosed").is_err());
    }

    #[test]
    fn commas_inside_attribute_values_do_not_split_groups() {
        let dom = parse_document(r#"<div data-x="a,b"></div>"#).unwrap();
        assert_eq!(dom.query(r#"[data-x="a,b"]"#).unwrap().len(), 1);
    }
}
