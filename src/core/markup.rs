//! Markup navigation.
//!
//! The scanners only ever look at fetched pages through this module: find all
//! elements of a tag, find the first element carrying an attribute, find an
//! element by tag and id, and read an element's direct children. Everything
//! else about `scraper`'s node model stays behind these types.

use scraper::{ElementRef, Html};

/// 解析後的整份 HTML 文件
pub struct Markup {
    document: Html,
}

impl Markup {
    /// html5ever 容錯解析，不會失敗
    pub fn parse(text: &str) -> Self {
        Self {
            document: Html::parse_document(text),
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node(self.document.root_element())
    }

    pub fn find_all(&self, tag: &str) -> Vec<Node<'_>> {
        let root = self.root();
        std::iter::once(root)
            .filter(|node| node.is(tag))
            .chain(root.find_all(tag))
            .collect()
    }

    pub fn first_with_attr(&self, attr: &str) -> Option<Node<'_>> {
        let root = self.root();
        if root.attr(attr).is_some() {
            return Some(root);
        }
        root.first_with_attr(attr)
    }

    pub fn find_by_id(&self, tag: &str, id: &str) -> Option<Node<'_>> {
        self.find_all(tag).into_iter().find(|node| node.id() == Some(id))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn is(&self, tag: &str) -> bool {
        self.name().eq_ignore_ascii_case(tag)
    }

    fn descendants(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.0.descendants().skip(1).filter_map(ElementRef::wrap).map(Node)
    }

    /// 所有子孫元素中符合 tag 的（不含自己），文件順序
    pub fn find_all(&self, tag: &str) -> Vec<Node<'a>> {
        self.descendants().filter(|node| node.is(tag)).collect()
    }

    pub fn find_first(&self, tag: &str) -> Option<Node<'a>> {
        self.descendants().find(|node| node.is(tag))
    }

    pub fn first_with_attr(&self, attr: &str) -> Option<Node<'a>> {
        self.descendants().find(|node| node.attr(attr).is_some())
    }

    pub fn find_by_id(&self, tag: &str, id: &str) -> Option<Node<'a>> {
        self.descendants().find(|node| node.is(tag) && node.id() == Some(id))
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn id(&self) -> Option<&'a str> {
        self.0.value().id()
    }

    /// 所有文字節點串接
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// 直接子節點：元素與文字，註解等其他節點略過
    pub fn children(&self) -> Vec<Child<'a>> {
        self.0
            .children()
            .filter_map(|child| match child.value() {
                scraper::Node::Text(text) => Some(Child::Text(&**text)),
                scraper::Node::Element(_) => ElementRef::wrap(child).map(|e| Child::Element(Node(e))),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Element(Node<'a>),
    Text(&'a str),
}

impl<'a> Child<'a> {
    /// 只含空白的文字節點
    pub fn is_blank(&self) -> bool {
        matches!(self, Child::Text(text) if text.trim().is_empty())
    }

    pub fn as_element(&self) -> Option<Node<'a>> {
        match self {
            Child::Element(node) => Some(*node),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Element(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <div id="wrap">
          <p class="entry"><a href="/players/r/roberro01.shtml">Robin Roberts</a> (1948-1966)<!-- note --></p>
          <p><b><a href="/players/a/active01.shtml">Active Guy</a> (2015-2026)</b></p>
          <table id="other"><tr><td>x</td></tr></table>
          <table id="team_schedule"><tbody><tr><td>1</td><td>2</td></tr></tbody></table>
        </div>
    </body></html>"#;

    #[test]
    fn test_find_all_in_document_order() {
        let markup = Markup::parse(PAGE);
        let paragraphs = markup.find_all("p");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].attr("class"), Some("entry"));
    }

    #[test]
    fn test_find_by_tag_and_id() {
        let markup = Markup::parse(PAGE);
        let table = markup.find_by_id("table", "team_schedule").unwrap();
        assert_eq!(table.find_all("td").len(), 2);
        assert!(markup.find_by_id("table", "nope").is_none());
        assert!(markup.find_by_id("div", "team_schedule").is_none());
    }

    #[test]
    fn test_first_with_attr() {
        let markup = Markup::parse(PAGE);
        let link = markup.first_with_attr("href").unwrap();
        assert_eq!(link.name(), "a");
        assert_eq!(link.text(), "Robin Roberts");
    }

    #[test]
    fn test_direct_children_skip_comments() {
        let markup = Markup::parse(PAGE);
        let entry = markup.find_all("p")[0];
        let children = entry.children();

        assert_eq!(children.len(), 2);
        assert_eq!(
            children[0].as_element().and_then(|a| a.attr("href")),
            Some("/players/r/roberro01.shtml")
        );
        assert_eq!(children[1].as_text(), Some(" (1948-1966)"));

        let active = markup.find_all("p")[1];
        let first = active.children()[0].as_element().unwrap();
        assert_eq!(first.name(), "b");
        assert!(first.attr("href").is_none());
    }

    #[test]
    fn test_blank_text_children() {
        let markup = Markup::parse("<div>\n  <span>a</span>\n</div>");
        let div = markup.find_all("div")[0];
        let significant: Vec<_> = div.children().into_iter().filter(|c| !c.is_blank()).collect();
        assert_eq!(significant.len(), 1);
    }
}
