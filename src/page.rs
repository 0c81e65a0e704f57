// page.rs
//! Turns an HTML document into something readable: its title and a flat list
//! of text blocks. No layout or styling happens here.

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    /// Lower-cased tag body without the angle brackets, e.g. `p class="x"` or `/p`.
    Tag(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "hr", "li", "tr", "ul", "ol", "table", "section", "article", "header",
    "footer", "blockquote", "pre", "body", "main", "nav", "form", "dl", "dt", "dd",
];

fn tokenize(body: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = body;

    while let Some(open) = rest.find('<') {
        if open > 0 {
            tokens.push(Token::Text(rest[..open].to_string()));
        }
        rest = &rest[open..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            // Comments may contain '>', so look for the real terminator.
            rest = match comment.find("-->") {
                Some(end) => &comment[end + 3..],
                None => "",
            };
            continue;
        }

        match rest.find('>') {
            Some(close) => {
                let tag = rest[1..close].trim().to_lowercase();
                rest = &rest[close + 1..];
                if tag.is_empty() {
                    continue;
                }
                let (closing, name) = tag_name(&tag);
                let raw_text = !closing && (name == "script" || name == "style");
                let terminator = format!("</{name}");
                tokens.push(Token::Tag(tag.clone()));

                // Script and style bodies are raw text: '<' inside them is not a tag.
                if raw_text {
                    let end = rest
                        .to_ascii_lowercase()
                        .find(&terminator)
                        .unwrap_or(rest.len());
                    if end > 0 {
                        tokens.push(Token::Text(rest[..end].to_string()));
                    }
                    rest = &rest[end..];
                }
            }
            None => {
                // Unterminated tag: treat the remainder as text.
                tokens.push(Token::Text(rest.to_string()));
                rest = "";
            }
        }
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }
    tokens
}

/// Split a tag body into (is_closing, name).
fn tag_name(tag: &str) -> (bool, &str) {
    let (closing, tag) = match tag.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, tag),
    };
    let name = tag
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("");
    (closing, name)
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[derive(Default)]
struct Builder {
    page: Page,
    current: String,
    kind: Option<BlockKind>,
    pending_space: bool,
    title: Option<String>,
    in_head: bool,
    /// Closing tag name whose content is being skipped (`script`, `style`).
    skipping: Option<&'static str>,
}

impl Builder {
    fn push_text(&mut self, raw: &str) {
        let text = decode_entities(raw);
        if let Some(title) = self.title.as_mut() {
            title.push_str(&text);
            return;
        }
        if self.in_head {
            return;
        }
        for c in text.chars() {
            if c.is_whitespace() {
                self.pending_space = !self.current.is_empty();
            } else {
                if self.pending_space {
                    self.current.push(' ');
                    self.pending_space = false;
                }
                self.current.push(c);
            }
        }
    }

    fn flush(&mut self) {
        self.pending_space = false;
        if self.current.is_empty() {
            return;
        }
        self.page.blocks.push(Block {
            kind: self.kind.unwrap_or(BlockKind::Paragraph),
            text: std::mem::take(&mut self.current),
        });
    }

    fn tag(&mut self, tag: &str) {
        let (closing, name) = tag_name(tag);

        if let Some(skip_until) = self.skipping {
            if closing && name == skip_until {
                self.skipping = None;
            }
            return;
        }

        match (closing, name) {
            (false, "script") => self.skipping = Some("script"),
            (false, "style") => self.skipping = Some("style"),
            (false, "head") => self.in_head = true,
            (true, "head") => self.in_head = false,
            (false, "title") => self.title = Some(String::new()),
            (true, "title") => {
                if let Some(title) = self.title.take() {
                    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !title.is_empty() && self.page.title.is_none() {
                        self.page.title = Some(title);
                    }
                }
            }
            _ => {
                let level = heading_level(name);
                if level.is_some() || BLOCK_TAGS.contains(&name) {
                    // `</head>` is optional: body content implicitly closes it.
                    self.in_head = false;
                }
                if let Some(level) = level {
                    self.flush();
                    self.kind = if closing {
                        None
                    } else {
                        Some(BlockKind::Heading(level))
                    };
                } else if BLOCK_TAGS.contains(&name) {
                    self.flush();
                }
            }
        }
    }

    fn finish(mut self) -> Page {
        self.flush();
        self.page
    }
}

impl Page {
    pub fn parse(html: &str) -> Page {
        let mut builder = Builder::default();
        for token in tokenize(html) {
            match token {
                Token::Text(text) => {
                    if builder.skipping.is_none() {
                        builder.push_text(&text);
                    }
                }
                Token::Tag(tag) => builder.tag(&tag),
            }
        }
        builder.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Block {
        Block {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
        }
    }

    #[test]
    fn tokenizer_splits_tags_and_text() {
        assert_eq!(
            tokenize("a<B class=x>b</b>"),
            vec![
                Token::Text("a".into()),
                Token::Tag("b class=x".into()),
                Token::Text("b".into()),
                Token::Tag("/b".into()),
            ]
        );
    }

    #[test]
    fn comments_are_dropped_even_with_angle_brackets() {
        let page = Page::parse("<p>one<!-- a > b --> two</p>");
        assert_eq!(page.blocks, vec![paragraph("one two")]);
    }

    #[test]
    fn title_comes_from_head() {
        let page = Page::parse(
            "<html><head><title>  My\n Page </title><meta charset=utf-8></head>\
             <body><p>Hi</p></body></html>",
        );
        assert_eq!(page.title.as_deref(), Some("My Page"));
        assert_eq!(page.blocks, vec![paragraph("Hi")]);
    }

    #[test]
    fn head_without_closing_tag_keeps_body_text() {
        let page = Page::parse("<html><head><title>T</title><body><p>Hi</p></body></html>");
        assert_eq!(page.title.as_deref(), Some("T"));
        assert_eq!(page.blocks, vec![paragraph("Hi")]);

        let page = Page::parse("<head><title>T</title><h1>Top</h1>text");
        assert_eq!(
            page.blocks,
            vec![
                Block {
                    kind: BlockKind::Heading(1),
                    text: "Top".into()
                },
                paragraph("text"),
            ]
        );
    }

    #[test]
    fn script_and_style_are_skipped() {
        let page = Page::parse(
            "<p>before</p><script>if (a < b) { x(); }</script>\
             <style>p { color: red }</style><p>after</p>",
        );
        assert_eq!(page.blocks, vec![paragraph("before"), paragraph("after")]);
    }

    #[test]
    fn inline_tags_keep_text_together() {
        let page = Page::parse("<p>Hello <b>big</b>\n   <i>world</i>!</p><p>next</p>");
        assert_eq!(page.blocks, vec![paragraph("Hello big world!"), paragraph("next")]);
    }

    #[test]
    fn headings_are_their_own_blocks() {
        let page = Page::parse("intro<h2>Section</h2>body");
        assert_eq!(
            page.blocks,
            vec![
                paragraph("intro"),
                Block {
                    kind: BlockKind::Heading(2),
                    text: "Section".into()
                },
                paragraph("body"),
            ]
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            decode_entities("a &amp; b &lt;c&gt; &quot;d&quot; &#39;e&apos; &#65;&#x42;"),
            "a & b <c> \"d\" 'e' AB"
        );
        assert_eq!(decode_entities("AT&T &unknown; &"), "AT&T &unknown; &");
    }

    #[test]
    fn unterminated_tag_is_text() {
        let page = Page::parse("<p>ok</p>3 < 4");
        assert_eq!(page.blocks, vec![paragraph("ok"), paragraph("3 < 4")]);
    }

    #[test]
    fn empty_document() {
        let page = Page::parse("<!doctype html><html></html>");
        assert!(page.is_empty());
        assert_eq!(page.title, None);
    }
}
