//! A Wadler-style pretty printer.
//!
//! Documents are immutable trees built from a handful of constructors and
//! laid out by [`best`], which walks a work list of `(indent, mode, doc)`
//! triples and decides each [`Doc::union`] by looking ahead only as far as the
//! end of the current line. [`Doc::group`] does not build a flattened copy of
//! its argument: [`Doc::flatten`] is a deferred node which switches the layout
//! into flat mode when it is reached, so both alternatives share one tree.
//!
//! See "A prettier printer" (Wadler, 2003) for the algebra and its laws.

use std::fmt;
use std::rc::Rc;

/// A document: a description of a set of candidate layouts.
///
/// Cloning is cheap; documents are reference counted and never mutated.
#[derive(Clone)]
pub struct Doc(Rc<DocKind>);

enum DocKind {
    Nil,
    Text(Rc<str>),
    Concat(Doc, Doc),
    Nest(isize, Doc),
    /// Soft line break: `flat` when the enclosing group fits, otherwise a
    /// newline followed by the indentation and `broken`.
    Line { flat: Rc<str>, broken: Rc<str> },
    /// Unconditional line break. A group containing one never renders flat.
    Hardline,
    Union(Doc, Doc),
    Flatten(Doc),
    Column(Rc<dyn Fn(usize) -> Doc>),
    Nesting(Rc<dyn Fn(usize) -> Doc>),
}

impl Doc {
    fn new(kind: DocKind) -> Doc {
        Doc(Rc::new(kind))
    }

    pub fn nil() -> Doc {
        Doc::new(DocKind::Nil)
    }

    /// Literal text. It must not contain newlines.
    pub fn text(text: impl Into<String>) -> Doc {
        Doc::new(DocKind::Text(Rc::from(text.into())))
    }

    /// A line break that renders as a single space when flattened.
    pub fn line() -> Doc {
        Doc::line_or(" ", "")
    }

    /// A line break that renders as nothing when flattened.
    pub fn softline() -> Doc {
        Doc::line_or("", "")
    }

    /// A line break rendering `flat` when flattened, and a newline followed by
    /// the current indentation and `broken` otherwise.
    pub fn line_or(flat: &str, broken: &str) -> Doc {
        Doc::new(DocKind::Line {
            flat:   Rc::from(flat),
            broken: Rc::from(broken),
        })
    }

    pub fn hardline() -> Doc {
        Doc::new(DocKind::Hardline)
    }

    /// Chooses `flat` if its first line fits the remaining width, `broken`
    /// otherwise. Every layout of `flat` should have a first line at least as
    /// long as every layout of `broken`.
    pub fn union(flat: Doc, broken: Doc) -> Doc {
        Doc::new(DocKind::Union(flat, broken))
    }

    /// Builds a document from the column the layout has reached.
    pub fn column(f: impl Fn(usize) -> Doc + 'static) -> Doc {
        Doc::new(DocKind::Column(Rc::new(f)))
    }

    /// Builds a document from the current indentation.
    pub fn nesting(f: impl Fn(usize) -> Doc + 'static) -> Doc {
        Doc::new(DocKind::Nesting(Rc::new(f)))
    }

    pub fn concat(docs: impl IntoIterator<Item = Doc>) -> Doc {
        docs.into_iter().fold(Doc::nil(), Doc::append)
    }

    /// Places `separator` between each pair of `docs`.
    pub fn join(docs: impl IntoIterator<Item = Doc>, separator: Doc) -> Doc {
        let mut result = Doc::nil();
        for (i, doc) in docs.into_iter().enumerate() {
            if i > 0 {
                result = result.append(separator.clone());
            }
            result = result.append(doc);
        }
        result
    }

    /// Joins `docs` with hard line breaks.
    pub fn lines(docs: impl IntoIterator<Item = Doc>) -> Doc {
        Doc::join(docs, Doc::hardline())
    }

    pub fn surround(open: impl Into<String>, doc: Doc, close: impl Into<String>) -> Doc {
        Doc::text(open).append(doc).append(Doc::text(close))
    }

    pub fn is_nil(&self) -> bool {
        matches!(*self.0, DocKind::Nil)
    }

    pub fn append(self, other: Doc) -> Doc {
        if self.is_nil() {
            other
        } else if other.is_nil() {
            self
        } else {
            Doc::new(DocKind::Concat(self, other))
        }
    }

    /// Adds `indent` columns to the line breaks inside this document.
    pub fn nest(self, indent: isize) -> Doc {
        if indent == 0 {
            return self;
        }
        Doc::new(DocKind::Nest(indent, self))
    }

    /// Renders every line break in this document in its flat form.
    pub fn flatten(self) -> Doc {
        Doc::new(DocKind::Flatten(self))
    }

    /// Lays this document out on one line if it fits, and broken otherwise.
    pub fn group(self) -> Doc {
        Doc::union(self.clone().flatten(), self)
    }

    /// Indents continuation lines to the column at which this document starts.
    pub fn align(self) -> Doc {
        Doc::column(move |column| {
            let doc = self.clone();
            Doc::nesting(move |indent| doc.clone().nest(column as isize - indent as isize))
        })
    }

    /// Aligns this document and indents its continuation lines by `indent`.
    pub fn hang(self, indent: isize) -> Doc {
        self.nest(indent).align()
    }
}

impl fmt::Debug for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            DocKind::Nil => write!(f, "Nil"),
            DocKind::Text(text) => write!(f, "Text({:?})", text),
            DocKind::Concat(a, b) => f.debug_tuple("Concat").field(a).field(b).finish(),
            DocKind::Nest(indent, doc) => f.debug_tuple("Nest").field(indent).field(doc).finish(),
            DocKind::Line { flat, broken } => write!(f, "Line({:?}, {:?})", flat, broken),
            DocKind::Hardline => write!(f, "Hardline"),
            DocKind::Union(x, y) => f.debug_tuple("Union").field(x).field(y).finish(),
            DocKind::Flatten(doc) => f.debug_tuple("Flatten").field(doc).finish(),
            DocKind::Column(_) => write!(f, "Column(<fn>)"),
            DocKind::Nesting(_) => write!(f, "Nesting(<fn>)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

type Command = (usize, Mode, Doc);

fn indented(indent: usize, by: isize) -> usize {
    (indent as isize + by).max(0) as usize
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// One piece of laid-out output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(Rc<str>),
    /// A newline followed by `usize` columns of indentation.
    Newline(usize),
}

/// Lazily lays out a document, yielding output fragments on demand.
pub struct Best {
    width:  usize,
    column: usize,
    stack:  Vec<Command>,
}

/// Lays `doc` out within `width` columns, starting at `start_column`.
pub fn best(width: usize, start_column: usize, doc: &Doc) -> Best {
    Best {
        width,
        column: start_column,
        stack: vec![(0, Mode::Break, doc.clone())],
    }
}

impl Best {
    fn text(&mut self, text: &Rc<str>) -> Fragment {
        self.column += text_width(text);
        Fragment::Text(text.clone())
    }

    fn newline(&mut self, indent: usize) -> Fragment {
        self.column = indent;
        Fragment::Newline(indent)
    }
}

impl Iterator for Best {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        while let Some((indent, mode, doc)) = self.stack.pop() {
            match &*doc.0 {
                DocKind::Nil => {}
                DocKind::Text(text) => return Some(self.text(text)),
                DocKind::Concat(a, b) => {
                    self.stack.push((indent, mode, b.clone()));
                    self.stack.push((indent, mode, a.clone()));
                }
                DocKind::Nest(by, inner) => {
                    self.stack.push((indented(indent, *by), mode, inner.clone()));
                }
                DocKind::Line { flat, broken } => match mode {
                    Mode::Flat if flat.is_empty() => {}
                    Mode::Flat => return Some(self.text(flat)),
                    Mode::Break => {
                        if !broken.is_empty() {
                            let separator = Doc::new(DocKind::Text(broken.clone()));
                            self.stack.push((indent, mode, separator));
                        }
                        return Some(self.newline(indent));
                    }
                },
                DocKind::Hardline => return Some(self.newline(indent)),
                DocKind::Union(x, y) => {
                    let remaining = self.width as isize - self.column as isize;
                    let choice = match mode {
                        Mode::Flat => x,
                        Mode::Break if fits(remaining, self.column, (indent, mode, x.clone()), &self.stack) => x,
                        Mode::Break => y,
                    };
                    self.stack.push((indent, mode, choice.clone()));
                }
                DocKind::Flatten(inner) => self.stack.push((indent, Mode::Flat, inner.clone())),
                DocKind::Column(f) => self.stack.push((indent, mode, f(self.column))),
                DocKind::Nesting(f) => self.stack.push((indent, mode, f(indent))),
            }
        }
        None
    }
}

/// Whether the text up to the next line break fits in `remaining` columns,
/// laying out `first` and then the pending commands in `rest`.
///
/// Stops at the first line break or as soon as the width is exceeded, so it
/// never looks further than one line ahead. Unions in the pending commands
/// are assumed to take their broken alternative, which they are free to do
/// when they are reached.
fn fits(mut remaining: isize, mut column: usize, first: Command, rest: &[Command]) -> bool {
    let mut local = vec![first];
    let mut rest = rest.iter().rev();

    loop {
        if remaining < 0 {
            return false;
        }
        let (indent, mode, doc) = match local.pop() {
            Some(command) => command,
            None => match rest.next() {
                Some(command) => command.clone(),
                None => return true,
            },
        };
        match &*doc.0 {
            DocKind::Nil => {}
            DocKind::Text(text) => {
                let width = text_width(text);
                remaining -= width as isize;
                column += width;
            }
            DocKind::Concat(a, b) => {
                local.push((indent, mode, b.clone()));
                local.push((indent, mode, a.clone()));
            }
            DocKind::Nest(by, inner) => local.push((indented(indent, *by), mode, inner.clone())),
            DocKind::Line { flat, .. } => match mode {
                Mode::Flat => {
                    let width = text_width(flat);
                    remaining -= width as isize;
                    column += width;
                }
                Mode::Break => return true,
            },
            DocKind::Hardline => return mode == Mode::Break,
            DocKind::Union(x, y) => match mode {
                Mode::Flat => local.push((indent, mode, x.clone())),
                Mode::Break => local.push((indent, mode, y.clone())),
            },
            DocKind::Flatten(inner) => local.push((indent, Mode::Flat, inner.clone())),
            DocKind::Column(f) => local.push((indent, mode, f(column))),
            DocKind::Nesting(f) => local.push((indent, mode, f(indent))),
        }
    }
}

/// Renders `doc` within `width` columns.
///
/// Indentation is only written before text, so blank lines carry no trailing
/// whitespace.
pub fn render(width: usize, doc: &Doc) -> String {
    let mut out = String::new();
    let mut pending_indent = 0;
    for fragment in best(width, 0, doc) {
        match fragment {
            Fragment::Newline(indent) => {
                out.push('\n');
                pending_indent = indent;
            }
            Fragment::Text(text) if text.is_empty() => {}
            Fragment::Text(text) => {
                out.extend(std::iter::repeat(' ').take(pending_indent));
                pending_indent = 0;
                out.push_str(&text);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(words: &[&str]) -> Doc {
        Doc::join(words.iter().map(|word| Doc::text(*word)), Doc::line())
    }

    /// `[ a, b ]` on one line, or one item per line with leading commas.
    fn list(items: Vec<Doc>) -> Doc {
        Doc::text("[ ")
            .append(Doc::join(items, Doc::line_or(", ", ", ")))
            .append(Doc::line_or(" ", ""))
            .append(Doc::text("]"))
            .align()
            .group()
    }

    #[test]
    fn text_and_hardlines() {
        let doc = Doc::lines(vec![Doc::text("a"), Doc::text("b"), Doc::nil().append(Doc::text("c"))]);
        assert_eq!(render(80, &doc), "a\nb\nc");
    }

    #[test]
    fn group_flattens_when_it_fits() {
        let doc = words(&["hello", "pretty", "world"]).group();
        assert_eq!(render(80, &doc), "hello pretty world");
        assert_eq!(render(10, &doc), "hello\npretty\nworld");
    }

    #[test]
    fn nest_indents_broken_lines() {
        let doc = Doc::text("f")
            .append(Doc::line().append(words(&["a", "b"])).nest(4))
            .group();
        assert_eq!(render(80, &doc), "f a b");
        assert_eq!(render(3, &doc), "f\n    a\n    b");
    }

    #[test]
    fn line_or_uses_the_broken_separator() {
        let doc = list(vec![Doc::text("one"), Doc::text("two"), Doc::text("three")]);
        assert_eq!(render(80, &doc), "[ one, two, three ]");
        assert_eq!(render(10, &doc), "[ one\n, two\n, three\n]");
    }

    #[test]
    fn align_lines_up_under_the_start() {
        let doc = Doc::text("x = ").append(list(vec![Doc::text("aaaa"), Doc::text("bbbb")]));
        assert_eq!(render(8, &doc), "x = [ aaaa\n    , bbbb\n    ]");
    }

    #[test]
    fn nested_groups_break_outermost_first() {
        let inner = list(vec![Doc::text("1"), Doc::text("2")]);
        let doc = list(vec![inner.clone(), inner]);
        assert_eq!(render(80, &doc), "[ [ 1, 2 ], [ 1, 2 ] ]");
        assert_eq!(render(14, &doc), "[ [ 1, 2 ]\n, [ 1, 2 ]\n]");
    }

    #[test]
    fn hardline_forces_the_enclosing_group_to_break() {
        let doc = Doc::text("a")
            .append(Doc::line())
            .append(Doc::text("b"))
            .append(Doc::hardline())
            .append(Doc::text("c"))
            .group();
        assert_eq!(render(80, &doc), "a\nb\nc");
    }

    #[test]
    fn fits_looks_past_the_group_to_the_next_break() {
        // The group itself fits in 7 columns, but the text after it does not.
        let doc = words(&["a", "b"]).group().append(Doc::text("tail!"));
        assert_eq!(render(7, &doc), "a\nbtail!");
        assert_eq!(render(8, &doc), "a btail!");
    }

    #[test]
    fn blank_lines_have_no_trailing_whitespace() {
        let doc = Doc::text("a")
            .append(Doc::hardline().append(Doc::hardline()).append(Doc::text("b")).nest(4));
        assert_eq!(render(80, &doc), "a\n\n    b");
    }

    #[test]
    fn column_and_nesting_see_the_layout_state() {
        let doc = Doc::text("abc").append(Doc::column(|column| Doc::text(column.to_string())));
        assert_eq!(render(80, &doc), "abc3");

        let doc = Doc::hardline()
            .append(Doc::nesting(|indent| Doc::text(indent.to_string())))
            .nest(2);
        assert_eq!(render(80, &doc), "\n  2");
    }

    #[test]
    fn best_is_lazy() {
        // An endless document: only the requested prefix is ever laid out.
        fn endless(n: usize) -> Doc {
            Doc::text(n.to_string())
                .append(Doc::line())
                .append(Doc::column(move |_| endless(n + 1)))
        }
        let doc = endless(0).group();
        let prefix: Vec<_> = best(10, 0, &doc).take(4).collect();
        assert_eq!(
            prefix,
            vec![
                Fragment::Text(Rc::from("0")),
                Fragment::Newline(0),
                Fragment::Text(Rc::from("1")),
                Fragment::Newline(0),
            ]
        );
    }

    fn nested_lists(groups: &[Vec<String>]) -> Doc {
        let items = groups.iter().map(|group| {
            Doc::join(group.iter().map(|word| Doc::text(word.clone())), Doc::line()).group()
        });
        Doc::join(items, Doc::line()).group().nest(2)
    }

    proptest! {
        #[test]
        fn lines_never_exceed_the_width(
            groups in prop::collection::vec(prop::collection::vec("[a-z]{1,8}", 1..6), 1..6),
            width in 20usize..80,
        ) {
            let rendered = render(width, &nested_lists(&groups));
            for line in rendered.lines() {
                prop_assert!(line.chars().count() <= width, "{:?} is wider than {}", line, width);
            }
        }

        #[test]
        fn render_is_deterministic(
            groups in prop::collection::vec(prop::collection::vec("[a-z]{1,8}", 1..6), 1..6),
            width in 1usize..80,
        ) {
            let doc = nested_lists(&groups);
            prop_assert_eq!(render(width, &doc), render(width, &doc));
        }

        #[test]
        fn group_matches_flatten_when_flat_fits(
            groups in prop::collection::vec(prop::collection::vec("[a-z]{1,8}", 1..4), 1..4),
            width in 1usize..80,
        ) {
            let doc = nested_lists(&groups);
            let flat = render(usize::MAX / 2, &doc.clone().flatten());
            if flat.chars().count() <= width {
                prop_assert_eq!(render(width, &doc.group()), flat);
            }
        }
    }
}
