//! Graph loaders: turn an external byte/text representation into something
//! [`crate::graph::Arg::from_source`] can consume.
//!
//! Three formats are supported, following `include/loaders/{ARGLoader,
//! EdgeStreamARGLoader}.hpp` in the original source and spec §6: the
//! attributed "vf" text format, the unattributed "edge" text format, and the
//! read-only binary "ARG" format.

pub mod arg_binary;
pub mod edge_text;
pub mod vf_text;

/// A simple whitespace/`#`-comment tokenizer shared by the text loaders,
/// mirroring the original's `istream >>` / `skipHeading` reading style.
pub(crate) struct Tokenizer<'a> {
    tokens: std::vec::IntoIter<&'a str>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let tokens: Vec<&str> = text
            .lines()
            .map(|line| match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            })
            .flat_map(str::split_whitespace)
            .collect();
        Tokenizer {
            tokens: tokens.into_iter(),
        }
    }

    pub(crate) fn next(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }
}
