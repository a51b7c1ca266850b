use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// The format used for the timestamp embedded in generated titles.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LATEX_TEMPLATE: &str = r"
\title{&&&}
\author{ ME }

\documentclass{article}

\begin{document}
\maketitle

\section{Introduction}
Some Introduction goes here

\end{document}
";

const MARKDOWN_TEMPLATE: &str = "#{title}\n\n";

const TEXT_TEMPLATE: &str = "{title}\n\n";

/// A note template for a single file extension.
///
/// The body contains exactly one placeholder marker, which is replaced by the
/// generated title when a new note is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    body: &'static str,
    placeholder: &'static str,
}

impl Template {
    /// Creates a template from a body and the marker to substitute.
    #[must_use]
    pub const fn new(body: &'static str, placeholder: &'static str) -> Self {
        Self { body, placeholder }
    }

    /// The raw template body, including the placeholder.
    #[must_use]
    pub const fn body(&self) -> &'static str {
        self.body
    }

    /// Fill in the template with the given title.
    ///
    /// The title is inserted verbatim, without any escaping.
    #[must_use]
    pub fn instantiate(&self, title: &str) -> String {
        self.body.replacen(self.placeholder, title, 1)
    }

    /// Builds the title for a new note, `"<filename> (<timestamp>)"`.
    #[must_use]
    pub fn title(filename: &str, now: NaiveDateTime) -> String {
        format!("{filename} ({})", now.format(TIMESTAMP_FORMAT))
    }
}

/// The registry of templates, keyed by file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    by_extension: BTreeMap<&'static str, Template>,
}

impl Default for Templates {
    fn default() -> Self {
        let by_extension = BTreeMap::from([
            ("tex", Template::new(LATEX_TEMPLATE, "&&&")),
            ("md", Template::new(MARKDOWN_TEMPLATE, "{title}")),
            ("txt", Template::new(TEXT_TEMPLATE, "{title}")),
        ]);
        Self { by_extension }
    }
}

impl Templates {
    /// Returns the template registered for `extension`, if any.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&Template> {
        self.by_extension.get(extension)
    }

    /// The extensions which have a registered template.
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_extension.keys().copied()
    }
}
