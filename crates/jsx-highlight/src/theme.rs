//! Styles for each token class.

use nu_ansi_term::{Color, Style};

/// What a token is painted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Comment,
    String,
    Number,
    Keyword,
    /// `true`, `false`, `null`, `undefined` and `this`.
    Literal,
    BuiltIn,
    /// An identifier directly followed by `(`.
    Function,
    Punctuation,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub comment: Style,
    pub string: Style,
    pub number: Style,
    pub keyword: Style,
    pub literal: Style,
    pub built_in: Style,
    pub function: Style,
    pub punctuation: Style,
}

impl Theme {
    /// A theme that paints nothing.
    pub fn plain() -> Self {
        Self {
            comment: Style::new(),
            string: Style::new(),
            number: Style::new(),
            keyword: Style::new(),
            literal: Style::new(),
            built_in: Style::new(),
            function: Style::new(),
            punctuation: Style::new(),
        }
    }

    pub fn style(&self, class: TokenClass) -> Style {
        match class {
            TokenClass::Comment => self.comment,
            TokenClass::String => self.string,
            TokenClass::Number => self.number,
            TokenClass::Keyword => self.keyword,
            TokenClass::Literal => self.literal,
            TokenClass::BuiltIn => self.built_in,
            TokenClass::Function => self.function,
            TokenClass::Punctuation => self.punctuation,
            TokenClass::Plain => Style::new(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            comment: Color::DarkGray.italic(),
            string: Color::Green.normal(),
            number: Color::Purple.normal(),
            keyword: Color::Blue.bold(),
            literal: Color::Cyan.normal(),
            built_in: Color::Cyan.normal(),
            function: Color::Yellow.normal(),
            punctuation: Style::new(),
        }
    }
}
