//! Lexer implementation.

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token<'input> {
    Colon,
    Comma,
    Word(&'input str),
}

pub type Spanned<'input> = (lexgen_util::Loc, Token<'input>, lexgen_util::Loc);

lexgen::lexer! {
    pub Lexer -> Token<'input>;

    let whitespace = [' ' '\t' '\r' '\n'];
    let word_start = $$XID_Start | ['_' '$'];
    let word_continue = $$XID_Continue | ['$' '<' '>' '[' ']' '.'];

    rule Init {
        $whitespace+,
        ":" = Token::Colon,
        "," = Token::Comma,
        $word_start $word_continue* => |lexer| {
            let token = Token::Word(lexer.match_());
            lexer.return_(token)
        },
    }
}
