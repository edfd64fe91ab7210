//! DDL parser implementation.

use tracing::{debug, trace};

use super::error::ParseError;
use crate::lexer::{Keyword, Span, Token, TokenKind};
use crate::schema::{
    Column, DataType, DefaultValue, Index, IndexColumn, IndexKind, IndexMethod, IndexOptions,
    OptionValue, PrimaryKey, Reference, ReferenceAction, Schema, SortOrder, Table, TypeLength,
    TypeName,
};

/// Spellings of the current time that MySQL stores as `CURRENT_TIMESTAMP`.
const CURRENT_TIMESTAMP_SYNONYMS: [&str; 4] =
    ["CURRENT_TIMESTAMP", "NOW", "LOCALTIME", "LOCALTIMESTAMP"];

/// MySQL DDL parser.
///
/// Works over a token vector produced by [`crate::lexer::tokenize`]. Only
/// `CREATE TABLE` statements are modeled; every other statement is skipped
/// up to its terminating `;`.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over `tokens`. A missing trailing
    /// [`TokenKind::Eof`] is added.
    #[must_use]
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |token| token.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), ""));
        }
        Self { tokens, pos: 0 }
    }

    /// Parses every statement and returns the schema they define.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for malformed `CREATE TABLE` statements and
    /// for definitions that break the model invariants (duplicate tables,
    /// columns or index names, a second primary key).
    pub fn parse_schema(mut self) -> Result<Schema, ParseError> {
        let mut schema = Schema::new();
        loop {
            match &self.current().kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => self.advance(),
                _ => {
                    if let Some((table, span)) = self.parse_statement()? {
                        trace!(table = table.name(), "parsed table");
                        schema
                            .add_table(table)
                            .map_err(|err| ParseError::invalid_schema(&err, span))?;
                    }
                }
            }
        }
        debug!(tables = schema.len(), "parsed schema");
        Ok(schema)
    }

    /// Parses one statement. Returns the table and its span for
    /// `CREATE TABLE`, `None` for skipped statements.
    fn parse_statement(&mut self) -> Result<Option<(Table, Span)>, ParseError> {
        let start = self.current().span;
        if self.check_keyword(Keyword::Create) && self.peek_keyword(Keyword::Table) {
            self.advance();
            self.advance();
            let table = self.parse_create_table()?;
            let span = start.merge(self.previous_span());
            self.expect_statement_end()?;
            return Ok(Some((table, span)));
        }
        self.skip_statement();
        Ok(None)
    }

    fn parse_create_table(&mut self) -> Result<Table, ParseError> {
        if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
        }

        let name = self.parse_qualified_name()?;

        if matches!(
            self.current().as_keyword(),
            Some(Keyword::Like | Keyword::As | Keyword::Select)
        ) {
            return Err(ParseError::new(
                format!(
                    "unsupported clause {} in CREATE TABLE `{name}`",
                    self.current().kind
                ),
                self.current().span,
            ));
        }

        let mut table = Table::new(name);
        self.expect(&TokenKind::LeftParen)?;
        loop {
            self.parse_table_element(&mut table)?;
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        self.parse_table_options(&mut table)?;
        Ok(table)
    }

    /// Parses `[db.]name`, keeping only the table name.
    fn parse_qualified_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_identifier()?;
        if self.check(&TokenKind::Dot) {
            self.advance();
            name = self.expect_identifier()?;
        }
        Ok(name)
    }

    fn parse_table_element(&mut self, table: &mut Table) -> Result<(), ParseError> {
        let start = self.current().span;
        match self.current().as_keyword() {
            Some(Keyword::Constraint) => {
                self.advance();
                let symbol = self.parse_optional_name();
                self.parse_constraint(table, symbol, start)
            }
            Some(
                Keyword::Primary
                | Keyword::Unique
                | Keyword::Key
                | Keyword::Index
                | Keyword::Fulltext
                | Keyword::Spatial
                | Keyword::Foreign
                | Keyword::Check,
            ) => self.parse_constraint(table, None, start),
            _ => self.parse_column_definition(table),
        }
    }

    // ===================================================================
    // Columns
    // ===================================================================

    fn parse_column_definition(&mut self, table: &mut Table) -> Result<(), ParseError> {
        let start = self.current().span;
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = Column::new(name, data_type);
        let mut seen: Vec<&'static str> = Vec::new();
        let mut primary = false;
        let mut unique = false;

        while let Some(keyword) = self.current().as_keyword() {
            let span = self.current().span;
            let attribute = match keyword {
                Keyword::Unsigned => {
                    self.advance();
                    column.unsigned = true;
                    "UNSIGNED"
                }
                Keyword::Zerofill => {
                    self.advance();
                    column.zerofill = true;
                    "ZEROFILL"
                }
                Keyword::Binary => {
                    if !column.data_type.name.is_character() {
                        return Err(ParseError::new(
                            format!(
                                "BINARY attribute is not allowed on {} column `{}`",
                                column.data_type.name, column.name
                            ),
                            span,
                        ));
                    }
                    self.advance();
                    column.binary = true;
                    "BINARY"
                }
                Keyword::Character | Keyword::Charset => {
                    self.advance();
                    if keyword == Keyword::Character {
                        self.expect_keyword(Keyword::Set)?;
                    }
                    column.charset =
                        Some(self.expect_word("character set name")?.to_ascii_lowercase());
                    "CHARACTER SET"
                }
                Keyword::Collate => {
                    self.advance();
                    column.collation =
                        Some(self.expect_word("collation name")?.to_ascii_lowercase());
                    "COLLATE"
                }
                Keyword::Null => {
                    self.advance();
                    column.nullable = true;
                    "NULL"
                }
                Keyword::Not => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    column.nullable = false;
                    "NULL"
                }
                Keyword::Default => {
                    self.advance();
                    column.default = Some(self.parse_default_value()?);
                    "DEFAULT"
                }
                Keyword::On => {
                    self.advance();
                    self.expect_keyword(Keyword::Update)?;
                    column.on_update = Some(self.parse_default_value()?);
                    "ON UPDATE"
                }
                Keyword::AutoIncrement => {
                    self.advance();
                    column.auto_increment = true;
                    "AUTO_INCREMENT"
                }
                Keyword::Unique => {
                    self.advance();
                    if self.check_keyword(Keyword::Key) {
                        self.advance();
                    }
                    unique = true;
                    "UNIQUE"
                }
                Keyword::Primary | Keyword::Key => {
                    self.advance();
                    if keyword == Keyword::Primary {
                        self.expect_keyword(Keyword::Key)?;
                    }
                    primary = true;
                    "PRIMARY KEY"
                }
                Keyword::Comment => {
                    self.advance();
                    column.comment = Some(self.expect_string("comment text")?);
                    "COMMENT"
                }
                Keyword::Check => {
                    self.skip_check()?;
                    continue;
                }
                _ => {
                    return Err(ParseError::unexpected(
                        "column attribute",
                        &self.current().kind,
                        span,
                    ));
                }
            };
            if seen.contains(&attribute) {
                return Err(ParseError::new(
                    format!("duplicate {attribute} attribute on column `{}`", column.name),
                    span,
                ));
            }
            seen.push(attribute);
        }

        if !self.check(&TokenKind::Comma) && !self.check(&TokenKind::RightParen) {
            return Err(ParseError::unexpected(
                "column attribute, ',' or ')'",
                &self.current().kind,
                self.current().span,
            ));
        }

        // A nullable column without a default already defaults to NULL.
        if column.nullable && column.default == Some(DefaultValue::Null) {
            column.default = None;
        }

        let span = start.merge(self.previous_span());
        let name = column.name.clone();
        table
            .add_column(column)
            .map_err(|err| ParseError::invalid_schema(&err, span))?;
        if primary {
            table
                .set_primary_key(PrimaryKey::new([name.clone()]))
                .map_err(|err| ParseError::invalid_schema(&err, span))?;
        }
        if unique {
            table
                .add_index(Index::new(IndexKind::Unique, [name]))
                .map_err(|err| ParseError::invalid_schema(&err, span))?;
        }
        Ok(())
    }

    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let token = self.current();
        let span = token.span;
        let Some(mut name) = token.as_keyword().and_then(TypeName::from_keyword) else {
            return Err(match &token.kind {
                TokenKind::Identifier(word) => {
                    ParseError::new(format!("unknown data type `{word}`"), span)
                }
                TokenKind::Keyword(keyword) => {
                    ParseError::new(format!("unknown data type `{keyword}`"), span)
                }
                other => ParseError::unexpected("data type", other, span),
            });
        };
        self.advance();

        if name == TypeName::Double && self.check_keyword(Keyword::Precision) {
            self.advance();
            name = TypeName::DoublePrecision;
        }

        let mut data_type = DataType::new(name);
        if name.takes_values() {
            self.expect(&TokenKind::LeftParen)?;
            loop {
                data_type.values.push(self.expect_string("value")?);
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        } else if self.check(&TokenKind::LeftParen) {
            self.advance();
            let length = self.expect_u32("length")?;
            let scale = if self.check(&TokenKind::Comma) {
                self.advance();
                Some(self.expect_u32("scale")?)
            } else {
                None
            };
            self.expect(&TokenKind::RightParen)?;
            data_type.length = Some(TypeLength { length, scale });
        }
        Ok(data_type)
    }

    /// Parses the literal after `DEFAULT` or `ON UPDATE`.
    fn parse_default_value(&mut self) -> Result<DefaultValue, ParseError> {
        let token = self.current().clone();
        let value = match &token.kind {
            TokenKind::String(s) => {
                self.advance();
                DefaultValue::String(s.clone())
            }
            TokenKind::Number(n) => {
                self.advance();
                DefaultValue::Number(n.clone())
            }
            TokenKind::Minus | TokenKind::Plus => {
                self.advance();
                let TokenKind::Number(n) = &self.current().kind else {
                    return Err(ParseError::unexpected(
                        "number",
                        &self.current().kind,
                        self.current().span,
                    ));
                };
                let number = if token.kind == TokenKind::Minus {
                    format!("-{n}")
                } else {
                    n.clone()
                };
                self.advance();
                DefaultValue::Number(number)
            }
            TokenKind::BitString(bits) => {
                self.advance();
                DefaultValue::Bits(bits.clone())
            }
            TokenKind::HexString(hex) => {
                self.advance();
                DefaultValue::Hex(hex.clone())
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                DefaultValue::Null
            }
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                self.advance();
                let mut word = match &token.kind {
                    TokenKind::Identifier(name) => name.to_ascii_uppercase(),
                    _ => token.text.to_ascii_uppercase(),
                };
                let mut precision = None;
                let called = self.check(&TokenKind::LeftParen);
                if called {
                    self.advance();
                    if let TokenKind::Number(n) = &self.current().kind {
                        precision = Some(n.clone());
                        self.advance();
                    }
                    self.expect(&TokenKind::RightParen)?;
                }
                if CURRENT_TIMESTAMP_SYNONYMS.contains(&word.as_str()) {
                    word = String::from("CURRENT_TIMESTAMP");
                    if let Some(n) = precision.filter(|n| n != "0") {
                        word = format!("{word}({n})");
                    }
                } else if called {
                    word = format!("{word}({})", precision.unwrap_or_default());
                }
                DefaultValue::Keyword(word)
            }
            other => return Err(ParseError::unexpected("default value", other, token.span)),
        };
        Ok(value)
    }

    // ===================================================================
    // Keys, indexes and constraints
    // ===================================================================

    fn parse_constraint(
        &mut self,
        table: &mut Table,
        symbol: Option<String>,
        start: Span,
    ) -> Result<(), ParseError> {
        let index = match self.current().as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let mut using = self.parse_optional_using()?;
                let columns = self.parse_key_parts()?;
                let options = self.parse_index_options(&mut using)?;
                let span = start.merge(self.previous_span());
                return table
                    .set_primary_key(PrimaryKey {
                        columns,
                        using,
                        options,
                    })
                    .map_err(|err| ParseError::invalid_schema(&err, span));
            }
            Some(Keyword::Unique) => {
                self.advance();
                self.skip_key_or_index();
                self.parse_index_tail(IndexKind::Unique, symbol)?
            }
            Some(Keyword::Key | Keyword::Index) => {
                self.advance();
                self.parse_index_tail(IndexKind::Plain, symbol)?
            }
            Some(keyword @ (Keyword::Fulltext | Keyword::Spatial)) => {
                self.advance();
                self.skip_key_or_index();
                let kind = if keyword == Keyword::Fulltext {
                    IndexKind::Fulltext
                } else {
                    IndexKind::Spatial
                };
                self.parse_index_tail(kind, symbol)?
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.parse_foreign_key(symbol)?
            }
            Some(Keyword::Check) => return self.skip_check(),
            _ => {
                return Err(ParseError::unexpected(
                    "PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK",
                    &self.current().kind,
                    self.current().span,
                ));
            }
        };

        let span = start.merge(self.previous_span());
        table
            .add_index(index)
            .map_err(|err| ParseError::invalid_schema(&err, span))
    }

    /// Parses `[name] [USING method] (key_part, ...) [index_option ...]`.
    fn parse_index_tail(
        &mut self,
        kind: IndexKind,
        symbol: Option<String>,
    ) -> Result<Index, ParseError> {
        let name = self.parse_optional_name();
        let mut using = self.parse_optional_using()?;
        let columns = self.parse_key_parts()?;
        let options = self.parse_index_options(&mut using)?;
        Ok(Index {
            symbol,
            name,
            kind,
            using,
            columns,
            reference: None,
            options,
        })
    }

    /// Parses the options that may follow the key parts, in any order:
    /// `USING`, `KEY_BLOCK_SIZE [=] n`, `WITH PARSER name`, `COMMENT 'text'`
    /// and `VISIBLE` / `INVISIBLE`.
    fn parse_index_options(
        &mut self,
        using: &mut Option<IndexMethod>,
    ) -> Result<IndexOptions, ParseError> {
        let mut options = IndexOptions::default();
        loop {
            if self.check_keyword(Keyword::Using) {
                *using = self.parse_optional_using()?;
            } else if self.check_keyword(Keyword::Comment) {
                self.advance();
                options.comment = Some(self.expect_string("index comment")?);
            } else if self.check_word("KEY_BLOCK_SIZE") {
                self.advance();
                if self.check(&TokenKind::Eq) {
                    self.advance();
                }
                options.key_block_size = Some(self.expect_u32("key block size")?);
            } else if self.check_word("WITH") {
                self.advance();
                if !self.check_word("PARSER") {
                    return Err(ParseError::unexpected(
                        "PARSER",
                        &self.current().kind,
                        self.current().span,
                    ));
                }
                self.advance();
                options.parser = Some(self.expect_identifier()?);
            } else if self.check_word("VISIBLE") {
                self.advance();
                options.invisible = false;
            } else if self.check_word("INVISIBLE") {
                self.advance();
                options.invisible = true;
            } else {
                return Ok(options);
            }
        }
    }

    fn parse_foreign_key(&mut self, symbol: Option<String>) -> Result<Index, ParseError> {
        let name = self.parse_optional_name();
        let columns = self.parse_key_parts()?;
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_qualified_name()?;
        let referenced = self.parse_key_parts()?;

        let mut reference = Reference {
            table,
            columns: referenced,
            on_delete: None,
            on_update: None,
        };
        while self.check_keyword(Keyword::On) {
            self.advance();
            if self.check_keyword(Keyword::Delete) {
                self.advance();
                reference.on_delete = Some(self.parse_reference_action()?);
            } else if self.check_keyword(Keyword::Update) {
                self.advance();
                reference.on_update = Some(self.parse_reference_action()?);
            } else {
                return Err(ParseError::unexpected(
                    "DELETE or UPDATE",
                    &self.current().kind,
                    self.current().span,
                ));
            }
        }

        Ok(Index {
            symbol,
            name,
            kind: IndexKind::Foreign,
            using: None,
            columns,
            reference: Some(reference),
            options: IndexOptions::default(),
        })
    }

    fn parse_reference_action(&mut self) -> Result<ReferenceAction, ParseError> {
        let action = match self.current().as_keyword() {
            Some(Keyword::Restrict) => ReferenceAction::Restrict,
            Some(Keyword::Cascade) => ReferenceAction::Cascade,
            Some(Keyword::Set) => {
                self.advance();
                if self.check_keyword(Keyword::Null) {
                    ReferenceAction::SetNull
                } else if self.check_keyword(Keyword::Default) {
                    ReferenceAction::SetDefault
                } else {
                    return Err(ParseError::unexpected(
                        "NULL or DEFAULT",
                        &self.current().kind,
                        self.current().span,
                    ));
                }
            }
            Some(Keyword::No) => {
                self.advance();
                if !self.check_keyword(Keyword::Action) {
                    return Err(ParseError::unexpected(
                        "ACTION",
                        &self.current().kind,
                        self.current().span,
                    ));
                }
                ReferenceAction::NoAction
            }
            _ => {
                return Err(ParseError::unexpected(
                    "RESTRICT, CASCADE, SET NULL, NO ACTION or SET DEFAULT",
                    &self.current().kind,
                    self.current().span,
                ));
            }
        };
        self.advance();
        Ok(action)
    }

    /// Parses `(col [(len)] [ASC|DESC], ...)`.
    fn parse_key_parts(&mut self) -> Result<Vec<IndexColumn>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut parts = Vec::new();
        loop {
            let mut part = IndexColumn::new(self.expect_identifier()?);
            if self.check(&TokenKind::LeftParen) {
                self.advance();
                part.length = Some(self.expect_u32("prefix length")?);
                self.expect(&TokenKind::RightParen)?;
            }
            if self.check_keyword(Keyword::Asc) {
                self.advance();
                part.order = Some(SortOrder::Asc);
            } else if self.check_keyword(Keyword::Desc) {
                self.advance();
                part.order = Some(SortOrder::Desc);
            }
            parts.push(part);

            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(parts)
    }

    fn parse_optional_using(&mut self) -> Result<Option<IndexMethod>, ParseError> {
        if !self.check_keyword(Keyword::Using) {
            return Ok(None);
        }
        self.advance();
        let span = self.current().span;
        let method = self.expect_word("index method")?;
        IndexMethod::from_name(&method)
            .map(Some)
            .ok_or_else(|| ParseError::new(format!("unknown index method `{method}`"), span))
    }

    /// Consumes an optional identifier, as used for index names and
    /// constraint symbols.
    fn parse_optional_name(&mut self) -> Option<String> {
        let name = self.current().as_identifier().map(str::to_string)?;
        self.advance();
        Some(name)
    }

    fn skip_key_or_index(&mut self) {
        if self.check_keyword(Keyword::Key) || self.check_keyword(Keyword::Index) {
            self.advance();
        }
    }

    /// Skips `CHECK (expr) [NOT] [ENFORCED]`.
    fn skip_check(&mut self) -> Result<(), ParseError> {
        self.expect_keyword(Keyword::Check)?;
        self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1_usize;
        while depth > 0 {
            match self.current().kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Eof => {
                    return Err(ParseError::unexpected_eof("')'", self.current().span));
                }
                _ => {}
            }
            self.advance();
        }
        if self.check_keyword(Keyword::Not) {
            self.advance();
        }
        if self.check_word("ENFORCED") {
            self.advance();
        }
        Ok(())
    }

    // ===================================================================
    // Table options
    // ===================================================================

    fn parse_table_options(&mut self, table: &mut Table) -> Result<(), ParseError> {
        while !self.check(&TokenKind::Semicolon) && !self.current().is_eof() {
            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            let name = self.parse_option_name()?;
            if self.check(&TokenKind::Eq) {
                self.advance();
            }
            let value = self.parse_option_value()?;
            table.set_option(name, value);
        }
        Ok(())
    }

    /// Parses an option name, upper-cased. `DEFAULT` and `CHARACTER` pull
    /// in the following word.
    fn parse_option_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_option_word()?;
        if name == "DEFAULT" {
            name = format!("{name} {}", self.expect_option_word()?);
        }
        if name.ends_with("CHARACTER") {
            self.expect_keyword(Keyword::Set)?;
            name.push_str(" SET");
        }
        Ok(name)
    }

    fn expect_option_word(&mut self) -> Result<String, ParseError> {
        let token = self.current();
        let word = match &token.kind {
            TokenKind::Identifier(name) => name.to_ascii_uppercase(),
            TokenKind::Keyword(
                keyword @ (Keyword::Default | Keyword::Character | Keyword::Collate),
            ) => keyword.as_str().to_string(),
            TokenKind::Keyword(keyword) if !keyword.is_reserved() => {
                token.text.to_ascii_uppercase()
            }
            other => return Err(ParseError::unexpected("table option", other, token.span)),
        };
        self.advance();
        Ok(word)
    }

    fn parse_option_value(&mut self) -> Result<OptionValue, ParseError> {
        let token = self.current();
        let value = match &token.kind {
            TokenKind::Identifier(word) => OptionValue::Word(word.clone()),
            TokenKind::Keyword(_) => OptionValue::Word(token.text.to_string()),
            TokenKind::Number(n) => OptionValue::Number(n.clone()),
            TokenKind::String(s) => OptionValue::String(s.clone()),
            other => return Err(ParseError::unexpected("option value", other, token.span)),
        };
        self.advance();
        Ok(value)
    }

    // ===================================================================
    // Statement boundaries
    // ===================================================================

    fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        if self.current().is_eof() {
            return Ok(());
        }
        self.expect(&TokenKind::Semicolon)
    }

    /// Skips a statement that is not modeled, up to (not including) its `;`.
    fn skip_statement(&mut self) {
        trace!(leading = self.current().text, "skipping statement");
        while !self.check(&TokenKind::Semicolon) && !self.current().is_eof() {
            self.advance();
        }
    }

    // ===================================================================
    // Token helpers
    // ===================================================================

    fn current(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    fn previous_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    /// Advances to the next token. Stays on `Eof`.
    fn advance(&mut self) {
        if !self.current().is_eof() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Checks if the current token is the bare (unquoted) word `word`, for
    /// words that are not keywords.
    fn check_word(&self, word: &str) -> bool {
        matches!(self.current().kind, TokenKind::Identifier(_))
            && self.current().text.eq_ignore_ascii_case(word)
    }

    /// Checks if the token after the current one is the given keyword.
    fn peek_keyword(&self, keyword: Keyword) -> bool {
        self.tokens.get(self.pos + 1).and_then(Token::as_keyword) == Some(keyword)
    }

    /// Expects the current token to match the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                kind.to_string(),
                &self.current().kind,
                self.current().span,
            ))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                &self.current().kind,
                self.current().span,
            ))
        }
    }

    /// Expects an identifier and returns its name.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let Some(name) = self.current().as_identifier().map(str::to_string) else {
            return Err(ParseError::unexpected(
                "identifier",
                &self.current().kind,
                self.current().span,
            ));
        };
        self.advance();
        Ok(name)
    }

    /// Expects a name that may also be spelled as a keyword or a string
    /// (`CHARACTER SET binary`, `COLLATE 'utf8_bin'`).
    fn expect_word(&mut self, what: &str) -> Result<String, ParseError> {
        let token = self.current();
        let word = match &token.kind {
            TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
            TokenKind::Keyword(_) => token.text.to_string(),
            other => return Err(ParseError::unexpected(what, other, token.span)),
        };
        self.advance();
        Ok(word)
    }

    fn expect_string(&mut self, what: &str) -> Result<String, ParseError> {
        let token = self.current();
        let TokenKind::String(value) = &token.kind else {
            return Err(ParseError::unexpected(what, &token.kind, token.span));
        };
        let value = value.clone();
        self.advance();
        Ok(value)
    }

    fn expect_u32(&mut self, what: &str) -> Result<u32, ParseError> {
        let token = self.current();
        let TokenKind::Number(digits) = &token.kind else {
            return Err(ParseError::unexpected(what, &token.kind, token.span));
        };
        let value = digits
            .parse::<u32>()
            .map_err(|_| ParseError::new(format!("invalid {what} `{digits}`"), token.span))?;
        self.advance();
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(sql: &str) -> Result<Schema, ParseError> {
        let tokens = tokenize(sql).unwrap();
        Parser::new(tokens).parse_schema()
    }

    fn parse_table(sql: &str) -> Table {
        let schema = parse(sql).unwrap_or_else(|e| panic!("failed to parse {sql:?}: {e}"));
        assert_eq!(schema.len(), 1);
        let table = schema.tables().next().unwrap().clone();
        table
    }

    #[test]
    fn test_simple_create_table() {
        let table = parse_table("create table `hoge`(`id` integer not null)");
        assert_eq!(table.name(), "hoge");
        let id = table.column("id").unwrap();
        assert_eq!(id.data_type, DataType::new(TypeName::Integer));
        assert!(!id.nullable);
        assert!(table.primary_key().is_none());
    }

    #[test]
    fn test_multiple_statements_keep_order() {
        let schema = parse(
            "CREATE TABLE `hoge`(`id` integer not null); CREATE TABLE `fuga`(`id` INTEGER NOT NULL);",
        )
        .unwrap();
        let names: Vec<&str> = schema.tables().map(Table::name).collect();
        assert_eq!(names, vec!["hoge", "fuga"]);
    }

    #[test]
    fn test_column_attributes_any_order() {
        let table = parse_table(
            "CREATE TABLE t (
                a INT(10) UNSIGNED ZEROFILL NOT NULL DEFAULT 0 AUTO_INCREMENT COMMENT 'id',
                b VARCHAR(20) COMMENT 'x' DEFAULT 'xxx' NOT NULL,
                c VARCHAR(8) BINARY CHARACTER SET UTF8MB4 COLLATE utf8mb4_bin NULL,
                d TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6),
                e DECIMAL(10,2) DEFAULT -1.5,
                f CHAR(2) CHARSET latin1 UNIQUE KEY
            )",
        );

        let a = table.column("a").unwrap();
        assert_eq!(a.data_type, DataType::new(TypeName::Int).with_length(10));
        assert!(a.unsigned && a.zerofill && a.auto_increment && !a.nullable);
        assert_eq!(a.default, Some(DefaultValue::Number(String::from("0"))));
        assert_eq!(a.comment.as_deref(), Some("id"));

        let b = table.column("b").unwrap();
        assert_eq!(b.default, Some(DefaultValue::String(String::from("xxx"))));
        assert!(!b.nullable);

        let c = table.column("c").unwrap();
        assert!(c.binary && c.nullable);
        assert_eq!(c.charset.as_deref(), Some("utf8mb4"));
        assert_eq!(c.collation.as_deref(), Some("utf8mb4_bin"));

        let d = table.column("d").unwrap();
        let now = DefaultValue::Keyword(String::from("CURRENT_TIMESTAMP(6)"));
        assert_eq!(d.default.as_ref(), Some(&now));
        assert_eq!(d.on_update.as_ref(), Some(&now));

        let e = table.column("e").unwrap();
        assert_eq!(e.data_type, DataType::new(TypeName::Decimal).with_precision(10, 2));
        assert_eq!(e.default, Some(DefaultValue::Number(String::from("-1.5"))));

        let f = table.column("f").unwrap();
        assert_eq!(f.charset.as_deref(), Some("latin1"));
        assert_eq!(table.indexes(), &[Index::new(IndexKind::Unique, ["f"])]);
    }

    #[test]
    fn test_keyword_defaults_are_upper_cased() {
        let table = parse_table(
            "CREATE TABLE t (a DATETIME DEFAULT now(), b BOOL DEFAULT true, c INT DEFAULT NULL,
             d INT NOT NULL DEFAULT NULL, e CHAR(36) DEFAULT uuid())",
        );
        assert_eq!(
            table.column("a").unwrap().default,
            Some(DefaultValue::Keyword(String::from("CURRENT_TIMESTAMP")))
        );
        assert_eq!(
            table.column("b").unwrap().default,
            Some(DefaultValue::Keyword(String::from("TRUE")))
        );
        // NULL is already the default of a nullable column.
        assert_eq!(table.column("c").unwrap().default, None);
        assert_eq!(table.column("d").unwrap().default, Some(DefaultValue::Null));
        assert_eq!(
            table.column("e").unwrap().default,
            Some(DefaultValue::Keyword(String::from("UUID()")))
        );
    }

    #[test]
    fn test_current_timestamp_synonyms() {
        let table = parse_table(
            "CREATE TABLE t (
                a DATETIME DEFAULT CURRENT_TIMESTAMP(),
                b DATETIME DEFAULT LOCALTIMESTAMP ON UPDATE localtime(),
                c DATETIME(3) DEFAULT NOW(3) ON UPDATE CURRENT_TIMESTAMP(0)
            )",
        );
        let now = DefaultValue::Keyword(String::from("CURRENT_TIMESTAMP"));
        assert_eq!(table.column("a").unwrap().default.as_ref(), Some(&now));
        assert_eq!(table.column("b").unwrap().default.as_ref(), Some(&now));
        assert_eq!(table.column("b").unwrap().on_update.as_ref(), Some(&now));
        let c = table.column("c").unwrap();
        assert_eq!(
            c.default,
            Some(DefaultValue::Keyword(String::from("CURRENT_TIMESTAMP(3)")))
        );
        assert_eq!(c.on_update.as_ref(), Some(&now));
    }

    #[test]
    fn test_bit_and_hex_defaults() {
        let table = parse_table(
            "CREATE TABLE t (f BIT(1) NOT NULL DEFAULT b'0', g VARBINARY(4) DEFAULT X'1f2e')",
        );
        assert_eq!(
            table.column("f").unwrap().default,
            Some(DefaultValue::Bits(String::from("0")))
        );
        assert_eq!(
            table.column("g").unwrap().default,
            Some(DefaultValue::Hex(String::from("1F2E")))
        );
    }

    #[test]
    fn test_binary_attribute_needs_character_type() {
        let err = parse("CREATE TABLE t (a INT BINARY)").unwrap_err();
        assert_eq!(err.message, "BINARY attribute is not allowed on INT column `a`");
        assert_eq!(err.span, Span::new(22, 28));
        assert!(parse_table("CREATE TABLE t (a TEXT BINARY)").column("a").unwrap().binary);
    }

    #[test]
    fn test_inline_unique_matches_standalone() {
        let inline = parse_table("CREATE TABLE t (a INT UNIQUE, b INT UNIQUE KEY)");
        let standalone = parse_table("CREATE TABLE t (a INT, b INT, UNIQUE KEY (a), UNIQUE (b))");
        assert_eq!(inline, standalone);
    }

    #[test]
    fn test_index_options() {
        let table = parse_table(
            "CREATE TABLE t (
                a INT NOT NULL, b TEXT,
                PRIMARY KEY (a) USING BTREE COMMENT 'pk',
                KEY k (a) COMMENT 'x',
                UNIQUE KEY u (a) KEY_BLOCK_SIZE = 8 INVISIBLE,
                FULLTEXT KEY ft (b) WITH PARSER ngram VISIBLE
            )",
        );
        let primary_key = table.primary_key().unwrap();
        assert_eq!(primary_key.using, Some(IndexMethod::Btree));
        assert_eq!(primary_key.options.comment.as_deref(), Some("pk"));

        let [k, u, ft] = table.indexes() else {
            panic!("expected three indexes, got {:?}", table.indexes());
        };
        assert_eq!(k.options.comment.as_deref(), Some("x"));
        assert_eq!(u.options.key_block_size, Some(8));
        assert!(u.options.invisible);
        assert_eq!(ft.options.parser.as_deref(), Some("ngram"));
        assert!(!ft.options.invisible);

        let err = parse("CREATE TABLE t (a INT, KEY (a) WITH ngram)").unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("PARSER"));
        assert_eq!(err.found.as_deref(), Some("identifier `ngram`"));
    }

    #[test]
    fn test_non_reserved_keywords_as_column_names() {
        let table = parse_table("CREATE TABLE t (date DATE, comment TEXT, `key` INT)");
        let names: Vec<&str> = table.columns().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["date", "comment", "key"]);
    }

    #[test]
    fn test_enum_and_double_precision() {
        let table = parse_table(
            "CREATE TABLE t (s ENUM('a', \"b\") NOT NULL, d DOUBLE PRECISION, x SET('p','q'))",
        );
        assert_eq!(
            table.column("s").unwrap().data_type,
            DataType::new(TypeName::Enum).with_values(["a", "b"])
        );
        assert_eq!(
            table.column("d").unwrap().data_type.name,
            TypeName::DoublePrecision
        );
        assert_eq!(table.column("x").unwrap().data_type.values, vec!["p", "q"]);
    }

    #[test]
    fn test_inline_primary_key_matches_standalone() {
        let inline = parse_table("CREATE TABLE t (id INT NOT NULL PRIMARY KEY)");
        let standalone = parse_table("CREATE TABLE t (id INT NOT NULL, PRIMARY KEY (id))");
        assert_eq!(inline, standalone);
        assert_eq!(inline.primary_key(), Some(&PrimaryKey::new(["id"])));
    }

    #[test]
    fn test_two_primary_keys_rejected() {
        let err = parse("CREATE TABLE t (id INT PRIMARY KEY, PRIMARY KEY (id))").unwrap_err();
        assert_eq!(err.message, "table `t` has multiple primary keys");
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let err = parse("CREATE TABLE t (id INT NOT NULL NULL)").unwrap_err();
        assert_eq!(err.message, "duplicate NULL attribute on column `id`");
        let err = parse("CREATE TABLE t (id INT DEFAULT 1 DEFAULT 2)").unwrap_err();
        assert!(err.message.starts_with("duplicate DEFAULT"));
    }

    #[test]
    fn test_unknown_data_type() {
        let err = parse("CREATE TABLE t (id STRING)").unwrap_err();
        assert_eq!(err.message, "unknown data type `STRING`");
        assert_eq!(err.span, Span::new(19, 25));
    }

    #[test]
    fn test_unique_index_forms() {
        let table = parse_table(
            "CREATE TABLE `fuga` (
                `id` INTEGER NOT NULL AUTO_INCREMENT,
                CONSTRAINT `symbol` UNIQUE KEY `uniq_id` USING BTREE (`id`)
            )",
        );
        let index = &table.indexes()[0];
        assert_eq!(index.symbol.as_deref(), Some("symbol"));
        assert_eq!(index.name.as_deref(), Some("uniq_id"));
        assert_eq!(index.kind, IndexKind::Unique);
        assert_eq!(index.using, Some(IndexMethod::Btree));
        assert_eq!(index.columns, vec![IndexColumn::new("id")]);

        // USING after the column list is the same index.
        let trailing = parse_table(
            "create table `fuga` (`id` integer not null auto_increment,
             constraint `symbol` unique index `uniq_id` (`id`) using btree)",
        );
        assert_eq!(table, trailing);
    }

    #[test]
    fn test_plain_fulltext_spatial_indexes() {
        let table = parse_table(
            "CREATE TABLE t (
                a TEXT, b POINT NOT NULL,
                KEY (a(10) DESC), INDEX idx_a (a),
                FULLTEXT KEY ft (a), SPATIAL INDEX (b)
            )",
        );
        let kinds: Vec<IndexKind> = table.indexes().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IndexKind::Plain,
                IndexKind::Plain,
                IndexKind::Fulltext,
                IndexKind::Spatial
            ]
        );
        let first = &table.indexes()[0];
        assert_eq!(first.name, None);
        assert_eq!(first.columns[0].length, Some(10));
        assert_eq!(first.columns[0].order, Some(SortOrder::Desc));
    }

    #[test]
    fn test_foreign_key() {
        let table = parse_table(
            "CREATE TABLE post (
                author_id INT,
                CONSTRAINT fk_author FOREIGN KEY (author_id) REFERENCES `user` (id)
                    ON UPDATE CASCADE ON DELETE SET NULL
            )",
        );
        let fk = &table.indexes()[0];
        assert_eq!(fk.kind, IndexKind::Foreign);
        assert_eq!(fk.symbol.as_deref(), Some("fk_author"));
        let reference = fk.reference.as_ref().unwrap();
        assert_eq!(reference.table, "user");
        assert_eq!(reference.columns, vec![IndexColumn::new("id")]);
        assert_eq!(reference.on_delete, Some(ReferenceAction::SetNull));
        assert_eq!(reference.on_update, Some(ReferenceAction::Cascade));
    }

    #[test]
    fn test_check_constraints_skipped() {
        let table = parse_table(
            "CREATE TABLE t (a INT CHECK (a > 0), CONSTRAINT c1 CHECK ((a) < 10) NOT ENFORCED)",
        );
        assert_eq!(table.columns().len(), 1);
        assert!(table.indexes().is_empty());
    }

    #[test]
    fn test_table_options() {
        let table = parse_table(
            "CREATE TABLE t (a INT) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4, \
             AUTO_INCREMENT 10 COMMENT='hello' character set latin1",
        );
        let options: Vec<(&str, &OptionValue)> = table
            .options()
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        assert_eq!(
            options,
            vec![
                ("ENGINE", &OptionValue::Word(String::from("InnoDB"))),
                ("DEFAULT CHARSET", &OptionValue::Word(String::from("utf8mb4"))),
                ("AUTO_INCREMENT", &OptionValue::Number(String::from("10"))),
                ("COMMENT", &OptionValue::String(String::from("hello"))),
                ("CHARACTER SET", &OptionValue::Word(String::from("latin1"))),
            ]
        );
    }

    #[test]
    fn test_other_statements_skipped() {
        let schema = parse(
            "/*!40101 SET NAMES utf8 */;
             SET FOREIGN_KEY_CHECKS = 0;;
             DROP TABLE IF EXISTS `t`;
             CREATE DATABASE app;
             CREATE TEMPORARY TABLE tmp (a INT);
             INSERT INTO t VALUES ('a;b');
             CREATE TABLE IF NOT EXISTS app.t (a INT);",
        )
        .unwrap();
        assert_eq!(schema.len(), 1);
        assert!(schema.has_table("t"));
    }

    #[test]
    fn test_duplicate_definitions_rejected() {
        let err = parse("CREATE TABLE t (a INT); CREATE TABLE t (b INT);").unwrap_err();
        assert_eq!(err.message, "table `t` is defined more than once");
        assert_eq!(err.span.start, 24);

        let err = parse("CREATE TABLE t (a INT, a BIGINT)").unwrap_err();
        assert_eq!(err.message, "column `a` is defined more than once in table `t`");

        let err = parse("CREATE TABLE t (a INT, KEY k (a), UNIQUE KEY k (a))").unwrap_err();
        assert_eq!(err.message, "index `k` is defined more than once in table `t`");
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = parse("CREATE TABLE t (a INT").unwrap_err();
        assert_eq!(err.message, "unexpected end of input: expected column attribute, ',' or ')'");
        assert_eq!(err.found.as_deref(), Some("end of input"));
    }

    #[test]
    fn test_missing_semicolon_between_statements() {
        let err = parse("CREATE TABLE a (x INT) CREATE TABLE b (y INT)").unwrap_err();
        assert!(err.message.contains("found keyword CREATE"), "{}", err.message);
    }

    #[test]
    fn test_unsupported_create_table_like() {
        let err = parse("CREATE TABLE a LIKE b;").unwrap_err();
        assert_eq!(err.message, "unsupported clause keyword LIKE in CREATE TABLE `a`");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse(" -- nothing\n;;").unwrap().is_empty());
    }
}
