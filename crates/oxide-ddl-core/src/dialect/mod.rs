//! Dialect-specific SQL rendering.
//!
//! A [`Dialect`] turns [`Change`] records and schema definitions into SQL
//! statement text. Statements are returned without their terminating `;`;
//! [`render_changes`] assembles them into a script.

mod mysql;

pub use mysql::MysqlDialect;

use tracing::debug;

use crate::diff::{AlterAction, AlterTable, Change};
use crate::schema::{
    Column, DataType, DefaultValue, Index, IndexColumn, IndexKind, IndexOptions, OptionValue,
    PrimaryKey, Table,
};

/// Trait for dialect-specific SQL generation.
pub trait Dialect {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Generates the statement for a change.
    fn generate_sql(&self, change: &Change) -> String {
        match change {
            Change::DropTable(name) => self.drop_table(name),
            Change::CreateTable(table) => self.create_table(table),
            Change::AlterTable(alter) => self.alter_table(alter),
        }
    }

    /// Generates SQL for CREATE TABLE.
    fn create_table(&self, table: &Table) -> String {
        let mut lines: Vec<String> = table
            .columns()
            .map(|column| self.column_definition(column))
            .collect();
        if let Some(primary_key) = table.primary_key() {
            lines.push(self.primary_key_definition(primary_key));
        }
        lines.extend(table.indexes().iter().map(|index| self.index_definition(index)));

        let mut sql = format!("CREATE TABLE {} (\n", self.quote_identifier(table.name()));
        sql.push_str(&lines.join(",\n"));
        sql.push_str("\n)");
        for (name, value) in table.options() {
            sql.push(' ');
            sql.push_str(&self.table_option(name, value));
        }
        sql
    }

    /// Generates SQL for DROP TABLE.
    fn drop_table(&self, name: &str) -> String {
        format!("DROP TABLE {}", self.quote_identifier(name))
    }

    /// Generates a single ALTER TABLE carrying every action, comma-joined.
    fn alter_table(&self, alter: &AlterTable) -> String {
        let actions: Vec<String> = alter
            .actions
            .iter()
            .map(|action| self.alter_action(action))
            .collect();
        format!(
            "ALTER TABLE {} {}",
            self.quote_identifier(&alter.table),
            actions.join(", ")
        )
    }

    /// Generates one clause of an ALTER TABLE.
    fn alter_action(&self, action: &AlterAction) -> String {
        match action {
            AlterAction::DropColumn(name) => {
                format!("DROP COLUMN {}", self.quote_identifier(name))
            }
            AlterAction::AddColumn(column) => {
                format!("ADD COLUMN {}", self.column_definition(column))
            }
            AlterAction::ChangeColumn { old_name, column } => format!(
                "CHANGE COLUMN {} {}",
                self.quote_identifier(old_name),
                self.column_definition(column)
            ),
            AlterAction::DropPrimaryKey => self.drop_primary_key(),
            AlterAction::AddPrimaryKey(primary_key) => {
                format!("ADD {}", self.primary_key_definition(primary_key))
            }
            AlterAction::DropIndex { name } => {
                format!("DROP INDEX {}", self.quote_identifier(name))
            }
            AlterAction::DropForeignKey { name } => {
                format!("DROP FOREIGN KEY {}", self.quote_identifier(name))
            }
            AlterAction::AddIndex(index) => format!("ADD {}", self.index_definition(index)),
            AlterAction::SetTableOption { name, value } => self.table_option(name, value),
        }
    }

    /// Generates the clause dropping a table's primary key.
    fn drop_primary_key(&self) -> String {
        String::from("DROP PRIMARY KEY")
    }

    /// Generates SQL for a column definition.
    fn column_definition(&self, column: &Column) -> String {
        let mut sql = format!(
            "{} {}",
            self.quote_identifier(&column.name),
            self.data_type(&column.data_type)
        );

        if column.unsigned {
            sql.push_str(" UNSIGNED");
        }
        if column.zerofill {
            sql.push_str(" ZEROFILL");
        }
        if column.binary {
            sql.push_str(" BINARY");
        }
        if let Some(charset) = &column.charset {
            sql.push_str(" CHARACTER SET ");
            sql.push_str(charset);
        }
        if let Some(collation) = &column.collation {
            sql.push_str(" COLLATE ");
            sql.push_str(collation);
        }
        if !column.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&self.default_value(default));
        }
        if let Some(on_update) = &column.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(&self.default_value(on_update));
        }
        if column.auto_increment {
            sql.push(' ');
            sql.push_str(self.autoincrement_keyword());
        }
        if let Some(comment) = &column.comment {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.quote_string(comment));
        }

        sql
    }

    /// Renders a data type: `VARCHAR (20)`, `DECIMAL (10,2)`,
    /// `ENUM ("a","b")`.
    fn data_type(&self, data_type: &DataType) -> String {
        let mut sql = data_type.name.as_str().to_string();
        if data_type.name.takes_values() {
            let values: Vec<String> = data_type
                .values
                .iter()
                .map(|value| self.quote_string(value))
                .collect();
            sql.push_str(&format!(" ({})", values.join(",")));
        } else if let Some(length) = data_type.length {
            match length.scale {
                Some(scale) => sql.push_str(&format!(" ({},{scale})", length.length)),
                None => sql.push_str(&format!(" ({})", length.length)),
            }
        }
        sql
    }

    /// Renders a default value.
    fn default_value(&self, value: &DefaultValue) -> String {
        match value {
            DefaultValue::Null => String::from("NULL"),
            DefaultValue::String(s) => self.quote_string(s),
            DefaultValue::Number(n) | DefaultValue::Keyword(n) => n.clone(),
            DefaultValue::Bits(bits) => format!("b'{bits}'"),
            DefaultValue::Hex(hex) => format!("x'{hex}'"),
        }
    }

    /// Generates `PRIMARY KEY [USING m] (cols) [options]`.
    fn primary_key_definition(&self, primary_key: &PrimaryKey) -> String {
        let mut sql = String::from("PRIMARY KEY ");
        if let Some(method) = primary_key.using {
            sql.push_str(&format!("USING {} ", method.as_str()));
        }
        sql.push_str(&self.key_parts(&primary_key.columns));
        sql.push_str(&self.index_options(&primary_key.options));
        sql
    }

    /// Generates an index or constraint definition, as it appears in a
    /// table body or after `ADD`.
    fn index_definition(&self, index: &Index) -> String {
        let mut sql = String::new();
        if let Some(symbol) = &index.symbol {
            sql.push_str(&format!("CONSTRAINT {} ", self.quote_identifier(symbol)));
        }
        sql.push_str(index.kind.as_str());
        if let Some(name) = &index.name {
            sql.push(' ');
            sql.push_str(&self.quote_identifier(name));
        }
        if let Some(method) = index.using {
            sql.push_str(" USING ");
            sql.push_str(method.as_str());
        }
        sql.push(' ');
        sql.push_str(&self.key_parts(&index.columns));
        sql.push_str(&self.index_options(&index.options));

        if let (IndexKind::Foreign, Some(reference)) = (index.kind, &index.reference) {
            sql.push_str(" REFERENCES ");
            sql.push_str(&self.quote_identifier(&reference.table));
            sql.push(' ');
            sql.push_str(&self.key_parts(&reference.columns));
            if let Some(action) = reference.on_delete {
                sql.push_str(" ON DELETE ");
                sql.push_str(action.as_str());
            }
            if let Some(action) = reference.on_update {
                sql.push_str(" ON UPDATE ");
                sql.push_str(action.as_str());
            }
        }

        sql
    }

    /// Renders a parenthesized key part list.
    fn key_parts(&self, columns: &[IndexColumn]) -> String {
        let parts: Vec<String> = columns
            .iter()
            .map(|column| {
                let mut part = self.quote_identifier(&column.name);
                if let Some(length) = column.length {
                    part.push_str(&format!("({length})"));
                }
                if let Some(order) = column.order {
                    part.push(' ');
                    part.push_str(order.as_str());
                }
                part
            })
            .collect();
        format!("({})", parts.join(", "))
    }

    /// Renders the options that follow the key parts, each with a leading
    /// space. Empty when no option is set.
    fn index_options(&self, options: &IndexOptions) -> String {
        let mut sql = String::new();
        if let Some(size) = options.key_block_size {
            sql.push_str(&format!(" KEY_BLOCK_SIZE = {size}"));
        }
        if let Some(parser) = &options.parser {
            sql.push_str(" WITH PARSER ");
            sql.push_str(&self.quote_identifier(parser));
        }
        if let Some(comment) = &options.comment {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.quote_string(comment));
        }
        if options.invisible {
            sql.push_str(" INVISIBLE");
        }
        sql
    }

    /// Renders `NAME = value`.
    fn table_option(&self, name: &str, value: &OptionValue) -> String {
        let value = match value {
            OptionValue::Word(word) | OptionValue::Number(word) => word.clone(),
            OptionValue::String(s) => self.quote_string(s),
        };
        format!("{name} = {value}")
    }

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char();
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Quotes a string literal.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Returns the AUTO_INCREMENT keyword for this dialect.
    fn autoincrement_keyword(&self) -> &'static str;
}

/// Renders `changes` as a script: one statement per change, each
/// terminated by `;`, separated by a newline. No changes render to the
/// empty string.
#[must_use]
pub fn render_changes<D: Dialect + ?Sized>(dialect: &D, changes: &[Change]) -> String {
    debug!(dialect = dialect.name(), changes = changes.len(), "rendering changes");
    let statements: Vec<String> = changes
        .iter()
        .filter(|change| !matches!(change, Change::AlterTable(alter) if alter.actions.is_empty()))
        .map(|change| format!("{};", dialect.generate_sql(change)))
        .collect();
    statements.join("\n")
}
